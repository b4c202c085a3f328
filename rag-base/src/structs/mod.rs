pub mod rag_base_config;
pub mod search_result;
