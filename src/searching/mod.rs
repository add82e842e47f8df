pub mod debounce;
pub mod filter;
pub mod query_pipeline;
pub mod search_results;
