pub mod llm;
pub mod metrics;
