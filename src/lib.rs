pub mod logger;
pub mod probe_pipeline;
