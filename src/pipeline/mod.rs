// Pipelines that drive the analyzer over many messages.

pub mod batch;
