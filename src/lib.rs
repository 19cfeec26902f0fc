// SafeChat: phishing and social-engineering risk analysis for messages
//
// This is the library root. The analysis module is the pure core; the
// remaining modules are the plumbing around it (report sinks, local
// report store, terminal output, batch pipeline).

pub mod analysis;
pub mod config;
pub mod db;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod status;
