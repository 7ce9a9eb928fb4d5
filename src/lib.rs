pub mod aggregate;
pub mod config;
pub mod fetch;
pub mod format;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod stats;
pub mod template;
