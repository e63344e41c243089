pub mod chain;
pub mod cli;
pub mod config;
pub mod error;
pub mod example;
pub mod fetch;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod schema;
