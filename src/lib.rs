pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod plan;
pub mod render;
pub mod sampler;
pub mod session;
pub mod shopping;
