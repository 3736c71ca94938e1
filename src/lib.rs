pub mod cli;
pub mod config;
pub mod constants;
pub mod definition;
pub mod detect;
pub mod install;
pub mod prompt;
pub mod render;
pub mod wizard;

pub use anyhow::Result;
