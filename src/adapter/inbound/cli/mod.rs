//! CLI module graph.

pub mod balance;
pub mod codes;
pub mod command;
pub mod history;
pub mod output;
pub mod submit;
