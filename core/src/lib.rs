pub mod answers;
pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod runner;
