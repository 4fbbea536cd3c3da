pub mod cli;
pub mod config;
pub mod remote;
pub mod sync;
