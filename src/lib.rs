pub mod cli;
pub mod config;
pub mod error;
pub mod menu;
pub mod storage;
pub mod store;
pub mod task;
