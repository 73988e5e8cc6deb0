pub mod cli;
pub mod config;
pub mod error;
pub mod client;
pub mod capture;
pub mod session_file;
pub mod render;
pub mod review;
pub mod logging;
