pub mod app;
pub mod config;
pub mod cpu;
pub mod error;
pub mod ports;
pub mod scheduler;
pub mod state;
