pub mod config;
pub mod handlers;
pub mod prompt;
pub mod services;
pub mod startup;
