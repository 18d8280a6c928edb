pub mod config;
pub mod handlers;
pub mod offers;
pub mod services;
pub mod startup;
