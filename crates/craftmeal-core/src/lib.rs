pub mod config;
mod macros;
pub mod models;
pub mod session;
pub mod validation;
