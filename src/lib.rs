//! Library exports for loanflow, shared between the binary and tests.

pub mod api;
pub mod config;
pub mod error;
pub mod fields;
pub mod forms;
pub mod http;
pub mod models;
pub mod routes;
pub mod session;
pub mod shell;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
