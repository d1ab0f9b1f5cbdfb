//! Compiles the HTTP events of serverless functions into API Gateway method
//! resources for an infrastructure template.

pub mod compile;
pub mod config;
pub mod handler;
pub mod lookup;
pub mod models;
pub mod schema;
pub mod utils;
