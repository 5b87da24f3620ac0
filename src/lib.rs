#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "Business logic, domain models, authentication, routing configuration and"]
#![doc = "error handling for the TaskDesk API. The binary (`main.rs`) wires the"]
#![doc = "services together and runs the HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
