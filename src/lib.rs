//! src/lib.rs
pub mod configuration;
pub mod middleware;
pub mod routes;
pub mod startup;

pub mod domain;

pub mod telemetry;

pub mod email_client;
pub mod smtp_transport;
