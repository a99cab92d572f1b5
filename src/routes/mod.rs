//! src/routes/mod.rs
mod auth;
mod contacts;
mod debug;
mod error_chain_fmt;
mod errors;
mod fallback;
mod health_check;
mod registry;

pub use auth::*;
pub use contacts::*;
pub use debug::*;
pub use error_chain_fmt::*;
pub use errors::*;
pub use fallback::*;
pub use health_check::*;
pub use registry::*;
