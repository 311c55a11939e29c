//! REST API server for the OpenTrep point-of-reference catalog.

pub mod error;
pub mod handlers;
pub mod response;
pub mod server;
pub mod state;

pub use server::{build_router, run, ServerConfig};
pub use state::ApiState;
