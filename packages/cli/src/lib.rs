// ABOUTME: Shared setup for the agentdash binary
// ABOUTME: Builds the stores and the logged-in session from configuration

pub mod app;
pub mod logging;

pub use app::{AppContext, SessionOptions};
pub use logging::init_tracing;
