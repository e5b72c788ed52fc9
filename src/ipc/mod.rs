mod error;
mod handlers;
mod helpers;
mod router;
mod types;

pub use handlers::core::load_sample;
pub use router::handle_request;
pub use types::{AppState, Request};
