//! Web layer for the trip planner.
//!
//! JSON endpoints for driving the planning session and for read-only
//! itinerary lookups.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
