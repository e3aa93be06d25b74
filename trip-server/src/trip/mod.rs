//! Trip planning session: stages, the draft, and guarded resolution.

mod error;
mod machine;

#[cfg(test)]
mod machine_tests;

pub use error::{PlanError, SelectionError};
pub use machine::{Commit, DEFAULT_ORIGIN, Stage, Ticket, TripPlanner, find_place, name_location};
