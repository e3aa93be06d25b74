//! Trip planning errors.

use crate::domain::ModeId;
use crate::planner::ResolveError;

/// Why a selection was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Nothing has been resolved yet
    #[error("no options have been resolved")]
    NoList,

    /// The stored list belongs to another mode or an older resolution
    #[error("the option list for {0} is out of date")]
    Stale(ModeId),

    /// The mode is not the one currently requested
    #[error("{selected} is not the requested mode")]
    WrongMode { selected: ModeId },

    /// Index past the end of the list
    #[error("option {index} does not exist (list has {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Error from a trip planning operation.
///
/// A failed operation leaves the planner unchanged, except that a stale
/// selection also discards the stale list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    IncompletePlan(#[from] ResolveError),

    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    /// An illegal transition, with a message fit to show the user
    #[error("{0}")]
    ValidationFailed(String),
}

impl PlanError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        PlanError::ValidationFailed(message.into())
    }
}
