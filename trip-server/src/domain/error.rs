//! Domain error types.
//!
//! These errors represent invariant violations when constructing domain
//! values. They are distinct from provider/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A route needs at least a start and an end
    #[error("route must have at least a start and an end step")]
    RouteTooShort,

    /// Step roles are out of place
    #[error("invalid route: {0}")]
    InvalidRoute(&'static str),

    /// Length of stay must be at least one day
    #[error("travel days must be at least 1")]
    InvalidTravelDays,
}
