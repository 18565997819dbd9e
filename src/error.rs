use thiserror::Error;

/// Recoverable failures raised by vehicle and fleet operations.
///
/// Capability operations return the specific kind to their caller. Fleet batch
/// operations collect these per vehicle instead of propagating them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FleetError {
    /// A precondition was violated: negative or zero quantity, duplicate or
    /// missing ID, or an operation the vehicle's configuration does not allow.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Not enough fuel on board to cover the requested distance.
    #[error("Insufficient fuel: {0}")]
    InsufficientFuel(String),

    /// A board/load would push occupancy past the variant's capacity.
    #[error("Overload: {0}")]
    Overload(String),
}

impl FleetError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn insufficient_fuel(msg: impl Into<String>) -> Self {
        Self::InsufficientFuel(msg.into())
    }

    pub fn overload(msg: impl Into<String>) -> Self {
        Self::Overload(msg.into())
    }

    /// Short label for the error kind, used in batch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOperation(_) => "invalid_operation",
            Self::InsufficientFuel(_) => "insufficient_fuel",
            Self::Overload(_) => "overload",
        }
    }
}

pub type Result<T, E = FleetError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = FleetError::overload("Passenger overload for Car");
        assert_eq!(err.to_string(), "Overload: Passenger overload for Car");
        assert_eq!(err.kind(), "overload");
    }
}
