//! External service integrations.

pub mod lead_forwarder {
    pub use crate::lead_forwarder::*;
}

pub mod circuit_breaker {
    pub use crate::circuit_breaker::*;
}
