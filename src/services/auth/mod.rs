pub mod credential;
pub mod extract;
pub mod factory;
pub mod gate;
pub mod keygen;
pub mod keys;

pub use factory::build_auth_gate;
pub use gate::{AuthGate, AuthOutcome};

/// Whether the gate is consulted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Enforced,
    /// `REQUIRE_API_KEY=false`: every request passes.
    Disabled,
}

impl AuthMode {
    pub fn is_enforced(&self) -> bool {
        matches!(self, AuthMode::Enforced)
    }
}
