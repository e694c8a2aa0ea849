use thiserror::Error;

use crate::domain::StepKind;
use crate::ports::PortError;
use crate::state_machine::{WizardAction, WizardState};

#[derive(Debug, Error)]
pub enum WizardError {
    /// A required field is missing; the step does not advance.
    #[error("validation error: {0}")]
    Validation(String),
    /// An operation identifier outside the four supported kinds reached the wizard.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    /// Signing or network rejection, surfaced as reported by the broadcaster.
    #[error("{0}")]
    Broadcast(#[source] PortError),
    #[error("a transaction is already being signed for this wizard")]
    ExecuteInFlight,
    #[error("navigation is locked while wizard is {0:?}")]
    NavigationLocked(WizardState),
    #[error("illegal wizard transition: {from:?} on {action:?}")]
    IllegalTransition {
        from: WizardState,
        action: WizardAction,
    },
    #[error("step mismatch: expected {expected}, got {got}")]
    StepMismatch { expected: StepKind, got: StepKind },
    #[error("wizard has no remaining step")]
    WizardComplete,
    #[error("wizard cannot finish while {0:?}")]
    NotFinished(WizardState),
    #[error(transparent)]
    Port(#[from] PortError),
}
