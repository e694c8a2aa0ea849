use crate::error::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Collecting,
    Reviewing,
    Signing,
    Succeeded,
    Failed,
}

impl WizardState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardState::Succeeded)
    }

    /// Back/forward navigation is locked while a broadcast is in flight and after success.
    pub fn allows_navigation(&self) -> bool {
        !matches!(self, WizardState::Signing | WizardState::Succeeded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    EnterReview,
    LeaveReview,
    ExecuteStart,
    ExecuteSuccess,
    ExecuteFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: WizardState,
    pub to: WizardState,
    pub reason: &'static str,
}

const VALID_TRANSITIONS: &[(WizardState, WizardAction, WizardState, &str)] = &[
    (
        WizardState::Collecting,
        WizardAction::EnterReview,
        WizardState::Reviewing,
        "review_entered",
    ),
    (
        WizardState::Reviewing,
        WizardAction::LeaveReview,
        WizardState::Collecting,
        "review_left",
    ),
    (
        WizardState::Reviewing,
        WizardAction::ExecuteStart,
        WizardState::Signing,
        "execute_started",
    ),
    (
        WizardState::Signing,
        WizardAction::ExecuteSuccess,
        WizardState::Succeeded,
        "broadcast_succeeded",
    ),
    (
        WizardState::Signing,
        WizardAction::ExecuteFailure,
        WizardState::Failed,
        "broadcast_failed",
    ),
    (
        WizardState::Failed,
        WizardAction::ExecuteStart,
        WizardState::Signing,
        "execute_retried",
    ),
    (
        WizardState::Failed,
        WizardAction::LeaveReview,
        WizardState::Collecting,
        "review_left_after_failure",
    ),
];

pub fn wizard_transition(
    state: WizardState,
    action: WizardAction,
) -> Result<(WizardState, StateTransition), WizardError> {
    VALID_TRANSITIONS
        .iter()
        .find(|(from, act, _, _)| *from == state && *act == action)
        .map(|(from, _, to, reason)| {
            (
                *to,
                StateTransition {
                    from: *from,
                    to: *to,
                    reason: *reason,
                },
            )
        })
        .ok_or(WizardError::IllegalTransition {
            from: state,
            action,
        })
}
