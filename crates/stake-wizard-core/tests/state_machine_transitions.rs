use stake_wizard_core::{wizard_transition, WizardAction, WizardError, WizardState};

#[test]
fn happy_path_transitions() {
    let (s1, _) = wizard_transition(WizardState::Collecting, WizardAction::EnterReview)
        .expect("collecting -> reviewing");
    assert_eq!(s1, WizardState::Reviewing);
    let (s2, _) =
        wizard_transition(s1, WizardAction::ExecuteStart).expect("reviewing -> signing");
    assert_eq!(s2, WizardState::Signing);
    let (s3, t) =
        wizard_transition(s2, WizardAction::ExecuteSuccess).expect("signing -> succeeded");
    assert_eq!(s3, WizardState::Succeeded);
    assert_eq!(t.from, WizardState::Signing);
    assert_eq!(t.reason, "broadcast_succeeded");
}

#[test]
fn failure_allows_manual_retry_and_going_back() {
    let (failed, _) = wizard_transition(WizardState::Signing, WizardAction::ExecuteFailure)
        .expect("signing -> failed");
    assert_eq!(failed, WizardState::Failed);

    let (retry, t) =
        wizard_transition(failed, WizardAction::ExecuteStart).expect("failed -> signing");
    assert_eq!(retry, WizardState::Signing);
    assert_eq!(t.reason, "execute_retried");

    let (back, _) =
        wizard_transition(failed, WizardAction::LeaveReview).expect("failed -> collecting");
    assert_eq!(back, WizardState::Collecting);
}

#[test]
fn leaving_review_while_signing_is_rejected() {
    let err = wizard_transition(WizardState::Signing, WizardAction::LeaveReview)
        .expect_err("must fail");
    assert!(err.to_string().contains("illegal wizard transition"));
}

#[test]
fn second_execute_start_while_signing_is_rejected() {
    let err = wizard_transition(WizardState::Signing, WizardAction::ExecuteStart)
        .expect_err("must fail");
    assert!(matches!(
        err,
        WizardError::IllegalTransition {
            from: WizardState::Signing,
            action: WizardAction::ExecuteStart
        }
    ));
}

#[test]
fn succeeded_is_terminal() {
    for action in [
        WizardAction::EnterReview,
        WizardAction::LeaveReview,
        WizardAction::ExecuteStart,
        WizardAction::ExecuteSuccess,
        WizardAction::ExecuteFailure,
    ] {
        assert!(
            wizard_transition(WizardState::Succeeded, action).is_err(),
            "{action:?} must not leave Succeeded"
        );
    }
}

#[test]
fn execute_requires_review_first() {
    let err = wizard_transition(WizardState::Collecting, WizardAction::ExecuteStart)
        .expect_err("must fail");
    assert!(err.to_string().contains("Collecting"));
}
