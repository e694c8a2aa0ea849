mod common;

use common::{validator, FixedDirectory, TestSigner, SIGNER};
use stake_wizard_core::flows;
use stake_wizard_core::{
    reduce_validator, AccumulatedContext, Coin, PickerBack, PickerView, SelectOutcome,
    SortDirection, StepData, StepKind, ValidatorListing, ValidatorPicker, ValidatorSlot,
    ValidatorSort, ValidatorStepConfig, WizardError,
};

fn config(details: bool, delegated_only: bool, require_funds: bool) -> ValidatorStepConfig {
    ValidatorStepConfig {
        page_title: "Validators".to_owned(),
        label: "Pick one".to_owned(),
        delegated_validators_only: delegated_only,
        show_validator_details: details,
        require_funds,
        allow_filters: true,
    }
}

fn loaded() -> FixedDirectory {
    FixedDirectory::new(ValidatorListing::Loaded(vec![
        validator("ixovaloper1a", "Alpha"),
        validator("ixovaloper1b", "Beta"),
    ]))
}

#[test]
fn slots_are_keyed_by_producing_step() {
    assert_eq!(
        ValidatorSlot::for_step(StepKind::GetDelegatedValidatorRedelegate),
        Some(ValidatorSlot::Source)
    );
    for kind in [
        StepKind::GetValidatorDelegate,
        StepKind::GetDelegatedValidatorUndelegate,
        StepKind::GetValidatorRedelegate,
    ] {
        assert_eq!(ValidatorSlot::for_step(kind), Some(ValidatorSlot::Destination));
    }
    assert_eq!(ValidatorSlot::for_step(StepKind::GetReceiverAddress), None);
    assert_eq!(ValidatorSlot::for_step(StepKind::ReviewAndSign), None);
}

#[test]
fn reducer_writes_only_its_slot() {
    let mut ctx = AccumulatedContext::default();
    reduce_validator(&mut ctx, ValidatorSlot::Source, &validator("ixovaloper1a", "Alpha"));
    reduce_validator(&mut ctx, ValidatorSlot::Destination, &validator("ixovaloper1b", "Beta"));
    assert_eq!(ctx.source_address.as_deref(), Some("ixovaloper1a"));
    assert_eq!(ctx.destination_address.as_deref(), Some("ixovaloper1b"));
    assert_eq!(
        ctx.source_validator.map(|v| v.moniker),
        Some("Alpha".to_owned())
    );
}

#[test]
fn loading_takes_precedence_over_everything() {
    let picker = ValidatorPicker::new(StepKind::GetValidatorDelegate, config(true, false, true), vec![])
        .expect("picker");
    let signer = TestSigner {
        balances: None,
        ..TestSigner::default()
    };
    let view = picker
        .view(&FixedDirectory::new(ValidatorListing::Loading), &signer)
        .expect("view");
    assert_eq!(view, PickerView::Loading);
}

#[test]
fn absent_or_empty_balances_mean_no_funds() {
    let picker = ValidatorPicker::new(StepKind::GetValidatorDelegate, config(true, false, true), vec![])
        .expect("picker");
    for balances in [None, Some(vec![])] {
        let signer = TestSigner {
            balances,
            ..TestSigner::default()
        };
        assert_eq!(picker.view(&loaded(), &signer).expect("view"), PickerView::NoFunds);
    }
}

#[test]
fn zero_amount_balances_mean_no_funds() {
    let picker = ValidatorPicker::new(StepKind::GetValidatorDelegate, config(true, false, true), vec![])
        .expect("picker");
    let empty_wallet = TestSigner {
        balances: Some(vec![Coin::new("uixo", 0)]),
        ..TestSigner::default()
    };
    assert_eq!(picker.view(&loaded(), &empty_wallet).expect("view"), PickerView::NoFunds);

    let funded = TestSigner {
        balances: Some(vec![Coin::new("uixo", 0), Coin::new("uixo", 1)]),
        ..TestSigner::default()
    };
    assert!(matches!(
        picker.view(&loaded(), &funded).expect("view"),
        PickerView::Choose(_)
    ));
}

#[test]
fn empty_sentinel_and_empty_delegations_show_no_delegations() {
    let picker = ValidatorPicker::new(
        StepKind::GetDelegatedValidatorUndelegate,
        config(false, true, false),
        vec![],
    )
    .expect("picker");
    let signer = TestSigner::default();

    let directory = FixedDirectory::new(ValidatorListing::Empty);
    assert_eq!(picker.view(&directory, &signer).expect("view"), PickerView::NoDelegations);
    let queries = directory.queries.lock().expect("queries lock");
    assert!(queries[0].delegated_only);
    assert_eq!(queries[0].delegator.as_deref(), Some(SIGNER));
    drop(queries);

    let none_delegated = FixedDirectory::new(ValidatorListing::Loaded(vec![]));
    assert_eq!(
        picker.view(&none_delegated, &signer).expect("view"),
        PickerView::NoDelegations
    );
}

#[test]
fn excluded_validators_are_hidden_and_cannot_be_chosen() {
    let mut picker = ValidatorPicker::new(
        StepKind::GetValidatorRedelegate,
        config(false, false, false),
        vec!["ixovaloper1a".to_owned()],
    )
    .expect("picker");
    let view = picker.view(&loaded(), &TestSigner::default()).expect("view");
    assert_eq!(view, PickerView::Choose(vec![validator("ixovaloper1b", "Beta")]));

    let err = picker
        .select(validator("ixovaloper1a", "Alpha"))
        .expect_err("excluded");
    assert!(matches!(err, WizardError::Validation(_)));
}

#[test]
fn selection_without_details_submits_immediately() {
    let mut picker = ValidatorPicker::new(
        StepKind::GetDelegatedValidatorRedelegate,
        config(false, true, false),
        vec![],
    )
    .expect("picker");
    let outcome = picker.select(validator("ixovaloper1a", "Alpha")).expect("select");
    match outcome {
        SelectOutcome::Submitted(StepData::GetDelegatedValidatorRedelegate(choice)) => {
            assert_eq!(choice.validator.address, "ixovaloper1a");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn back_from_details_unselects_instead_of_leaving() {
    let mut picker = ValidatorPicker::new(StepKind::GetValidatorDelegate, config(true, false, true), vec![])
        .expect("picker");
    assert_eq!(
        picker.select(validator("ixovaloper1b", "Beta")).expect("select"),
        SelectOutcome::ShowingDetails
    );
    assert!(picker.in_details());

    assert_eq!(picker.back(), PickerBack::Unselected);
    assert!(picker.selected().is_none());
    assert_eq!(picker.back(), PickerBack::LeaveStep);
}

#[test]
fn submit_without_selection_is_blocked() {
    let picker = ValidatorPicker::new(StepKind::GetValidatorDelegate, config(true, false, true), vec![])
        .expect("picker");
    let err = picker.submit().expect_err("nothing selected");
    assert_eq!(err.to_string(), "validation error: A validator must be selected");
}

#[test]
fn filters_are_ignored_unless_allowed() {
    let mut locked = ValidatorPicker::new(
        StepKind::GetDelegatedValidatorUndelegate,
        flows::validator_config(StepKind::GetDelegatedValidatorUndelegate).expect("config"),
        vec![],
    )
    .expect("picker");
    locked.search("alpha");
    locked.sort(ValidatorSort::Commission, SortDirection::Descending);
    assert_eq!(locked.query().search, None);
    assert_eq!(locked.query().sort, None);

    let mut open = ValidatorPicker::new(StepKind::GetValidatorDelegate, config(true, false, true), vec![])
        .expect("picker");
    open.search("  alpha ");
    open.sort(ValidatorSort::VotingPower, SortDirection::Descending);
    assert_eq!(open.query().search.as_deref(), Some("alpha"));
    assert_eq!(
        open.query().sort,
        Some((ValidatorSort::VotingPower, SortDirection::Descending))
    );
}

#[test]
fn non_validator_steps_have_no_picker() {
    let err = ValidatorPicker::new(StepKind::GetReceiverAddress, config(false, false, false), vec![])
        .expect_err("not a validator step");
    assert!(err.to_string().contains("get_receiver_address"));
}
