use crate::domain::{OperationKind, StepKind};
use crate::sequencer::AccumulatedContext;
use crate::validator_select::ValidatorStepConfig;

pub fn steps_for(kind: OperationKind) -> Vec<StepKind> {
    match kind {
        OperationKind::TokenTransfer => vec![
            StepKind::SelectTokenAndAmount,
            StepKind::GetReceiverAddress,
            StepKind::ReviewAndSign,
        ],
        OperationKind::Delegate => vec![
            StepKind::GetValidatorDelegate,
            StepKind::SelectDelegateAmount,
            StepKind::ReviewAndSign,
        ],
        OperationKind::Undelegate => vec![
            StepKind::GetDelegatedValidatorUndelegate,
            StepKind::SelectUndelegateAmount,
            StepKind::ReviewAndSign,
        ],
        OperationKind::Redelegate => vec![
            StepKind::GetDelegatedValidatorRedelegate,
            StepKind::GetValidatorRedelegate,
            StepKind::SelectRedelegateAmount,
            StepKind::ReviewAndSign,
        ],
    }
}

pub fn validator_config(step: StepKind) -> Option<ValidatorStepConfig> {
    let config = match step {
        StepKind::GetValidatorDelegate => ValidatorStepConfig {
            page_title: "Delegate".to_owned(),
            label: "Select a validator to delegate to".to_owned(),
            delegated_validators_only: false,
            show_validator_details: true,
            require_funds: true,
            allow_filters: true,
        },
        StepKind::GetDelegatedValidatorUndelegate => ValidatorStepConfig {
            page_title: "Undelegate".to_owned(),
            label: "Select a validator to undelegate from".to_owned(),
            delegated_validators_only: true,
            show_validator_details: false,
            require_funds: false,
            allow_filters: false,
        },
        StepKind::GetDelegatedValidatorRedelegate => ValidatorStepConfig {
            page_title: "Redelegate".to_owned(),
            label: "Select a validator to redelegate from".to_owned(),
            delegated_validators_only: true,
            show_validator_details: false,
            require_funds: false,
            allow_filters: false,
        },
        StepKind::GetValidatorRedelegate => ValidatorStepConfig {
            page_title: "Redelegate".to_owned(),
            label: "Select a validator to redelegate to".to_owned(),
            delegated_validators_only: false,
            show_validator_details: true,
            require_funds: false,
            allow_filters: true,
        },
        StepKind::SelectTokenAndAmount
        | StepKind::SelectDelegateAmount
        | StepKind::SelectUndelegateAmount
        | StepKind::SelectRedelegateAmount
        | StepKind::GetReceiverAddress
        | StepKind::ReviewAndSign => return None,
    };
    Some(config)
}

/// The redelegate destination list hides the validator being redelegated from.
pub fn exclusions(step: StepKind, ctx: &AccumulatedContext) -> Vec<String> {
    match step {
        StepKind::GetValidatorRedelegate => ctx.source_address.iter().cloned().collect(),
        _ => Vec::new(),
    }
}
