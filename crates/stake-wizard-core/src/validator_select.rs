//! Validator selection: which context slot a chosen validator lands in, and
//! the selection flow of a validator-picking step.

use serde::{Deserialize, Serialize};

use crate::domain::{
    SortDirection, StepData, StepKind, Validator, ValidatorChoice, ValidatorListing,
    ValidatorQuery, ValidatorSort,
};
use crate::error::WizardError;
use crate::ports::{SignerPort, ValidatorDirectoryPort};
use crate::sequencer::AccumulatedContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorSlot {
    Source,
    Destination,
}

impl ValidatorSlot {
    /// Redelegate has two validator steps; only the delegated-validator one is the source.
    pub fn for_step(kind: StepKind) -> Option<Self> {
        match kind {
            StepKind::GetDelegatedValidatorRedelegate => Some(ValidatorSlot::Source),
            StepKind::GetValidatorDelegate
            | StepKind::GetDelegatedValidatorUndelegate
            | StepKind::GetValidatorRedelegate => Some(ValidatorSlot::Destination),
            StepKind::SelectTokenAndAmount
            | StepKind::SelectDelegateAmount
            | StepKind::SelectUndelegateAmount
            | StepKind::SelectRedelegateAmount
            | StepKind::GetReceiverAddress
            | StepKind::ReviewAndSign => None,
        }
    }
}

pub fn reduce_validator(ctx: &mut AccumulatedContext, slot: ValidatorSlot, validator: &Validator) {
    match slot {
        ValidatorSlot::Source => {
            ctx.source_address = Some(validator.address.clone());
            ctx.source_validator = Some(validator.clone());
        }
        ValidatorSlot::Destination => {
            ctx.destination_address = Some(validator.address.clone());
            ctx.destination_validator = Some(validator.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorStepConfig {
    pub page_title: String,
    pub label: String,
    #[serde(default)]
    pub delegated_validators_only: bool,
    #[serde(default)]
    pub show_validator_details: bool,
    #[serde(default)]
    pub require_funds: bool,
    #[serde(default)]
    pub allow_filters: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerView {
    Loading,
    NoFunds,
    NoDelegations,
    Choose(Vec<Validator>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Submitted(StepData),
    ShowingDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerBack {
    Unselected,
    LeaveStep,
}

#[derive(Debug, Clone)]
pub struct ValidatorPicker {
    step: StepKind,
    slot: ValidatorSlot,
    config: ValidatorStepConfig,
    exclude: Vec<String>,
    query: ValidatorQuery,
    selected: Option<Validator>,
}

impl ValidatorPicker {
    pub fn new(
        step: StepKind,
        config: ValidatorStepConfig,
        exclude: Vec<String>,
    ) -> Result<Self, WizardError> {
        let slot = ValidatorSlot::for_step(step).ok_or_else(|| {
            WizardError::Validation(format!("{step} does not pick a validator"))
        })?;
        let query = ValidatorQuery {
            delegated_only: config.delegated_validators_only,
            ..ValidatorQuery::default()
        };
        Ok(Self {
            step,
            slot,
            config,
            exclude,
            query,
            selected: None,
        })
    }

    pub fn step(&self) -> StepKind {
        self.step
    }

    pub fn slot(&self) -> ValidatorSlot {
        self.slot
    }

    pub fn config(&self) -> &ValidatorStepConfig {
        &self.config
    }

    pub fn query(&self) -> &ValidatorQuery {
        &self.query
    }

    pub fn selected(&self) -> Option<&Validator> {
        self.selected.as_ref()
    }

    pub fn in_details(&self) -> bool {
        self.config.show_validator_details && self.selected.is_some()
    }

    pub fn search(&mut self, term: &str) {
        if !self.config.allow_filters {
            return;
        }
        let term = term.trim();
        self.query.search = (!term.is_empty()).then(|| term.to_owned());
    }

    pub fn sort(&mut self, sort: ValidatorSort, direction: SortDirection) {
        if self.config.allow_filters {
            self.query.sort = Some((sort, direction));
        }
    }

    pub fn view<D, S>(&self, directory: &D, signer: &S) -> Result<PickerView, WizardError>
    where
        D: ValidatorDirectoryPort,
        S: SignerPort,
    {
        let mut query = self.query.clone();
        if query.delegated_only {
            query.delegator = Some(signer.address()?);
        }
        let listing = directory.list(&query)?;
        if listing == ValidatorListing::Loading {
            return Ok(PickerView::Loading);
        }
        if self.config.require_funds {
            let funded = signer
                .balances()?
                .is_some_and(|coins| coins.iter().any(|c| c.amount > 0));
            if !funded {
                return Ok(PickerView::NoFunds);
            }
        }
        match listing {
            ValidatorListing::Loading => Ok(PickerView::Loading),
            ValidatorListing::Empty => Ok(PickerView::NoDelegations),
            ValidatorListing::Loaded(list)
                if self.config.delegated_validators_only && list.is_empty() =>
            {
                Ok(PickerView::NoDelegations)
            }
            ValidatorListing::Loaded(list) => Ok(PickerView::Choose(
                list.into_iter()
                    .filter(|v| !self.exclude.contains(&v.address))
                    .collect(),
            )),
        }
    }

    /// Without a details view the choice is submitted immediately.
    pub fn select(&mut self, validator: Validator) -> Result<SelectOutcome, WizardError> {
        if self.exclude.contains(&validator.address) {
            return Err(WizardError::Validation(format!(
                "validator {} cannot be chosen for this step",
                validator.address
            )));
        }
        self.selected = Some(validator);
        if self.config.show_validator_details {
            return Ok(SelectOutcome::ShowingDetails);
        }
        self.submit().map(SelectOutcome::Submitted)
    }

    pub fn submit(&self) -> Result<StepData, WizardError> {
        let validator = self
            .selected
            .clone()
            .ok_or_else(|| WizardError::Validation("A validator must be selected".to_owned()))?;
        let choice = ValidatorChoice::new(validator)?;
        StepData::validator(self.step, choice).ok_or_else(|| {
            WizardError::Validation(format!("{} does not pick a validator", self.step))
        })
    }

    /// From the details view, clears the selection instead of leaving the step.
    pub fn back(&mut self) -> PickerBack {
        if self.in_details() {
            self.selected = None;
            PickerBack::Unselected
        } else {
            PickerBack::LeaveStep
        }
    }
}
