//! Bridge between the command-line shell and the wizard crates.
//! This must remain the only shell-facing boundary for wizard operations.

use std::sync::Arc;

use stake_wizard_adapters::{
    BroadcastAdapter, FixedPointConverter, InMemoryValidatorDirectory, StaticSignerAdapter,
    WizardAdapterConfig,
};
use stake_wizard_core::{
    AmountSelection, OperationKind, Orchestrator, PickerView, ReceiverAddress, Retreat,
    ReviewSummary, SelectOutcome, StepData, StepKind, Token, TransactionMessage, TxHash, Wizard,
    WizardError, WizardState,
};

use crate::session::{Session, SessionInput};

pub type WizardOrchestrator =
    Orchestrator<BroadcastAdapter, FixedPointConverter, StaticSignerAdapter>;

/// What the shell has to do after an input was applied.
#[derive(Debug)]
pub enum Applied {
    Moved(Option<StepKind>),
    AtStart,
    ReadyToSign(TransactionMessage),
}

pub struct WizardBridge {
    wizard: Wizard<BroadcastAdapter, FixedPointConverter, StaticSignerAdapter>,
    directory: InMemoryValidatorDirectory,
    token: Token,
}

impl WizardBridge {
    pub fn new(config: &WizardAdapterConfig, session: &Session) -> Self {
        let mut signer = StaticSignerAdapter::new(session.signer.clone());
        if let Some(balances) = &session.balances {
            signer = signer.with_balances(balances.clone());
        }
        let orchestrator = WizardOrchestrator::new(
            BroadcastAdapter::with_config(config),
            FixedPointConverter::with_config(config),
            signer,
        )
        .with_fee(session.fee.unwrap_or(config.fee))
        .with_memo(session.memo.clone().or_else(|| config.memo.clone()));
        tracing::info!(
            operation = %session.operation,
            broadcast = orchestrator.broadcaster.mode_name(),
            "wizard session ready"
        );

        Self {
            wizard: Wizard::new(session.operation, Arc::new(orchestrator)),
            directory: InMemoryValidatorDirectory::from_set(session.validator_set()),
            token: config.token(),
        }
    }

    pub fn operation(&self) -> OperationKind {
        self.wizard.operation()
    }

    pub fn state(&self) -> WizardState {
        self.wizard.state()
    }

    pub fn orchestrator(&self) -> Arc<WizardOrchestrator> {
        Arc::clone(self.wizard.orchestrator())
    }

    pub fn review(&self) -> ReviewSummary {
        self.wizard.review()
    }

    /// Review page as printed: the title header, then one line per field.
    pub fn review_text(&self) -> Vec<String> {
        let review = self.review();
        let mut text = vec![format!("== {} ==", review.title)];
        text.extend(review.lines());
        text
    }

    pub fn finish(&mut self) -> Result<TxHash, WizardError> {
        self.wizard.finish()
    }

    fn current_step(&self) -> Result<StepKind, WizardError> {
        self.wizard.current_step().ok_or(WizardError::WizardComplete)
    }

    pub fn apply(&mut self, input: &SessionInput) -> Result<Applied, WizardError> {
        match input {
            SessionInput::Amount { amount } => {
                let step = self.current_step()?;
                let selection = AmountSelection::new(amount.clone(), self.token.clone())?;
                let data = StepData::amount(step, selection).ok_or_else(|| {
                    WizardError::Validation(format!("step {step} does not take an amount"))
                })?;
                self.wizard.advance(data).map(Applied::Moved)
            }
            SessionInput::Receiver { address } => {
                let data = StepData::GetReceiverAddress(ReceiverAddress::new(address.clone())?);
                self.wizard.advance(data).map(Applied::Moved)
            }
            SessionInput::Validator { address, search } => {
                let data = self.choose_validator(address, search.as_deref())?;
                self.wizard.advance(data).map(Applied::Moved)
            }
            SessionInput::Back => match self.wizard.retreat()? {
                Retreat::Moved(step) => Ok(Applied::Moved(Some(step))),
                Retreat::AtStart => Ok(Applied::AtStart),
            },
            SessionInput::Confirm => self.wizard.prepare().map(Applied::ReadyToSign),
        }
    }

    fn choose_validator(
        &self,
        address: &str,
        search: Option<&str>,
    ) -> Result<StepData, WizardError> {
        let step = self.current_step()?;
        let mut picker = self.wizard.validator_picker().ok_or_else(|| {
            WizardError::Validation(format!("step {step} does not pick a validator"))
        })??;
        if let Some(term) = search {
            picker.search(term);
        }

        let signer = &self.wizard.orchestrator().signer;
        let candidates = match picker.view(&self.directory, signer)? {
            PickerView::Choose(list) => list,
            PickerView::Loading => {
                return Err(WizardError::Validation(
                    "validator list is still loading".to_owned(),
                ))
            }
            PickerView::NoFunds => {
                return Err(WizardError::Validation(
                    "You don't have any tokens to stake".to_owned(),
                ))
            }
            PickerView::NoDelegations => {
                return Err(WizardError::Validation(
                    "You don't have any tokens delegated".to_owned(),
                ))
            }
        };
        let validator = candidates
            .into_iter()
            .find(|v| v.address == address)
            .ok_or_else(|| {
                WizardError::Validation(format!("validator {address} is not selectable here"))
            })?;

        match picker.select(validator)? {
            SelectOutcome::Submitted(data) => Ok(data),
            SelectOutcome::ShowingDetails => picker.submit(),
        }
    }
}
