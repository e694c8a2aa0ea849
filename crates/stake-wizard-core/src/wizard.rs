use std::sync::Arc;

use crate::domain::{
    OperationKind, Outcome, ReviewDone, Step, StepData, StepKind, TransactionMessage, TxHash,
};
use crate::error::WizardError;
use crate::flows;
use crate::orchestrator::Orchestrator;
use crate::ports::{AmountConverterPort, BroadcastPort, SignerPort};
use crate::review::ReviewSummary;
use crate::sequencer::{AccumulatedContext, Retreat, StepSequencer};
use crate::state_machine::{WizardAction, WizardState};
use crate::validator_select::ValidatorPicker;

pub type CompletionCallback = Box<dyn FnMut(&TxHash) + Send>;

/// One wizard instance: a step sequencer for one operation kind, sharing an
/// orchestrator that owns the execution state.
pub struct Wizard<B, C, S>
where
    B: BroadcastPort,
    C: AmountConverterPort,
    S: SignerPort,
{
    operation: OperationKind,
    sequencer: StepSequencer,
    orchestrator: Arc<Orchestrator<B, C, S>>,
    on_complete: Option<CompletionCallback>,
}

impl<B, C, S> Wizard<B, C, S>
where
    B: BroadcastPort,
    C: AmountConverterPort,
    S: SignerPort,
{
    pub fn new(operation: OperationKind, orchestrator: Arc<Orchestrator<B, C, S>>) -> Self {
        Self::with_steps(operation, flows::steps_for(operation), orchestrator)
    }

    pub fn with_steps(
        operation: OperationKind,
        steps: Vec<StepKind>,
        orchestrator: Arc<Orchestrator<B, C, S>>,
    ) -> Self {
        Self {
            operation,
            sequencer: StepSequencer::new(steps),
            orchestrator,
            on_complete: None,
        }
    }

    pub fn on_complete(mut self, callback: impl FnMut(&TxHash) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator<B, C, S>> {
        &self.orchestrator
    }

    pub fn state(&self) -> WizardState {
        self.orchestrator.state()
    }

    pub fn current_step(&self) -> Option<StepKind> {
        self.sequencer.current_kind()
    }

    /// The `priorSteps` list handed to each step.
    pub fn prior_steps(&self) -> &[Step] {
        self.sequencer.steps()
    }

    pub fn context(&self) -> AccumulatedContext {
        self.sequencer.context()
    }

    /// Picker for the focused step, if it selects a validator.
    pub fn validator_picker(&self) -> Option<Result<ValidatorPicker, WizardError>> {
        let step = self.current_step()?;
        let config = flows::validator_config(step)?;
        let exclude = flows::exclusions(step, &self.sequencer.context_for(step));
        Some(ValidatorPicker::new(step, config, exclude))
    }

    pub fn advance(&mut self, result: StepData) -> Result<Option<StepKind>, WizardError> {
        let state = self.state();
        if state != WizardState::Collecting {
            return Err(WizardError::NavigationLocked(state));
        }
        if result.kind() == StepKind::ReviewAndSign {
            return Err(WizardError::NotFinished(state));
        }
        let next = self.sequencer.advance(result)?;
        if next == Some(StepKind::ReviewAndSign) {
            self.orchestrator.enter_review()?;
        }
        Ok(next)
    }

    pub fn retreat(&mut self) -> Result<Retreat, WizardError> {
        let state = self.state();
        if !state.allows_navigation() {
            return Err(WizardError::NavigationLocked(state));
        }
        if self.current_step() == Some(StepKind::ReviewAndSign)
            && matches!(state, WizardState::Reviewing | WizardState::Failed)
        {
            self.orchestrator.leave_review()?;
        }
        Ok(self.sequencer.retreat())
    }

    pub fn review(&self) -> ReviewSummary {
        ReviewSummary::new(
            self.operation,
            &self.sequencer.context_for(StepKind::ReviewAndSign),
        )
    }

    /// Message to sign: freshly built while reviewing, the previous one after a failure.
    pub fn prepare(&self) -> Result<TransactionMessage, WizardError> {
        match self.state() {
            WizardState::Reviewing => self.orchestrator.build(
                self.operation,
                &self.sequencer.context_for(StepKind::ReviewAndSign),
            ),
            WizardState::Failed => match self.orchestrator.last_message() {
                Some(message) => Ok(message),
                None => self.orchestrator.build(
                    self.operation,
                    &self.sequencer.context_for(StepKind::ReviewAndSign),
                ),
            },
            WizardState::Signing => Err(WizardError::ExecuteInFlight),
            other => Err(WizardError::IllegalTransition {
                from: other,
                action: WizardAction::ExecuteStart,
            }),
        }
    }

    pub fn confirm(&self) -> Result<TxHash, WizardError> {
        let message = self.prepare()?;
        self.orchestrator.execute(message)
    }

    /// Records completion on the review step and fires the completion callback once.
    pub fn finish(&mut self) -> Result<TxHash, WizardError> {
        let state = self.state();
        let hash = match self.orchestrator.outcome() {
            Some(Outcome::Success { tx_hash }) if state == WizardState::Succeeded => tx_hash,
            _ => return Err(WizardError::NotFinished(state)),
        };
        if self.current_step() == Some(StepKind::ReviewAndSign) {
            self.sequencer
                .advance(StepData::ReviewAndSign(ReviewDone { done: true }))?;
        }
        if let Some(mut callback) = self.on_complete.take() {
            callback(&hash);
        }
        tracing::info!(operation = %self.operation, tx_hash = %hash, "wizard completed");
        Ok(hash)
    }
}
