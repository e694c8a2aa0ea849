//! Ordered step list with a cursor, and the reduction of recorded step
//! results into one [`AccumulatedContext`].

use serde::Serialize;

use crate::domain::{Step, StepData, StepKind, Token, Validator};
use crate::error::WizardError;
use crate::validator_select::{reduce_validator, ValidatorSlot};

/// Merged view of every recorded step result, keyed by semantic field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccumulatedContext {
    pub amount: Option<String>,
    pub token: Option<Token>,
    pub destination_address: Option<String>,
    pub destination_validator: Option<Validator>,
    pub source_address: Option<String>,
    pub source_validator: Option<Validator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved(StepKind),
    AtStart,
}

#[derive(Debug, Clone)]
pub struct StepSequencer {
    steps: Vec<Step>,
    cursor: usize,
}

impl StepSequencer {
    pub fn new(kinds: impl IntoIterator<Item = StepKind>) -> Self {
        Self {
            steps: kinds.into_iter().map(Step::new).collect(),
            cursor: 0,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }

    pub fn current_kind(&self) -> Option<StepKind> {
        self.current().map(|s| s.kind)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    pub fn recorded(&self, kind: StepKind) -> Option<&StepData> {
        self.steps
            .iter()
            .find(|s| s.kind == kind)
            .and_then(|s| s.data.as_ref())
    }

    /// Records `result` on the focused step and moves to the next one.
    /// Returns the kind of the newly focused step, `None` once past the end.
    pub fn advance(&mut self, result: StepData) -> Result<Option<StepKind>, WizardError> {
        let step = self
            .steps
            .get_mut(self.cursor)
            .ok_or(WizardError::WizardComplete)?;
        if step.kind != result.kind() {
            return Err(WizardError::StepMismatch {
                expected: step.kind,
                got: result.kind(),
            });
        }
        step.data = Some(result);
        self.cursor += 1;
        Ok(self.current_kind())
    }

    /// Moves back one step. Recorded results are kept so the step re-shows prior input.
    pub fn retreat(&mut self) -> Retreat {
        if self.cursor == 0 {
            return Retreat::AtStart;
        }
        self.cursor -= 1;
        Retreat::Moved(self.steps[self.cursor].kind)
    }

    pub fn context(&self) -> AccumulatedContext {
        accumulate(&self.steps, None)
    }

    /// Context as seen by `requesting`: every other step's result.
    pub fn context_for(&self, requesting: StepKind) -> AccumulatedContext {
        accumulate(&self.steps, Some(requesting))
    }
}

pub fn accumulate(steps: &[Step], exclude: Option<StepKind>) -> AccumulatedContext {
    let mut ctx = AccumulatedContext::default();
    for step in steps {
        if Some(step.kind) == exclude {
            continue;
        }
        if let Some(data) = step.data.as_ref() {
            contribute(&mut ctx, data);
        }
    }
    tracing::debug!(?ctx, "accumulated step context");
    ctx
}

/// Which context field(s) each step tag feeds.
fn contribute(ctx: &mut AccumulatedContext, data: &StepData) {
    match data {
        StepData::SelectTokenAndAmount(selection)
        | StepData::SelectDelegateAmount(selection)
        | StepData::SelectUndelegateAmount(selection)
        | StepData::SelectRedelegateAmount(selection) => {
            ctx.amount = Some(selection.amount.clone());
            ctx.token = Some(selection.token.clone());
        }
        StepData::GetReceiverAddress(receiver) => {
            ctx.destination_address = Some(receiver.address.clone());
        }
        StepData::GetValidatorDelegate(choice)
        | StepData::GetDelegatedValidatorUndelegate(choice)
        | StepData::GetValidatorRedelegate(choice)
        | StepData::GetDelegatedValidatorRedelegate(choice) => {
            if let Some(slot) = ValidatorSlot::for_step(data.kind()) {
                reduce_validator(ctx, slot, &choice.validator);
            }
        }
        StepData::ReviewAndSign(_) => {}
    }
}
