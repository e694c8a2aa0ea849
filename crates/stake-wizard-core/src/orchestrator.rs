use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{Coin, FeeOption, OperationKind, Outcome, Token, TransactionMessage, TxHash};
use crate::error::WizardError;
use crate::ports::{AmountConverterPort, BroadcastPort, PortError, SignerPort};
use crate::sequencer::AccumulatedContext;
use crate::state_machine::{wizard_transition, StateTransition, WizardAction, WizardState};

#[derive(Debug)]
struct ExecutionSlot {
    state: WizardState,
    message: Option<TransactionMessage>,
    outcome: Option<Outcome>,
    transitions: Vec<StateTransition>,
}

impl ExecutionSlot {
    fn apply(&mut self, action: WizardAction) -> Result<StateTransition, WizardError> {
        let (next, transition) = wizard_transition(self.state, action)?;
        tracing::info!(
            from = ?transition.from,
            to = ?transition.to,
            reason = transition.reason,
            "wizard transition"
        );
        self.state = next;
        self.transitions.push(transition.clone());
        Ok(transition)
    }
}

/// Builds transaction messages from the accumulated context and drives
/// one broadcast at a time through the signing capability.
pub struct Orchestrator<B, C, S>
where
    B: BroadcastPort,
    C: AmountConverterPort,
    S: SignerPort,
{
    pub broadcaster: B,
    pub converter: C,
    pub signer: S,
    fee: FeeOption,
    memo: Option<String>,
    slot: Mutex<ExecutionSlot>,
}

impl<B, C, S> Orchestrator<B, C, S>
where
    B: BroadcastPort,
    C: AmountConverterPort,
    S: SignerPort,
{
    pub fn new(broadcaster: B, converter: C, signer: S) -> Self {
        Self {
            broadcaster,
            converter,
            signer,
            fee: FeeOption::default(),
            memo: None,
            slot: Mutex::new(ExecutionSlot {
                state: WizardState::Collecting,
                message: None,
                outcome: None,
                transitions: Vec::new(),
            }),
        }
    }

    pub fn with_fee(mut self, fee: FeeOption) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_memo(mut self, memo: Option<String>) -> Self {
        self.memo = memo.filter(|m| !m.trim().is_empty());
        self
    }

    pub fn fee(&self) -> FeeOption {
        self.fee
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn state(&self) -> WizardState {
        self.lock().state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.lock().outcome.clone()
    }

    pub fn last_message(&self) -> Option<TransactionMessage> {
        self.lock().message.clone()
    }

    pub fn transitions(&self) -> Vec<StateTransition> {
        self.lock().transitions.clone()
    }

    /// Maps an operation kind and its required context fields onto a message.
    /// Performs no network I/O.
    pub fn build(
        &self,
        kind: OperationKind,
        ctx: &AccumulatedContext,
    ) -> Result<TransactionMessage, WizardError> {
        let amount = required(ctx.amount.as_deref(), "amount")?;
        let token = ctx
            .token
            .as_ref()
            .filter(|t| !t.denom.trim().is_empty())
            .ok_or_else(|| missing("token"))?;
        let message = match kind {
            OperationKind::TokenTransfer => {
                let to_address =
                    required(ctx.destination_address.as_deref(), "destination address")?;
                TransactionMessage::BankSend {
                    from_address: self.signer_address()?,
                    to_address,
                    amount: vec![self.coin(&amount, token)?],
                }
            }
            OperationKind::Delegate => {
                let validator_address =
                    required(ctx.destination_address.as_deref(), "destination validator")?;
                TransactionMessage::Delegate {
                    delegator_address: self.signer_address()?,
                    validator_address,
                    amount: self.coin(&amount, token)?,
                }
            }
            OperationKind::Undelegate => {
                let validator_address =
                    required(ctx.destination_address.as_deref(), "destination validator")?;
                TransactionMessage::Undelegate {
                    delegator_address: self.signer_address()?,
                    validator_address,
                    amount: self.coin(&amount, token)?,
                }
            }
            OperationKind::Redelegate => {
                let validator_src_address =
                    required(ctx.source_address.as_deref(), "source validator")?;
                let validator_dst_address =
                    required(ctx.destination_address.as_deref(), "destination validator")?;
                TransactionMessage::Redelegate {
                    delegator_address: self.signer_address()?,
                    validator_src_address,
                    validator_dst_address,
                    amount: self.coin(&amount, token)?,
                }
            }
        };
        tracing::debug!(kind = %kind, "built transaction message");
        Ok(message)
    }

    pub fn enter_review(&self) -> Result<StateTransition, WizardError> {
        self.lock().apply(WizardAction::EnterReview)
    }

    pub fn leave_review(&self) -> Result<StateTransition, WizardError> {
        let mut slot = self.lock();
        if !slot.state.allows_navigation() {
            return Err(WizardError::NavigationLocked(slot.state));
        }
        let transition = slot.apply(WizardAction::LeaveReview)?;
        slot.outcome = None;
        Ok(transition)
    }

    /// Signs and broadcasts `message` once. A second call while the first is
    /// in flight is refused; failures are never retried here.
    pub fn execute(&self, message: TransactionMessage) -> Result<TxHash, WizardError> {
        let signer = self.signer_address()?;
        {
            let mut slot = self.lock();
            if slot.state == WizardState::Signing {
                tracing::warn!("execute refused: broadcast already in flight");
                return Err(WizardError::ExecuteInFlight);
            }
            slot.apply(WizardAction::ExecuteStart)?;
            slot.message = Some(message.clone());
            slot.outcome = Some(Outcome::Pending);
        }

        tracing::info!(kind = %message.kind(), fee = ?self.fee, "broadcasting transaction");
        let result = self
            .broadcaster
            .broadcast(
                &signer,
                std::slice::from_ref(&message),
                self.memo.as_deref(),
                self.fee,
            )
            .and_then(|hash| {
                if hash.is_empty() {
                    Err(PortError::Rejected(
                        "broadcast returned no transaction hash".to_owned(),
                    ))
                } else {
                    Ok(hash)
                }
            });

        let mut slot = self.lock();
        match result {
            Ok(hash) => {
                slot.apply(WizardAction::ExecuteSuccess)?;
                slot.outcome = Some(Outcome::Success {
                    tx_hash: hash.clone(),
                });
                tracing::info!(tx_hash = %hash, "transaction broadcast succeeded");
                Ok(hash)
            }
            Err(err) => {
                slot.apply(WizardAction::ExecuteFailure)?;
                slot.outcome = Some(Outcome::Failure {
                    reason: err.to_string(),
                });
                tracing::warn!(error = %err, "transaction broadcast failed");
                Err(WizardError::Broadcast(err))
            }
        }
    }

    /// Re-submits the message of the last failed attempt.
    pub fn retry(&self) -> Result<TxHash, WizardError> {
        let message = {
            let slot = self.lock();
            if slot.state != WizardState::Failed {
                return Err(WizardError::IllegalTransition {
                    from: slot.state,
                    action: WizardAction::ExecuteStart,
                });
            }
            slot.message
                .clone()
                .ok_or_else(|| WizardError::Validation("no transaction to retry".to_owned()))?
        };
        self.execute(message)
    }

    fn signer_address(&self) -> Result<String, WizardError> {
        let address = self.signer.address()?;
        if address.trim().is_empty() {
            return Err(missing("signer address"));
        }
        Ok(address)
    }

    fn coin(&self, amount: &str, token: &Token) -> Result<Coin, WizardError> {
        let scale = self.converter.decimals();
        if token.decimals != scale {
            return Err(WizardError::Validation(format!(
                "token {} has {} decimals but amounts are converted with {scale}",
                token.label, token.decimals
            )));
        }
        let base = self.converter.to_base_unit(amount).map_err(|e| match e {
            PortError::Validation(msg) => WizardError::Validation(msg),
            other => WizardError::Port(other),
        })?;
        Ok(Coin::new(token.denom.clone(), base))
    }

    // Nothing panics while the slot is held; a poisoned slot is still consistent.
    fn lock(&self) -> MutexGuard<'_, ExecutionSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn required(value: Option<&str>, field: &str) -> Result<String, WizardError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| missing(field))
}

fn missing(field: &str) -> WizardError {
    WizardError::Validation(format!("missing required field: {field}"))
}
