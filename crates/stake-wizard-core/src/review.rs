use crate::domain::{OperationKind, Validator};
use crate::sequencer::AccumulatedContext;

/// Read-only view of the review step. Validator fields cannot be re-selected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    pub operation: OperationKind,
    pub title: &'static str,
    pub amount: Option<String>,
    pub token_label: Option<String>,
    pub destination_address: Option<String>,
    pub source_validator: Option<Validator>,
    pub destination_validator: Option<Validator>,
}

impl ReviewSummary {
    pub fn new(operation: OperationKind, ctx: &AccumulatedContext) -> Self {
        Self {
            operation,
            title: review_title(operation),
            amount: ctx.amount.clone(),
            token_label: ctx.token.as_ref().map(|t| t.label.clone()),
            destination_address: ctx.destination_address.clone(),
            source_validator: ctx.source_validator.clone(),
            destination_validator: ctx.destination_validator.clone(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let amount = format!(
            "{} {}",
            self.amount.as_deref().unwrap_or("0"),
            self.token_label.as_deref().unwrap_or("")
        )
        .trim_end()
        .to_owned();
        let mut lines = Vec::new();
        match self.operation {
            OperationKind::TokenTransfer => {
                lines.push(format!("I am sending {amount}"));
                lines.push(format!(
                    "to the address: {}",
                    self.destination_address.as_deref().unwrap_or("")
                ));
            }
            OperationKind::Delegate => {
                lines.push(format!("I am delegating {amount}"));
                lines.push(format!(
                    "to the validator: {}",
                    describe(self.destination_validator.as_ref())
                ));
            }
            OperationKind::Undelegate => {
                lines.push(format!("I want to undelegate {amount}"));
                lines.push(format!(
                    "with the validator: {}",
                    describe(self.destination_validator.as_ref())
                ));
            }
            OperationKind::Redelegate => {
                lines.push(format!("I want to redelegate {amount}"));
                lines.push(format!(
                    "From validator: {}",
                    describe(self.source_validator.as_ref())
                ));
                lines.push(format!(
                    "To validator: {}",
                    describe(self.destination_validator.as_ref())
                ));
            }
        }
        lines.push("Sign?".to_owned());
        lines
    }
}

pub fn review_title(operation: OperationKind) -> &'static str {
    match operation {
        OperationKind::TokenTransfer => "Review and sign",
        OperationKind::Delegate => "Confirm delegation",
        OperationKind::Undelegate => "Confirm undelegation",
        OperationKind::Redelegate => "Confirm redelegation",
    }
}

fn describe(validator: Option<&Validator>) -> String {
    match validator {
        Some(v) if v.moniker.is_empty() => v.address.clone(),
        Some(v) => format!("{} ({})", v.moniker, v.address),
        None => String::new(),
    }
}
