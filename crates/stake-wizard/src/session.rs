use std::collections::HashMap;

use serde::Deserialize;
use stake_wizard_adapters::ValidatorSet;
use stake_wizard_core::{Coin, FeeOption, OperationKind, Validator};

/// Scripted wizard run: who signs, what the chain looks like, and what the user enters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub operation: OperationKind,
    pub signer: String,
    #[serde(default)]
    pub balances: Option<Vec<Coin>>,
    #[serde(default)]
    pub validators: Vec<Validator>,
    #[serde(default)]
    pub delegations: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub fee: Option<FeeOption>,
    #[serde(default)]
    pub memo: Option<String>,
    pub inputs: Vec<SessionInput>,
}

impl Session {
    pub fn validator_set(&self) -> ValidatorSet {
        ValidatorSet {
            validators: self.validators.clone(),
            delegations: self.delegations.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionInput {
    Amount {
        amount: String,
    },
    Receiver {
        address: String,
    },
    Validator {
        address: String,
        #[serde(default)]
        search: Option<String>,
    },
    Back,
    Confirm,
}
