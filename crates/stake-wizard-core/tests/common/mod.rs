#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use stake_wizard_core::{
    AmountConverterPort, AmountSelection, BroadcastPort, Coin, FeeOption, Orchestrator, PortError,
    SignerPort, StepData, StepKind, Token, TransactionMessage, TxHash, Validator, ValidatorChoice,
    ValidatorDirectoryPort, ValidatorListing, ValidatorQuery,
};

pub const SIGNER: &str = "ixo1signer000000000000000000000000000000";

#[derive(Debug, Clone)]
pub struct BroadcastCall {
    pub signer: String,
    pub messages: Vec<TransactionMessage>,
    pub memo: Option<String>,
    pub fee: FeeOption,
}

/// Replies with scripted results in order; defaults to a fixed hash once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedBroadcaster {
    replies: Mutex<VecDeque<Result<TxHash, PortError>>>,
    calls: Mutex<Vec<BroadcastCall>>,
}

impl ScriptedBroadcaster {
    pub fn with_replies(replies: Vec<Result<TxHash, PortError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<BroadcastCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl BroadcastPort for ScriptedBroadcaster {
    fn broadcast(
        &self,
        signer: &str,
        messages: &[TransactionMessage],
        memo: Option<&str>,
        fee: FeeOption,
    ) -> Result<TxHash, PortError> {
        self.calls.lock().expect("calls lock").push(BroadcastCall {
            signer: signer.to_owned(),
            messages: messages.to_vec(),
            memo: memo.map(str::to_owned),
            fee,
        });
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| Ok(TxHash("ABCDEF0123".to_owned())))
    }
}

/// Signals `entered` when a broadcast starts and blocks until `release` fires.
pub struct GatedBroadcaster {
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
    calls: Mutex<usize>,
}

impl GatedBroadcaster {
    pub fn new(entered: Sender<()>, release: Receiver<()>) -> Self {
        Self {
            entered: Mutex::new(entered),
            release: Mutex::new(release),
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

impl BroadcastPort for GatedBroadcaster {
    fn broadcast(
        &self,
        _signer: &str,
        _messages: &[TransactionMessage],
        _memo: Option<&str>,
        _fee: FeeOption,
    ) -> Result<TxHash, PortError> {
        *self.calls.lock().expect("calls lock") += 1;
        self.entered
            .lock()
            .expect("entered lock")
            .send(())
            .expect("signal entered");
        self.release
            .lock()
            .expect("release lock")
            .recv()
            .expect("wait for release");
        Ok(TxHash("GATED0001".to_owned()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScaleConverter {
    pub decimals: u32,
}

impl AmountConverterPort for ScaleConverter {
    fn decimals(&self) -> u32 {
        self.decimals
    }

    fn to_base_unit(&self, amount: &str) -> Result<u128, PortError> {
        let (whole, frac) = amount.trim().split_once('.').unwrap_or((amount.trim(), ""));
        let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !digits_only(whole) || !digits_only(frac) {
            return Err(PortError::Validation(format!("invalid amount: {amount}")));
        }
        if frac.len() > self.decimals as usize {
            return Err(PortError::Validation(format!("too many decimals: {amount}")));
        }
        let padded = format!("{whole}{frac:0<width$}", width = self.decimals as usize);
        padded
            .parse()
            .map_err(|e| PortError::Validation(format!("invalid amount {amount}: {e}")))
    }
}

#[derive(Debug, Clone)]
pub struct TestSigner {
    pub address: String,
    pub balances: Option<Vec<Coin>>,
}

impl Default for TestSigner {
    fn default() -> Self {
        Self {
            address: SIGNER.to_owned(),
            balances: Some(vec![Coin::new("uixo", 10_000_000)]),
        }
    }
}

impl SignerPort for TestSigner {
    fn address(&self) -> Result<String, PortError> {
        Ok(self.address.clone())
    }

    fn balances(&self) -> Result<Option<Vec<Coin>>, PortError> {
        Ok(self.balances.clone())
    }
}

#[derive(Debug)]
pub struct FixedDirectory {
    pub listing: ValidatorListing,
    pub queries: Mutex<Vec<ValidatorQuery>>,
}

impl FixedDirectory {
    pub fn new(listing: ValidatorListing) -> Self {
        Self {
            listing,
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl ValidatorDirectoryPort for FixedDirectory {
    fn list(&self, query: &ValidatorQuery) -> Result<ValidatorListing, PortError> {
        self.queries.lock().expect("queries lock").push(query.clone());
        Ok(self.listing.clone())
    }
}

pub type TestOrchestrator = Orchestrator<ScriptedBroadcaster, ScaleConverter, TestSigner>;

pub fn new_orchestrator(broadcaster: ScriptedBroadcaster) -> Arc<TestOrchestrator> {
    Arc::new(Orchestrator::new(
        broadcaster,
        ScaleConverter { decimals: 6 },
        TestSigner::default(),
    ))
}

pub fn ixo() -> Token {
    Token::new("IXO", "uixo", 6)
}

pub fn validator(address: &str, moniker: &str) -> Validator {
    Validator::new(address, moniker)
}

pub fn amount_step(kind: StepKind, amount: &str) -> StepData {
    StepData::amount(kind, AmountSelection::new(amount, ixo()).expect("amount selection"))
        .expect("amount step")
}

pub fn validator_step(kind: StepKind, address: &str) -> StepData {
    StepData::validator(
        kind,
        ValidatorChoice::new(validator(address, address)).expect("validator choice"),
    )
    .expect("validator step")
}
