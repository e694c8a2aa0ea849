use thiserror::Error;

use crate::domain::{Coin, FeeOption, TransactionMessage, TxHash, ValidatorListing, ValidatorQuery};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy error: {0}")]
    Policy(String),
}

/// Signs and submits messages. Called at most once per user confirmation.
pub trait BroadcastPort {
    fn broadcast(
        &self,
        signer: &str,
        messages: &[TransactionMessage],
        memo: Option<&str>,
        fee: FeeOption,
    ) -> Result<TxHash, PortError>;
}

pub trait AmountConverterPort {
    /// Decimal places between the display unit and the base unit.
    fn decimals(&self) -> u32;
    /// Display decimal string to base units. Rejects non-numeric and negative input.
    fn to_base_unit(&self, amount: &str) -> Result<u128, PortError>;
}

pub trait SignerPort {
    fn address(&self) -> Result<String, PortError>;
    /// `None` means the wallet has reported no balances, which callers treat as no funds.
    fn balances(&self) -> Result<Option<Vec<Coin>>, PortError>;
}

pub trait ValidatorDirectoryPort {
    fn list(&self, query: &ValidatorQuery) -> Result<ValidatorListing, PortError>;
}
