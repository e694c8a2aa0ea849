use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// Closed set of wizard steps. Each tag fixes the payload shape of its
/// [`StepData`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    SelectTokenAndAmount,
    SelectDelegateAmount,
    SelectUndelegateAmount,
    SelectRedelegateAmount,
    GetReceiverAddress,
    GetValidatorDelegate,
    GetDelegatedValidatorUndelegate,
    GetValidatorRedelegate,
    GetDelegatedValidatorRedelegate,
    ReviewAndSign,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::SelectTokenAndAmount => "select_token_and_amount",
            StepKind::SelectDelegateAmount => "select_delegate_amount",
            StepKind::SelectUndelegateAmount => "select_undelegate_amount",
            StepKind::SelectRedelegateAmount => "select_redelegate_amount",
            StepKind::GetReceiverAddress => "get_receiver_address",
            StepKind::GetValidatorDelegate => "get_validator_delegate",
            StepKind::GetDelegatedValidatorUndelegate => "get_delegated_validator_undelegate",
            StepKind::GetValidatorRedelegate => "get_validator_redelegate",
            StepKind::GetDelegatedValidatorRedelegate => "get_delegated_validator_redelegate",
            StepKind::ReviewAndSign => "review_and_sign",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub label: String,
    pub denom: String,
    pub decimals: u32,
}

impl Token {
    pub fn new(label: impl Into<String>, denom: impl Into<String>, decimals: u32) -> Self {
        Self {
            label: label.into(),
            denom: denom.into(),
            decimals,
        }
    }
}

/// Amount in the chain's indivisible base unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "base_units")]
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

/// Base-unit amounts travel as decimal strings on the wire.
mod base_units {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validator {
    pub address: String,
    pub moniker: String,
    #[serde(default)]
    pub commission_bps: Option<u32>,
    #[serde(default)]
    pub voting_power: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub jailed: bool,
}

impl Validator {
    pub fn new(address: impl Into<String>, moniker: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            moniker: moniker.into(),
            commission_bps: None,
            voting_power: None,
            status: None,
            jailed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountSelection {
    pub amount: String,
    pub token: Token,
}

impl AmountSelection {
    pub fn new(amount: impl Into<String>, token: Token) -> Result<Self, WizardError> {
        let amount = amount.into().trim().to_owned();
        if amount.is_empty() {
            return Err(WizardError::Validation("an amount is required".to_owned()));
        }
        if token.denom.trim().is_empty() {
            return Err(WizardError::Validation("a token is required".to_owned()));
        }
        Ok(Self { amount, token })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverAddress {
    pub address: String,
}

impl ReceiverAddress {
    pub fn new(address: impl Into<String>) -> Result<Self, WizardError> {
        let address = address.into().trim().to_owned();
        if address.is_empty() {
            return Err(WizardError::Validation(
                "a receiver address is required".to_owned(),
            ));
        }
        Ok(Self { address })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorChoice {
    pub validator: Validator,
}

impl ValidatorChoice {
    pub fn new(validator: Validator) -> Result<Self, WizardError> {
        if validator.address.trim().is_empty() {
            return Err(WizardError::Validation(
                "A validator must be selected".to_owned(),
            ));
        }
        Ok(Self { validator })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDone {
    pub done: bool,
}

/// Result payload of a completed step, keyed by the same tag as [`StepKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "id", content = "data", rename_all = "snake_case")]
pub enum StepData {
    SelectTokenAndAmount(AmountSelection),
    SelectDelegateAmount(AmountSelection),
    SelectUndelegateAmount(AmountSelection),
    SelectRedelegateAmount(AmountSelection),
    GetReceiverAddress(ReceiverAddress),
    GetValidatorDelegate(ValidatorChoice),
    GetDelegatedValidatorUndelegate(ValidatorChoice),
    GetValidatorRedelegate(ValidatorChoice),
    GetDelegatedValidatorRedelegate(ValidatorChoice),
    ReviewAndSign(ReviewDone),
}

impl StepData {
    pub fn kind(&self) -> StepKind {
        match self {
            StepData::SelectTokenAndAmount(_) => StepKind::SelectTokenAndAmount,
            StepData::SelectDelegateAmount(_) => StepKind::SelectDelegateAmount,
            StepData::SelectUndelegateAmount(_) => StepKind::SelectUndelegateAmount,
            StepData::SelectRedelegateAmount(_) => StepKind::SelectRedelegateAmount,
            StepData::GetReceiverAddress(_) => StepKind::GetReceiverAddress,
            StepData::GetValidatorDelegate(_) => StepKind::GetValidatorDelegate,
            StepData::GetDelegatedValidatorUndelegate(_) => {
                StepKind::GetDelegatedValidatorUndelegate
            }
            StepData::GetValidatorRedelegate(_) => StepKind::GetValidatorRedelegate,
            StepData::GetDelegatedValidatorRedelegate(_) => {
                StepKind::GetDelegatedValidatorRedelegate
            }
            StepData::ReviewAndSign(_) => StepKind::ReviewAndSign,
        }
    }

    /// Wraps an amount selection in the variant for `kind`, if `kind` is an amount step.
    pub fn amount(kind: StepKind, selection: AmountSelection) -> Option<Self> {
        match kind {
            StepKind::SelectTokenAndAmount => Some(StepData::SelectTokenAndAmount(selection)),
            StepKind::SelectDelegateAmount => Some(StepData::SelectDelegateAmount(selection)),
            StepKind::SelectUndelegateAmount => Some(StepData::SelectUndelegateAmount(selection)),
            StepKind::SelectRedelegateAmount => Some(StepData::SelectRedelegateAmount(selection)),
            StepKind::GetReceiverAddress
            | StepKind::GetValidatorDelegate
            | StepKind::GetDelegatedValidatorUndelegate
            | StepKind::GetValidatorRedelegate
            | StepKind::GetDelegatedValidatorRedelegate
            | StepKind::ReviewAndSign => None,
        }
    }

    /// Wraps a validator choice in the variant for `kind`, if `kind` picks a validator.
    pub fn validator(kind: StepKind, choice: ValidatorChoice) -> Option<Self> {
        match kind {
            StepKind::GetValidatorDelegate => Some(StepData::GetValidatorDelegate(choice)),
            StepKind::GetDelegatedValidatorUndelegate => {
                Some(StepData::GetDelegatedValidatorUndelegate(choice))
            }
            StepKind::GetValidatorRedelegate => Some(StepData::GetValidatorRedelegate(choice)),
            StepKind::GetDelegatedValidatorRedelegate => {
                Some(StepData::GetDelegatedValidatorRedelegate(choice))
            }
            StepKind::SelectTokenAndAmount
            | StepKind::SelectDelegateAmount
            | StepKind::SelectUndelegateAmount
            | StepKind::SelectRedelegateAmount
            | StepKind::GetReceiverAddress
            | StepKind::ReviewAndSign => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub data: Option<StepData>,
}

impl Step {
    pub fn new(kind: StepKind) -> Self {
        Self { kind, data: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    #[serde(rename = "bank_MsgSend")]
    TokenTransfer,
    #[serde(rename = "staking_MsgDelegate")]
    Delegate,
    #[serde(rename = "staking_MsgUndelegate")]
    Undelegate,
    #[serde(rename = "staking_MsgRedelegate")]
    Redelegate,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::TokenTransfer,
        OperationKind::Delegate,
        OperationKind::Undelegate,
        OperationKind::Redelegate,
    ];

    pub fn wizard_id(&self) -> &'static str {
        match self {
            OperationKind::TokenTransfer => "bank_MsgSend",
            OperationKind::Delegate => "staking_MsgDelegate",
            OperationKind::Undelegate => "staking_MsgUndelegate",
            OperationKind::Redelegate => "staking_MsgRedelegate",
        }
    }

    pub fn type_url(&self) -> &'static str {
        match self {
            OperationKind::TokenTransfer => "/cosmos.bank.v1beta1.MsgSend",
            OperationKind::Delegate => "/cosmos.staking.v1beta1.MsgDelegate",
            OperationKind::Undelegate => "/cosmos.staking.v1beta1.MsgUndelegate",
            OperationKind::Redelegate => "/cosmos.staking.v1beta1.MsgBeginRedelegate",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::TokenTransfer => "token-transfer",
            OperationKind::Delegate => "delegate",
            OperationKind::Undelegate => "undelegate",
            OperationKind::Redelegate => "redelegate",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        OperationKind::ALL
            .into_iter()
            .find(|kind| raw == kind.name() || raw == kind.wizard_id() || raw == kind.type_url())
            .ok_or_else(|| WizardError::UnsupportedOperation(raw.to_owned()))
    }
}

/// Message ready for signing, shaped like its Cosmos SDK JSON encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "typeUrl", content = "value")]
pub enum TransactionMessage {
    #[serde(rename = "/cosmos.bank.v1beta1.MsgSend", rename_all = "camelCase")]
    BankSend {
        from_address: String,
        to_address: String,
        amount: Vec<Coin>,
    },
    #[serde(rename = "/cosmos.staking.v1beta1.MsgDelegate", rename_all = "camelCase")]
    Delegate {
        delegator_address: String,
        validator_address: String,
        amount: Coin,
    },
    #[serde(
        rename = "/cosmos.staking.v1beta1.MsgUndelegate",
        rename_all = "camelCase"
    )]
    Undelegate {
        delegator_address: String,
        validator_address: String,
        amount: Coin,
    },
    #[serde(
        rename = "/cosmos.staking.v1beta1.MsgBeginRedelegate",
        rename_all = "camelCase"
    )]
    Redelegate {
        delegator_address: String,
        validator_src_address: String,
        validator_dst_address: String,
        amount: Coin,
    },
}

impl TransactionMessage {
    pub fn kind(&self) -> OperationKind {
        match self {
            TransactionMessage::BankSend { .. } => OperationKind::TokenTransfer,
            TransactionMessage::Delegate { .. } => OperationKind::Delegate,
            TransactionMessage::Undelegate { .. } => OperationKind::Undelegate,
            TransactionMessage::Redelegate { .. } => OperationKind::Redelegate,
        }
    }

    pub fn signer(&self) -> &str {
        match self {
            TransactionMessage::BankSend { from_address, .. } => from_address,
            TransactionMessage::Delegate {
                delegator_address, ..
            }
            | TransactionMessage::Undelegate {
                delegator_address, ..
            }
            | TransactionMessage::Redelegate {
                delegator_address, ..
            } => delegator_address,
        }
    }

    pub fn coins(&self) -> &[Coin] {
        match self {
            TransactionMessage::BankSend { amount, .. } => amount,
            TransactionMessage::Delegate { amount, .. }
            | TransactionMessage::Undelegate { amount, .. }
            | TransactionMessage::Redelegate { amount, .. } => std::slice::from_ref(amount),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeOption {
    Low,
    #[default]
    Average,
    High,
}

impl FromStr for FeeOption {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(FeeOption::Low),
            "average" => Ok(FeeOption::Average),
            "high" => Ok(FeeOption::High),
            other => Err(WizardError::Validation(format!(
                "unknown fee option: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Pending,
    Success { tx_hash: TxHash },
    Failure { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorSort {
    Moniker,
    Commission,
    VotingPower,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorQuery {
    pub delegated_only: bool,
    pub delegator: Option<String>,
    pub search: Option<String>,
    pub sort: Option<(ValidatorSort, SortDirection)>,
}

/// Validator directory answer. `Empty` is distinct from `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorListing {
    Loading,
    Empty,
    Loaded(Vec<Validator>),
}
