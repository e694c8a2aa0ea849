pub mod domain;
pub mod error;
pub mod flows;
pub mod orchestrator;
pub mod ports;
pub mod review;
pub mod sequencer;
pub mod state_machine;
pub mod validator_select;
pub mod wizard;

pub use domain::{
    AmountSelection, Coin, FeeOption, OperationKind, Outcome, ReceiverAddress, ReviewDone,
    SortDirection, Step, StepData, StepKind, Token, TransactionMessage, TxHash, Validator,
    ValidatorChoice, ValidatorListing, ValidatorQuery, ValidatorSort,
};
pub use error::WizardError;
pub use orchestrator::Orchestrator;
pub use ports::{
    AmountConverterPort, BroadcastPort, PortError, SignerPort, ValidatorDirectoryPort,
};
pub use review::{review_title, ReviewSummary};
pub use sequencer::{accumulate, AccumulatedContext, Retreat, StepSequencer};
pub use state_machine::{wizard_transition, StateTransition, WizardAction, WizardState};
pub use validator_select::{
    reduce_validator, PickerBack, PickerView, SelectOutcome, ValidatorPicker, ValidatorSlot,
    ValidatorStepConfig,
};
pub use wizard::{CompletionCallback, Wizard};
