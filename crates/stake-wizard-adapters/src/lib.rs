pub mod broadcast;
pub mod config;
pub mod currency;
pub mod signer;
pub mod validators;

pub use broadcast::{BroadcastAdapter, BroadcastBody};
pub use config::{RuntimeProfile, WizardAdapterConfig};
pub use currency::FixedPointConverter;
pub use signer::StaticSignerAdapter;
pub use validators::{InMemoryValidatorDirectory, ValidatorSet};
