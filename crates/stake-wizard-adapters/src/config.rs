use stake_wizard_core::{FeeOption, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct WizardAdapterConfig {
    pub runtime_profile: RuntimeProfile,
    pub broadcast_url: Option<String>,
    pub broadcast_timeout_ms: u64,
    pub base_denom: String,
    pub token_label: String,
    pub display_decimals: u32,
    pub fee: FeeOption,
    pub memo: Option<String>,
}

impl Default for WizardAdapterConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::Development,
            broadcast_url: None,
            broadcast_timeout_ms: 15_000,
            base_denom: "uixo".to_owned(),
            token_label: "IXO".to_owned(),
            display_decimals: 6,
            fee: FeeOption::Average,
            memo: None,
        }
    }
}

impl WizardAdapterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset keys keep their defaults; unparsable values fall back with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let runtime_profile = match get("STAKE_WIZARD_PROFILE").as_deref() {
            None => defaults.runtime_profile,
            Some(v) if v.eq_ignore_ascii_case("production") => RuntimeProfile::Production,
            Some(v) if v.eq_ignore_ascii_case("development") => RuntimeProfile::Development,
            Some(other) => {
                tracing::warn!(value = other, "unknown STAKE_WIZARD_PROFILE, using development");
                RuntimeProfile::Development
            }
        };

        let fee = match get("STAKE_WIZARD_FEE") {
            None => defaults.fee,
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid STAKE_WIZARD_FEE, using default");
                defaults.fee
            }),
        };

        Self {
            runtime_profile,
            broadcast_url: get("STAKE_WIZARD_BROADCAST_URL"),
            broadcast_timeout_ms: parse_or(
                get("STAKE_WIZARD_BROADCAST_TIMEOUT_MS"),
                "STAKE_WIZARD_BROADCAST_TIMEOUT_MS",
                defaults.broadcast_timeout_ms,
            ),
            base_denom: get("STAKE_WIZARD_DENOM").unwrap_or(defaults.base_denom),
            token_label: get("STAKE_WIZARD_TOKEN_LABEL").unwrap_or(defaults.token_label),
            display_decimals: parse_or(
                get("STAKE_WIZARD_DECIMALS"),
                "STAKE_WIZARD_DECIMALS",
                defaults.display_decimals,
            ),
            fee,
            memo: get("STAKE_WIZARD_MEMO"),
        }
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }

    pub fn token(&self) -> Token {
        Token::new(
            self.token_label.clone(),
            self.base_denom.clone(),
            self.display_decimals,
        )
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => default,
        Some(v) => v.parse().unwrap_or_else(|e| {
            tracing::warn!(key, value = %v, error = %e, "invalid config value, using default");
            default
        }),
    }
}
