use stake_wizard_core::{AmountConverterPort, PortError};

use crate::WizardAdapterConfig;

/// Decimal display amounts to integer base units using string arithmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPointConverter {
    decimals: u32,
}

impl FixedPointConverter {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    pub fn with_config(config: &WizardAdapterConfig) -> Self {
        Self::new(config.display_decimals)
    }

    fn scale(&self) -> Result<u128, PortError> {
        10u128.checked_pow(self.decimals).ok_or_else(|| {
            PortError::Validation(format!("unsupported decimals: {}", self.decimals))
        })
    }

    pub fn parse(&self, amount: &str) -> Result<u128, PortError> {
        let raw = amount.trim();
        if raw.is_empty() {
            return Err(PortError::Validation("amount is empty".to_owned()));
        }
        if raw.starts_with('-') {
            return Err(PortError::Validation(format!(
                "amount must not be negative: {raw}"
            )));
        }
        let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
        let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !digits(whole) || !digits(frac) {
            return Err(PortError::Validation(format!("amount is not a number: {raw}")));
        }
        if frac.len() > self.decimals as usize {
            return Err(PortError::Validation(format!(
                "amount has more than {} decimal places: {raw}",
                self.decimals
            )));
        }

        let too_large = || PortError::Validation(format!("amount is too large: {raw}"));
        let whole_units: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };
        let frac_units: u128 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<width$}", width = self.decimals as usize);
            padded.parse().map_err(|_| too_large())?
        };
        whole_units
            .checked_mul(self.scale()?)
            .and_then(|v| v.checked_add(frac_units))
            .ok_or_else(too_large)
    }

    /// Base units back to a display string without trailing zeros.
    pub fn to_display(&self, base: u128) -> Result<String, PortError> {
        let scale = self.scale()?;
        let whole = base / scale;
        let frac = base % scale;
        if frac == 0 {
            return Ok(whole.to_string());
        }
        let frac = format!("{frac:0width$}", width = self.decimals as usize);
        Ok(format!("{whole}.{}", frac.trim_end_matches('0')))
    }
}

impl AmountConverterPort for FixedPointConverter {
    fn decimals(&self) -> u32 {
        self.decimals
    }

    fn to_base_unit(&self, amount: &str) -> Result<u128, PortError> {
        self.parse(amount)
    }
}
