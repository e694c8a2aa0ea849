use stake_wizard_core::{Coin, PortError, SignerPort};

/// Wallet with a fixed address. Balances stay `None` until the wallet reports them.
#[derive(Debug, Clone, Default)]
pub struct StaticSignerAdapter {
    address: String,
    balances: Option<Vec<Coin>>,
}

impl StaticSignerAdapter {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            balances: None,
        }
    }

    pub fn with_balances(mut self, balances: Vec<Coin>) -> Self {
        self.balances = Some(balances);
        self
    }
}

impl SignerPort for StaticSignerAdapter {
    fn address(&self) -> Result<String, PortError> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(PortError::Policy("wallet not connected".to_owned()));
        }
        Ok(address.to_owned())
    }

    fn balances(&self) -> Result<Option<Vec<Coin>>, PortError> {
        Ok(self.balances.clone())
    }
}
