use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stake_wizard_core::{
    PortError, SortDirection, Validator, ValidatorDirectoryPort, ValidatorListing, ValidatorQuery,
    ValidatorSort,
};

/// Serialized form: validators plus validator addresses delegated to, keyed by delegator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    pub validators: Vec<Validator>,
    #[serde(default)]
    pub delegations: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryValidatorDirectory {
    set: ValidatorSet,
    loading: bool,
}

impl InMemoryValidatorDirectory {
    pub fn new(validators: Vec<Validator>) -> Self {
        Self {
            set: ValidatorSet {
                validators,
                delegations: HashMap::new(),
            },
            loading: false,
        }
    }

    pub fn from_set(set: ValidatorSet) -> Self {
        Self {
            set,
            loading: false,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, PortError> {
        let set: ValidatorSet = serde_json::from_str(raw)
            .map_err(|e| PortError::Validation(format!("validator set decode failed: {e}")))?;
        Ok(Self::from_set(set))
    }

    pub fn with_delegations(
        mut self,
        delegator: impl Into<String>,
        validator_addresses: Vec<String>,
    ) -> Self {
        self.set
            .delegations
            .insert(delegator.into(), validator_addresses);
        self
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn candidates(&self, query: &ValidatorQuery) -> Vec<Validator> {
        if !query.delegated_only {
            return self.set.validators.clone();
        }
        let Some(delegated) = query
            .delegator
            .as_deref()
            .and_then(|d| self.set.delegations.get(d))
        else {
            return Vec::new();
        };
        self.set
            .validators
            .iter()
            .filter(|v| delegated.iter().any(|a| a == &v.address))
            .cloned()
            .collect()
    }
}

fn compare(a: &Validator, b: &Validator, sort: ValidatorSort) -> Ordering {
    match sort {
        ValidatorSort::Moniker => a.moniker.to_lowercase().cmp(&b.moniker.to_lowercase()),
        ValidatorSort::Commission => a.commission_bps.cmp(&b.commission_bps),
        ValidatorSort::VotingPower => a.voting_power.cmp(&b.voting_power),
    }
}

impl ValidatorDirectoryPort for InMemoryValidatorDirectory {
    fn list(&self, query: &ValidatorQuery) -> Result<ValidatorListing, PortError> {
        if self.loading {
            return Ok(ValidatorListing::Loading);
        }
        let mut validators = self.candidates(query);
        if validators.is_empty() {
            return Ok(ValidatorListing::Empty);
        }

        if let Some(needle) = query.search.as_deref().map(str::to_lowercase) {
            validators.retain(|v| {
                v.moniker.to_lowercase().contains(&needle)
                    || v.address.to_lowercase().contains(&needle)
            });
        }
        if let Some((sort, direction)) = query.sort {
            validators.sort_by(|a, b| {
                let ord = compare(a, b, sort);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        Ok(ValidatorListing::Loaded(validators))
    }
}
