use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use stake_wizard_core::{BroadcastPort, FeeOption, PortError, TransactionMessage, TxHash};

use crate::WizardAdapterConfig;

/// Wire body posted to the broadcast proxy and hashed in deterministic mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastBody {
    pub signer: String,
    pub messages: Vec<TransactionMessage>,
    pub memo: Option<String>,
    pub fee: FeeOption,
}

#[derive(Debug, Clone)]
pub struct BroadcastAdapter {
    mode: BroadcastMode,
    submitted: Arc<Mutex<Vec<BroadcastBody>>>,
}

#[derive(Debug, Clone)]
enum BroadcastMode {
    Disabled(String),
    Deterministic,
    Proxy(ProxyRuntime),
}

#[derive(Debug, Clone)]
struct ProxyRuntime {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl Default for BroadcastAdapter {
    fn default() -> Self {
        Self::with_config(&WizardAdapterConfig::from_env())
    }
}

impl BroadcastAdapter {
    pub fn with_config(config: &WizardAdapterConfig) -> Self {
        let mode = if let Some(ref base_url) = config.broadcast_url {
            let timeout = Duration::from_millis(config.broadcast_timeout_ms);
            match reqwest::blocking::Client::builder().timeout(timeout).build() {
                Ok(client) => BroadcastMode::Proxy(ProxyRuntime {
                    base_url: base_url.trim_end_matches('/').to_owned(),
                    client,
                }),
                Err(e) if config.strict_runtime_required() => BroadcastMode::Disabled(format!(
                    "failed to initialize broadcast client in production profile: {e}"
                )),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "broadcast client init failed, using deterministic mode"
                    );
                    BroadcastMode::Deterministic
                }
            }
        } else if config.strict_runtime_required() {
            BroadcastMode::Disabled(
                "broadcast URL not configured in production runtime profile".to_owned(),
            )
        } else {
            BroadcastMode::Deterministic
        };

        Self {
            mode,
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn deterministic() -> Self {
        Self {
            mode: BroadcastMode::Deterministic,
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self.mode {
            BroadcastMode::Disabled(_) => "disabled",
            BroadcastMode::Deterministic => "deterministic",
            BroadcastMode::Proxy(_) => "proxy",
        }
    }

    /// Bodies accepted so far, in submission order.
    pub fn submitted(&self) -> Vec<BroadcastBody> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn deterministic_hash(body: &BroadcastBody) -> Result<TxHash, PortError> {
        let canonical = serde_json::to_vec(body)
            .map_err(|e| PortError::Validation(format!("broadcast body encode failed: {e}")))?;
        let digest = Sha256::digest(&canonical);
        let hex: String = digest.iter().map(|b| format!("{b:02X}")).collect();
        Ok(TxHash(hex))
    }

    fn proxy_broadcast(proxy: &ProxyRuntime, body: &BroadcastBody) -> Result<TxHash, PortError> {
        let url = format!("{}/broadcast", proxy.base_url);
        let response = proxy.client.post(&url).json(body).send().map_err(|e| {
            if e.is_timeout() {
                PortError::Timeout(format!("broadcast proxy timed out: {e}"))
            } else {
                PortError::Transport(format!("broadcast proxy request failed: {e}"))
            }
        })?;
        let status = response.status();
        let raw = response
            .text()
            .map_err(|e| PortError::Transport(format!("broadcast proxy body read failed: {e}")))?;
        let parsed = serde_json::from_str::<Value>(&raw);
        if !status.is_success() {
            let detail = match &parsed {
                Ok(payload) => error_text(payload.get("error").unwrap_or(payload)),
                Err(_) => raw.trim().to_owned(),
            };
            return Err(PortError::Rejected(format!(
                "broadcast proxy status {status}: {detail}"
            )));
        }
        let payload = parsed.map_err(|e| {
            PortError::Transport(format!(
                "broadcast proxy json decode failed ({e}): {}",
                raw.trim()
            ))
        })?;
        if let Some(err) = payload.get("error") {
            return Err(PortError::Rejected(error_text(err)));
        }
        // Cosmos broadcast responses carry a non-zero code on check-tx failure.
        if let Some(code) = payload.get("code").and_then(Value::as_u64).filter(|c| *c != 0) {
            let log = payload
                .get("raw_log")
                .and_then(Value::as_str)
                .unwrap_or("no log");
            return Err(PortError::Rejected(format!("code {code}: {log}")));
        }
        payload
            .get("txhash")
            .and_then(Value::as_str)
            .map(|h| TxHash(h.to_owned()))
            .ok_or_else(|| {
                PortError::Rejected("broadcast proxy response missing txhash".to_owned())
            })
    }
}

fn error_text(value: &Value) -> String {
    value
        .as_str()
        .map(str::to_owned)
        .unwrap_or_else(|| value.to_string())
}

impl BroadcastPort for BroadcastAdapter {
    fn broadcast(
        &self,
        signer: &str,
        messages: &[TransactionMessage],
        memo: Option<&str>,
        fee: FeeOption,
    ) -> Result<TxHash, PortError> {
        if messages.is_empty() {
            return Err(PortError::Validation("no messages to broadcast".to_owned()));
        }
        let body = BroadcastBody {
            signer: signer.to_owned(),
            messages: messages.to_vec(),
            memo: memo.map(str::to_owned),
            fee,
        };

        let hash = match &self.mode {
            BroadcastMode::Disabled(reason) => return Err(PortError::Policy(reason.clone())),
            BroadcastMode::Deterministic => Self::deterministic_hash(&body)?,
            BroadcastMode::Proxy(proxy) => Self::proxy_broadcast(proxy, &body)?,
        };
        tracing::debug!(mode = self.mode_name(), tx_hash = %hash, "broadcast accepted");

        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(body);
        Ok(hash)
    }
}
