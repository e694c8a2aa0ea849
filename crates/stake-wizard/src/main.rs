//! Stake-Wizard: drives the send and staking wizards from a scripted session file

use eyre::{Result, WrapErr};
use stake_wizard_adapters::WizardAdapterConfig;
use stake_wizard_core::{Outcome, WizardState};

mod bridge;
mod session;

use bridge::{Applied, WizardBridge};
use session::Session;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Stake-Wizard");

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre::eyre!("usage: stake-wizard <session.json>"))?;
    let raw = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to read session file {path}"))?;
    let session: Session =
        serde_json::from_str(&raw).wrap_err_with(|| format!("invalid session file {path}"))?;

    let config = WizardAdapterConfig::from_env();
    let mut bridge = WizardBridge::new(&config, &session);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")?;

    for (index, input) in session.inputs.iter().enumerate() {
        let applied = bridge
            .apply(input)
            .wrap_err_with(|| format!("input #{index} ({input:?}) was refused"))?;
        match applied {
            Applied::Moved(Some(step)) => tracing::info!(%step, "now on step"),
            Applied::Moved(None) => tracing::info!("all steps recorded"),
            Applied::AtStart => tracing::info!("already at the first step"),
            Applied::ReadyToSign(message) => {
                for line in bridge.review_text() {
                    println!("{line}");
                }
                let orchestrator = bridge.orchestrator();
                let result = runtime
                    .block_on(tokio::task::spawn_blocking(move || {
                        orchestrator.execute(message)
                    }))
                    .wrap_err("broadcast task panicked")?;
                if let Err(e) = result {
                    tracing::warn!(error = %e, "broadcast failed");
                }
            }
        }
    }

    match bridge.state() {
        WizardState::Succeeded => {
            let hash = bridge.finish()?;
            println!("{} succeeded: {hash}", bridge.operation().name());
            Ok(())
        }
        state => {
            let reason = match bridge.orchestrator().outcome() {
                Some(Outcome::Failure { reason }) => reason,
                _ => format!("session ended while {state:?}"),
            };
            eyre::bail!("{} failed: {reason}", bridge.operation().name())
        }
    }
}
