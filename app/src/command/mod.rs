//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is a separate strategy type with its own input type,
//! dispatched statically from `main`.

use medrec_config::Config;
use medrec_dataset::ConditionStore;
use medrec_providers::ZhipuProvider;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod analyze;
mod conditions;
mod info;
mod init;
mod matcher;
mod predict;
mod symptoms;
mod version;

pub use analyze::{AnalyzeInput, AnalyzeStrategy};
pub use conditions::{ConditionsInput, ConditionsStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use matcher::{MatchInput, MatchStrategy};
pub use predict::{PredictInput, PredictStrategy};
pub use symptoms::{SymptomsInput, SymptomsStrategy};
pub use version::VersionStrategy;

/// Contract shared by all command strategies.
///
/// Each strategy declares its own input type, so parameters are passed
/// without runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Condition store for `--dataset`, or for the configured path.
fn open_store(dataset: Option<PathBuf>) -> anyhow::Result<Arc<ConditionStore>> {
    let path = match dataset {
        Some(path) => path,
        None => Config::load()?.dataset.path,
    };
    info!("Using dataset at {}", path.display());
    Ok(Arc::new(ConditionStore::new(path)))
}

fn build_provider(config: &Config) -> ZhipuProvider {
    let defaults = &config.agents.defaults;
    let provider = ZhipuProvider::new(config.providers.zhipu.api_key.clone())
        .with_generation(defaults.max_tokens, defaults.temperature);
    match &config.providers.zhipu.base_url {
        Some(base_url) => provider.with_base_url(base_url.clone()),
        None => provider,
    }
}
