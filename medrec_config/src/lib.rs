mod schema;

pub use schema::{AgentDefaults, AgentsConfig, Config, DatasetConfig, FallbackConfig, ProviderConfig, ProvidersConfig};
