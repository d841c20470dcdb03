#[cfg(feature = "cli")]
pub mod cli;
pub mod stack_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use stack_config::{ProviderConfig, ServiceConfig, StackConfig, SynthConfig};
