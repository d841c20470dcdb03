pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod modules;
pub mod providers;
pub mod stacks;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::StackConfig;

pub use adapters::LocalStorage;
pub use self::core::{app::App, patch::Patch, stack::TerraformStack};
pub use stacks::BlogStack;
pub use utils::error::{Result, StackError};
