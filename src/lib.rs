pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::Command, CliConfig};

pub use crate::adapters::{http::HttpFetcher, launcher::ProcessLauncher};
pub use crate::config::toml_config::ReplSettings;
pub use crate::core::{
    extension::ReplExtension, port::OsPortAllocator, profile::build_terminal_profile,
    provision::ArchiveProvisioner,
};
pub use crate::domain::model::{ProfileInputs, ProvisionOutcome, ReplLayout, TerminalProfile};
pub use crate::domain::ports::ExtensionLifecycle;
pub use crate::utils::error::{ReplError, Result};
