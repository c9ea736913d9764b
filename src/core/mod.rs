pub mod extension;
pub mod port;
pub mod profile;
pub mod provision;

pub use crate::domain::model::{ProfileInputs, ProvisionOutcome, ReplLayout, TerminalProfile};
pub use crate::domain::ports::{ArchiveFetcher, ConfigProvider, ExtensionLifecycle, PortAllocator};
pub use crate::utils::error::Result;
