use crate::core::port::resolve_port;
use crate::core::profile::build_terminal_profile;
use crate::core::provision::ArchiveProvisioner;
use crate::domain::model::{ProfileInputs, ProvisionOutcome, ReplLayout, TerminalProfile};
use crate::domain::ports::{ArchiveFetcher, ConfigProvider, ExtensionLifecycle, PortAllocator};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::OnceLock;

/// 代理基底網址的環境變數，值中的 `{{port}}` 會換成實際的埠
pub const PROXY_URI_ENV: &str = "VSCODE_PROXY_URI";

pub fn proxy_uri_from_env() -> Option<String> {
    std::env::var(PROXY_URI_ENV).ok()
}

pub struct ReplExtension<F: ArchiveFetcher, P: PortAllocator, C: ConfigProvider> {
    provisioner: ArchiveProvisioner<F>,
    ports: P,
    config: C,
    proxy_uri: Option<String>,
    port: OnceLock<u16>,
}

impl<F: ArchiveFetcher, P: PortAllocator, C: ConfigProvider> ReplExtension<F, P, C> {
    pub fn new(layout: ReplLayout, fetcher: F, ports: P, config: C) -> Self {
        Self {
            provisioner: ArchiveProvisioner::new(layout, fetcher),
            ports,
            config,
            proxy_uri: None,
            port: OnceLock::new(),
        }
    }

    pub fn with_proxy_uri(mut self, proxy_uri: Option<String>) -> Self {
        self.proxy_uri = proxy_uri;
        self
    }

    pub fn layout(&self) -> &ReplLayout {
        self.provisioner.layout()
    }

    /// 第一次呼叫時決定，之後固定不變
    pub fn port(&self) -> u16 {
        *self.port.get_or_init(|| resolve_port(&self.ports))
    }

    pub fn profile_inputs(&self) -> ProfileInputs {
        let layout = self.layout();
        ProfileInputs {
            port: self.port(),
            archive_path: layout.jar_path(),
            example_data_path: layout.example_data_path(),
            proxy_uri: self.proxy_uri.clone(),
            grid_license: self.config.ag_grid_license().map(str::to_string),
        }
    }
}

#[async_trait]
impl<F: ArchiveFetcher, P: PortAllocator, C: ConfigProvider> ExtensionLifecycle
    for ReplExtension<F, P, C>
{
    async fn on_activate(&self) -> Result<ProvisionOutcome> {
        tracing::info!("🚀 Activating Legend REPL {}", self.layout().version());

        let outcome = self
            .provisioner
            .ensure_present(self.config.jar_download_url())
            .await?;

        let port = self.port();
        tracing::info!("🔌 REPL dev port: {}", port);
        Ok(outcome)
    }

    async fn on_refresh_command(&self) -> Result<()> {
        tracing::info!("🔄 Re-downloading REPL JAR");
        self.provisioner
            .refresh(self.config.jar_download_url())
            .await
    }

    fn on_profile_requested(&self) -> TerminalProfile {
        build_terminal_profile(&self.profile_inputs())
    }
}
