use crate::domain::model::{ProvisionOutcome, TerminalProfile};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// 把遠端檔案抓到本機指定路徑
pub trait ArchiveFetcher: Send + Sync {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 向作業系統要一個目前沒被佔用的本機埠；拿不到時回傳 None
pub trait PortAllocator: Send + Sync {
    fn allocate(&self) -> Option<u16>;
}

pub trait ConfigProvider: Send + Sync {
    /// 含 `{{version}}` 佔位符的下載網址樣板
    fn jar_download_url(&self) -> &str;
    fn ag_grid_license(&self) -> Option<&str>;
}

/// 宿主生命週期：啟用、重新下載指令、開啟終端機
#[async_trait]
pub trait ExtensionLifecycle: Send + Sync {
    async fn on_activate(&self) -> Result<ProvisionOutcome>;
    async fn on_refresh_command(&self) -> Result<()>;
    fn on_profile_requested(&self) -> TerminalProfile;

    fn on_deactivate(&self) {}
}
