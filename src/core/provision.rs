use crate::domain::model::{ProvisionOutcome, ReplLayout};
use crate::domain::ports::ArchiveFetcher;
use crate::utils::error::Result;
use tokio::sync::Mutex;

pub const VERSION_PLACEHOLDER: &str = "{{version}}";

pub fn render_download_url(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

/// 確保 REPL JAR 存在於本機。已存在的檔案不再驗證。
///
/// 同一個 provisioner 上的下載會互斥執行，避免連續觸發 refresh 時
/// 多個下載同時寫入同一個路徑。
pub struct ArchiveProvisioner<F: ArchiveFetcher> {
    layout: ReplLayout,
    fetcher: F,
    download_lock: Mutex<()>,
}

impl<F: ArchiveFetcher> ArchiveProvisioner<F> {
    pub fn new(layout: ReplLayout, fetcher: F) -> Self {
        Self {
            layout,
            fetcher,
            download_lock: Mutex::new(()),
        }
    }

    pub fn layout(&self) -> &ReplLayout {
        &self.layout
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn is_present(&self) -> bool {
        self.layout.jar_path().is_file()
    }

    pub async fn ensure_present(&self, url_template: &str) -> Result<ProvisionOutcome> {
        if self.is_present() {
            tracing::debug!("REPL JAR already present at {}", self.layout.jar_path().display());
            return Ok(ProvisionOutcome::AlreadyPresent);
        }

        let _guard = self.download_lock.lock().await;
        // 等鎖期間可能已經被別的任務下載完成
        if self.is_present() {
            return Ok(ProvisionOutcome::AlreadyPresent);
        }

        self.download_locked(url_template).await?;
        Ok(ProvisionOutcome::Downloaded)
    }

    /// 不管檔案在不在都重新下載
    pub async fn refresh(&self, url_template: &str) -> Result<()> {
        let _guard = self.download_lock.lock().await;
        self.download_locked(url_template).await
    }

    async fn download_locked(&self, url_template: &str) -> Result<()> {
        let repl_dir = self.layout.repl_dir();
        match tokio::fs::remove_dir_all(&repl_dir).await {
            Ok(()) => tracing::debug!("Removed previous REPL directory {}", repl_dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tokio::fs::create_dir_all(&repl_dir).await?;

        let url = render_download_url(url_template, self.layout.version());
        let jar_path = self.layout.jar_path();

        tracing::info!("⬇️ Downloading REPL JAR from: {}", url);
        self.fetcher.fetch(&url, &jar_path).await?;
        tracing::info!("✅ REPL JAR saved to {}", jar_path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ReplError;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex as StdMutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingFetcher {
        calls: StdMutex<Vec<(String, PathBuf)>>,
        fail: bool,
    }

    impl RecordingFetcher {
        fn failing() -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                fail: true,
            }
        }

        fn calls(&self) -> Vec<(String, PathBuf)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ArchiveFetcher for RecordingFetcher {
        async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), dest.to_path_buf()));
            if self.fail {
                return Err(ReplError::DownloadError {
                    url: url.to_string(),
                    reason: "HTTP 500".to_string(),
                });
            }
            tokio::fs::write(dest, b"PK\x03\x04").await?;
            Ok(())
        }
    }

    const TEMPLATE: &str = "https://host/{{version}}/repl.jar";

    #[test]
    fn test_render_download_url() {
        assert_eq!(
            render_download_url(TEMPLATE, "1.2.3"),
            "https://host/1.2.3/repl.jar"
        );
        assert_eq!(
            render_download_url("https://host/{{version}}/legend-repl-{{version}}.jar", "2.0.0"),
            "https://host/2.0.0/legend-repl-2.0.0.jar"
        );
    }

    #[tokio::test]
    async fn test_present_archive_is_not_fetched() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ReplLayout::new(temp_dir.path(), "1.2.3");
        std::fs::create_dir_all(layout.repl_dir()).unwrap();
        std::fs::write(layout.jar_path(), b"existing").unwrap();

        let provisioner = ArchiveProvisioner::new(layout, RecordingFetcher::default());
        let outcome = provisioner.ensure_present(TEMPLATE).await.unwrap();

        assert_eq!(outcome, ProvisionOutcome::AlreadyPresent);
        assert!(provisioner.fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_absent_archive_fetched_once_into_fresh_dir() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ReplLayout::new(temp_dir.path(), "1.2.3");
        std::fs::create_dir_all(layout.repl_dir()).unwrap();
        let stale = layout.repl_dir().join("legend-repl-1.0.0.jar");
        std::fs::write(&stale, b"old").unwrap();

        let provisioner = ArchiveProvisioner::new(layout.clone(), RecordingFetcher::default());
        let outcome = provisioner.ensure_present(TEMPLATE).await.unwrap();

        assert_eq!(outcome, ProvisionOutcome::Downloaded);
        assert_eq!(
            provisioner.fetcher.calls(),
            vec![("https://host/1.2.3/repl.jar".to_string(), layout.jar_path())]
        );
        assert!(!stale.exists());
        assert!(layout.jar_path().is_file());
    }

    #[tokio::test]
    async fn test_refresh_always_fetches() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ReplLayout::new(temp_dir.path(), "1.2.3");
        let provisioner = ArchiveProvisioner::new(layout, RecordingFetcher::default());

        provisioner.ensure_present(TEMPLATE).await.unwrap();
        provisioner.refresh(TEMPLATE).await.unwrap();
        provisioner.refresh(TEMPLATE).await.unwrap();

        assert_eq!(provisioner.fetcher.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ReplLayout::new(temp_dir.path(), "1.2.3");
        let provisioner = ArchiveProvisioner::new(layout, RecordingFetcher::failing());

        let result = provisioner.ensure_present(TEMPLATE).await;

        assert!(matches!(result, Err(ReplError::DownloadError { .. })));
        assert!(!provisioner.is_present());
    }

    #[tokio::test]
    async fn test_concurrent_ensure_downloads_once() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ReplLayout::new(temp_dir.path(), "1.2.3");
        let provisioner = ArchiveProvisioner::new(layout, RecordingFetcher::default());

        let (a, b) = tokio::join!(
            provisioner.ensure_present(TEMPLATE),
            provisioner.ensure_present(TEMPLATE)
        );

        let mut outcomes = vec![a.unwrap(), b.unwrap()];
        outcomes.sort_by_key(|o| *o == ProvisionOutcome::Downloaded);
        assert_eq!(
            outcomes,
            vec![ProvisionOutcome::AlreadyPresent, ProvisionOutcome::Downloaded]
        );
        assert_eq!(provisioner.fetcher.calls().len(), 1);
    }

    /// 記錄同時進行中的下載數量，每次下載中途讓出執行權
    #[derive(Default)]
    struct OverlapFetcher {
        active: std::sync::atomic::AtomicUsize,
        max_active: std::sync::atomic::AtomicUsize,
        calls: std::sync::atomic::AtomicUsize,
    }

    impl ArchiveFetcher for OverlapFetcher {
        async fn fetch(&self, _url: &str, dest: &Path) -> Result<()> {
            use std::sync::atomic::Ordering;

            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);

            tokio::task::yield_now().await;
            tokio::fs::write(dest, b"PK\x03\x04").await?;
            tokio::task::yield_now().await;

            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_do_not_overlap() {
        use std::sync::atomic::Ordering;

        let temp_dir = TempDir::new().unwrap();
        let layout = ReplLayout::new(temp_dir.path(), "1.2.3");
        let provisioner = ArchiveProvisioner::new(layout, OverlapFetcher::default());

        let (a, b) = tokio::join!(provisioner.refresh(TEMPLATE), provisioner.refresh(TEMPLATE));
        a.unwrap();
        b.unwrap();

        assert_eq!(provisioner.fetcher.calls.load(Ordering::SeqCst), 2);
        assert_eq!(provisioner.fetcher.max_active.load(Ordering::SeqCst), 1);
        assert!(provisioner.is_present());
    }

    #[tokio::test]
    async fn test_ensure_waiting_on_refresh_sees_archive() {
        use std::sync::atomic::Ordering;

        let temp_dir = TempDir::new().unwrap();
        let layout = ReplLayout::new(temp_dir.path(), "1.2.3");
        let provisioner = ArchiveProvisioner::new(layout, OverlapFetcher::default());

        // refresh 先拿到鎖；ensure_present 等待後應看到已下載的檔案
        let (refreshed, ensured) = tokio::join!(
            provisioner.refresh(TEMPLATE),
            provisioner.ensure_present(TEMPLATE)
        );
        refreshed.unwrap();

        assert_eq!(ensured.unwrap(), ProvisionOutcome::AlreadyPresent);
        assert_eq!(provisioner.fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(provisioner.fetcher.max_active.load(Ordering::SeqCst), 1);
    }
}
