use crate::domain::ports::ArchiveFetcher;
use crate::utils::error::{ReplError, Result};
use crate::utils::validation::validate_download_url;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

const PROGRESS_STEP_BYTES: u64 = 8 * 1024 * 1024;

/// 以 HTTP(S) 下載檔案，會跟隨轉址
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

impl ArchiveFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let parsed = validate_download_url(url)?;

        tracing::debug!("Making download request to: {}", parsed);
        let mut response = self.client.get(parsed).send().await?;
        tracing::debug!("Download response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ReplError::DownloadError {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let total = response.content_length();
        let part = partial_path(dest);
        let mut file = tokio::fs::File::create(&part).await?;
        let mut written: u64 = 0;
        let mut next_report = PROGRESS_STEP_BYTES;

        let streamed: Result<()> = async {
            while let Some(chunk) = response.chunk().await? {
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
                if written >= next_report {
                    match total {
                        Some(total) if total > 0 => tracing::debug!(
                            "Downloaded {} / {} bytes ({}%)",
                            written,
                            total,
                            written * 100 / total
                        ),
                        _ => tracing::debug!("Downloaded {} bytes", written),
                    }
                    next_report += PROGRESS_STEP_BYTES;
                }
            }
            file.flush().await?;
            Ok::<(), ReplError>(())
        }
        .await;

        if let Err(e) = streamed {
            drop(file);
            let _ = tokio::fs::remove_file(&part).await;
            return Err(e);
        }
        drop(file);

        tokio::fs::rename(&part, dest).await?;
        tracing::debug!("Downloaded {} bytes to {}", written, dest.display());
        Ok(())
    }
}
