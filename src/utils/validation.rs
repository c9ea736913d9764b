use crate::utils::error::{ReplError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 下載網址檢查；失敗一律歸類為下載錯誤，跟實際送出請求失敗的處理方式一致
pub fn validate_download_url(url_str: &str) -> Result<Url> {
    if url_str.trim().is_empty() {
        return Err(ReplError::DownloadError {
            url: url_str.to_string(),
            reason: "download URL is empty (is repl.jarDownloadUrl configured?)".to_string(),
        });
    }

    let url = Url::parse(url_str).map_err(|e| ReplError::DownloadError {
        url: url_str.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ReplError::DownloadError {
            url: url_str.to_string(),
            reason: format!("Unsupported URL scheme: {}", scheme),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReplError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
