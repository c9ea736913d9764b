use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReplError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplSettings {
    #[serde(default)]
    pub repl: ReplSection,
}

/// 對應宿主設定中的 `repl.*` 鍵
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplSection {
    #[serde(default)]
    pub jar_download_url: String,
    pub ag_grid_license: Option<String>,
}

impl ReplSettings {
    pub fn new(jar_download_url: impl Into<String>, ag_grid_license: Option<&str>) -> Self {
        Self {
            repl: ReplSection {
                jar_download_url: jar_download_url.into(),
                ag_grid_license: ag_grid_license.map(str::to_string),
            },
        }
    }

    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時回傳預設值；其他讀取或解析錯誤照常回報
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "Config file {} not found, using defaults",
                    path.as_ref().display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ReplError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AG_GRID_LICENSE})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 命令列參數優先於檔案設定
    pub fn apply_overrides(
        &mut self,
        jar_download_url: Option<String>,
        ag_grid_license: Option<String>,
    ) {
        if let Some(url) = jar_download_url {
            tracing::debug!("🔧 repl.jarDownloadUrl overridden to: {}", url);
            self.repl.jar_download_url = url;
        }
        if let Some(license) = ag_grid_license {
            tracing::debug!("🔧 repl.agGridLicense overridden from command line");
            self.repl.ag_grid_license = Some(license);
        }
    }
}

impl ConfigProvider for ReplSettings {
    fn jar_download_url(&self) -> &str {
        &self.repl.jar_download_url
    }

    fn ag_grid_license(&self) -> Option<&str> {
        self.repl.ag_grid_license.as_deref().filter(|l| !l.is_empty())
    }
}

impl Validate for ReplSettings {
    fn validate(&self) -> Result<()> {
        // 空字串視同未設定；只擋全是空白的授權碼
        if let Some(license) = self.repl.ag_grid_license.as_deref() {
            if !license.is_empty() {
                validate_non_empty_string("repl.agGridLicense", license)?;
            }
        }
        Ok(())
    }
}
