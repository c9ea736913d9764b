use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const REPL_DIR: &str = "repl";
pub const EXAMPLE_DATA_PATH: &str = "data/sport.csv";

/// 終端機啟動描述：宿主依此開啟一個互動式 REPL 工作階段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalProfile {
    pub name: String,
    pub shell_path: String,
    pub shell_args: Vec<String>,
    pub message: String,
    pub icon: String,
}

/// 由擴充根目錄與版本推導出的固定路徑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplLayout {
    root: PathBuf,
    version: String,
}

impl ReplLayout {
    pub fn new(root: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 相對於擴充根目錄的絕對路徑
    pub fn as_absolute_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn repl_dir(&self) -> PathBuf {
        self.as_absolute_path(REPL_DIR)
    }

    pub fn jar_file_name(&self) -> String {
        format!("legend-repl-{}.jar", self.version)
    }

    pub fn jar_path(&self) -> PathBuf {
        self.repl_dir().join(self.jar_file_name())
    }

    pub fn example_data_path(&self) -> PathBuf {
        self.as_absolute_path(EXAMPLE_DATA_PATH)
    }
}

/// 組裝啟動參數所需的全部輸入；profile 建構是純函式，不讀環境也不碰檔案系統
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInputs {
    pub port: u16,
    pub archive_path: PathBuf,
    pub example_data_path: PathBuf,
    pub proxy_uri: Option<String>,
    pub grid_license: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    AlreadyPresent,
    Downloaded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths_are_derived_from_version() {
        let layout = ReplLayout::new("/opt/ext", "1.2.3");

        assert_eq!(layout.repl_dir(), PathBuf::from("/opt/ext/repl"));
        assert_eq!(
            layout.jar_path(),
            PathBuf::from("/opt/ext/repl/legend-repl-1.2.3.jar")
        );
        assert_eq!(
            layout.example_data_path(),
            PathBuf::from("/opt/ext/data/sport.csv")
        );
    }

    #[test]
    fn test_profile_serializes_to_json() {
        let profile = TerminalProfile {
            name: "Legend REPL".to_string(),
            shell_path: "java".to_string(),
            shell_args: vec!["-jar".to_string(), "repl.jar".to_string()],
            message: "hi".to_string(),
            icon: "repl".to_string(),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["shell_path"], "java");
        assert_eq!(json["shell_args"][0], "-jar");
    }
}
