use super::toml_config::ReplSettings;
use super::CliConfig;
use crate::domain::model::ReplLayout;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Provision the JAR if needed and start an interactive REPL session
    Launch,
    /// Force a fresh download of the REPL JAR
    Refresh,
    /// Print the terminal profile as JSON without launching
    Profile {
        #[arg(long)]
        pretty: bool,
    },
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Launch)
    }

    pub fn version(&self) -> String {
        self.repl_version
            .clone()
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
    }

    pub fn layout(&self) -> ReplLayout {
        let root = std::path::absolute(&self.extension_dir)
            .unwrap_or_else(|_| PathBuf::from(&self.extension_dir));
        ReplLayout::new(root, self.version())
    }

    /// 載入設定檔、套用命令列覆蓋並驗證
    pub fn load_settings(&self) -> Result<ReplSettings> {
        let mut settings = ReplSettings::from_file_or_default(&self.config)?;
        settings.apply_overrides(self.jar_download_url.clone(), self.ag_grid_license.clone());
        settings.validate()?;
        Ok(settings)
    }
}
