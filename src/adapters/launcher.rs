use crate::domain::model::TerminalProfile;
use crate::utils::error::{ReplError, Result};
use std::io::Write;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// 在目前的終端機執行 profile：先印出介紹訊息，再以繼承的 stdio 啟動子程序
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn command(profile: &TerminalProfile) -> Command {
        let mut command = Command::new(&profile.shell_path);
        command
            .args(&profile.shell_args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }

    pub async fn launch(&self, profile: &TerminalProfile) -> Result<ExitStatus> {
        let mut stdout = std::io::stdout();
        stdout.write_all(profile.message.as_bytes())?;
        stdout.flush()?;

        tracing::debug!("Spawning {} {:?}", profile.shell_path, profile.shell_args);
        let mut child = Self::command(profile)
            .spawn()
            .map_err(|e| ReplError::LaunchError {
                program: profile.shell_path.clone(),
                message: e.to_string(),
            })?;

        let status = child.wait().await?;
        tracing::info!("{} exited with {}", profile.name, status);
        Ok(status)
    }
}
