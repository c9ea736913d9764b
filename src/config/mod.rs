#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "legend-repl")]
#[command(about = "Download the Legend REPL JAR and launch it in this terminal")]
pub struct CliConfig {
    /// Path to the TOML settings file
    #[arg(short, long, global = true, default_value = "legend-repl.toml")]
    pub config: String,

    /// Directory holding repl/ and data/
    #[arg(long, global = true, default_value = ".")]
    pub extension_dir: String,

    /// REPL version to provision (defaults to this launcher's version)
    #[arg(long, global = true)]
    pub repl_version: Option<String>,

    /// Override repl.jarDownloadUrl
    #[arg(long, global = true)]
    pub jar_download_url: Option<String>,

    /// Override repl.agGridLicense
    #[arg(long, global = true)]
    pub ag_grid_license: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<cli::Command>,
}
