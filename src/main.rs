use clap::Parser;
use legend_repl_launcher::core::extension::proxy_uri_from_env;
use legend_repl_launcher::utils::error::{ErrorSeverity, ReplError};
use legend_repl_launcher::utils::logger;
use legend_repl_launcher::{
    CliConfig, Command, ExtensionLifecycle, HttpFetcher, OsPortAllocator, ProcessLauncher,
    ReplExtension,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    let code = match run(&config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            exit_code_for(&e)
        }
    };

    std::process::exit(code);
}

async fn run(config: &CliConfig) -> Result<i32, ReplError> {
    let settings = config.load_settings()?;
    let extension = ReplExtension::new(
        config.layout(),
        HttpFetcher::new(),
        OsPortAllocator,
        settings,
    )
    .with_proxy_uri(proxy_uri_from_env());

    let code = match config.command() {
        Command::Refresh => {
            extension.on_refresh_command().await?;
            println!("✅ REPL JAR refreshed: {}", extension.layout().jar_path().display());
            0
        }
        Command::Profile { pretty } => {
            extension.on_activate().await?;
            let profile = extension.on_profile_requested();
            let json = if pretty {
                serde_json::to_string_pretty(&profile)?
            } else {
                serde_json::to_string(&profile)?
            };
            println!("{}", json);
            0
        }
        Command::Launch => {
            extension.on_activate().await?;
            let profile = extension.on_profile_requested();
            let status = ProcessLauncher.launch(&profile).await?;
            status.code().unwrap_or(1)
        }
    };

    extension.on_deactivate();
    Ok(code)
}

fn exit_code_for(e: &ReplError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
