use clap::Parser;
use farmtech::core::ConfigProvider;
use farmtech::utils::error::ErrorSeverity;
use farmtech::utils::logger;
use farmtech::{CliConfig, CsvPersistence, Farm, FarmConfig, LocalStorage, Session, TerminalConsole};

fn main() {
    let cli = CliConfig::parse();

    // Logs go to stderr; stdout belongs to the menu.
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting farmtech");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ farmtech failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(config: &FarmConfig) -> farmtech::Result<()> {
    tracing::info!("📁 Data directory: {}", config.data_dir());

    let storage = LocalStorage::new(config.data_dir());
    let farm = Farm::open(CsvPersistence::from_config(storage, config))?;

    let mut session = Session::with_config(TerminalConsole::stdio(), farm, config);
    session.run()
}
