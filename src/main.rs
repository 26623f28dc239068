use clap::Parser;
use profile_guard::core::ConfigProvider;
use profile_guard::utils::error::{ErrorSeverity, GuardError};
use profile_guard::utils::{logger, validation::Validate};
use profile_guard::{
    AnalysisEngine, CliConfig, GuardConfig, HistoryStore, HttpBioFetcher, LocalStorage,
    OutboxNotifier, PipelineSettings, ProfilePipeline, StaticBreachLookup,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting profile-guard");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

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

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), GuardError> {
    let config = cli.resolve()?;
    let engine = build_engine(&config)?;

    if cli.history {
        let records = engine.history().await?;
        if records.is_empty() {
            println!("No analyses stored in {}", config.output_path());
        }
        for record in records {
            println!(
                "#{} {} @{} {} breaches={} secure={}{}",
                record.id,
                record.created_at.format("%Y-%m-%d %H:%M:%S"),
                record.handle,
                record.email,
                record.breach_count,
                if record.is_secure { "Yes" } else { "No" },
                if record.degraded { " (degraded)" } else { "" }
            );
        }
        return Ok(());
    }

    let (email, url) = cli.analysis_target()?;
    let done = engine.analyze_profile(url, email).await?;

    println!("✅ Analysis #{} completed", done.record.id);
    println!("Username: @{}", done.result.handle());
    println!("Bio Scan Result: {}", done.result.bio_status().description());
    println!(
        "Account Secure: {}",
        done.result.security_verdict().as_yes_no()
    );
    println!("2FA Recommendation: {}", done.result.advisory());
    if done.result.is_degraded() {
        println!("⚠️ Some checks could not be completed; the verdict may be optimistic.");
    }

    Ok(())
}

type Engine = AnalysisEngine<
    HttpBioFetcher,
    StaticBreachLookup,
    LocalStorage,
    OutboxNotifier<LocalStorage>,
>;

fn build_engine(config: &GuardConfig) -> Result<Engine, GuardError> {
    let storage = LocalStorage::new(config.output_path().to_string());
    let fetcher = HttpBioFetcher::from_config(config)?;
    let pipeline = ProfilePipeline::new(
        fetcher,
        StaticBreachLookup::default(),
        PipelineSettings::from_config(config),
    );
    let notifier = OutboxNotifier::new(storage.clone(), config.sender_address());

    Ok(AnalysisEngine::new(
        pipeline,
        HistoryStore::new(storage),
        notifier,
    ))
}
