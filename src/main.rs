use blog_stack::utils::{logger, validation::Validate};
use blog_stack::{BlogStack, CliConfig, StackConfig, StackError};
use clap::Parser;

async fn run(args: &CliConfig) -> Result<(), StackError> {
    tracing::info!("📁 Loading configuration from: {}", args.config);
    let mut config = StackConfig::from_file(&args.config)?;
    config.apply_cli(args);

    config.validate()?;
    tracing::debug!("Stack config: {:?}", config);

    let output = BlogStack::synthesize(&config, args.dry_run).await?;
    if args.dry_run {
        println!("{}", output.document);
        return Ok(());
    }

    tracing::info!(replacements = output.replacements, "✅ Synthesis completed");
    println!("✅ Synthesized stack '{}'", config.environment);
    println!("📁 Output saved to: {}", output.path);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting blog-stack synthesis");

    if let Err(e) = run(&args).await {
        let category = e.category();
        let exit_code = e.exit_code();
        let suggestion = e.recovery_suggestion();
        let message = e.user_friendly_message();

        // `{:#}` renders the whole source chain on one line.
        let report = anyhow::Error::new(e);
        tracing::error!("❌ Synthesis failed: {:#} (Category: {:?})", report, category);
        tracing::error!("💡 Recovery suggestion: {}", suggestion);

        eprintln!("❌ {}", message);
        eprintln!("💡 {}", suggestion);
        std::process::exit(exit_code);
    }

    Ok(())
}
