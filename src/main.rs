use clap::Parser;
use promo_mailer::utils::{logger, validation::Validate};
use promo_mailer::{CliConfig, Command, LocalStorage, PromoEngine, PromoError, PromotionModel};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting promo-mailer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let engine = PromoEngine::new(LocalStorage::new(config.base_dir.clone()));

    if let Err(e) = run(&engine, config.command).await {
        tracing::error!("❌ {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e {
            PromoError::ValidationError { .. } => 2,
            _ => 1,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(engine: &PromoEngine<LocalStorage>, command: Command) -> promo_mailer::Result<()> {
    match command {
        Command::Init { output } => {
            engine.save_document(&PromotionModel::sample(), &output).await?;
            println!("✅ Starter promotion written to {}", output);
        }
        Command::Render {
            input,
            output,
            strict,
        } => {
            let model = engine.load(&input).await?;
            if let Err(e) = model.validate() {
                if strict {
                    return Err(e);
                }
                tracing::warn!("⚠️ Rendering anyway: {}", e.user_friendly_message());
            }
            engine.render_to(&model, &output).await?;
            println!("✅ Email HTML saved to: {}", output);
        }
        Command::Export { input, output } => {
            let model = engine.load(&input).await?;
            engine.export_csv(&model, &output).await?;
            println!("✅ CSV exported to: {}", output);
        }
        Command::Import { input, output } => {
            let model = engine.load(&input).await?;
            engine.save_document(&model, &output).await?;
            println!("✅ Promotion data imported successfully into {}", output);
        }
        Command::Check { input } => {
            let model = engine.load(&input).await?;
            model.validate()?;
            println!("✅ {} looks good ({} product(s))", input, model.products.len());
        }
    }

    Ok(())
}
