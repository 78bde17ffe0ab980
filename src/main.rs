use clap::Parser;
use shipsight::application::kpi::Aggregator;
use shipsight::application::pipeline;
use shipsight::application::stats::StatisticsEngine;
use shipsight::config::Config;
use shipsight::infrastructure::dataset::DatasetLoader;
use shipsight::interfaces::ui::DashboardApp;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

/// Interactive analytics dashboard over an order-fulfillment export.
#[derive(Parser, Debug)]
#[command(name = "shipsight", version)]
struct Args {
    /// Dataset path; overrides SHIPSIGHT_DATASET.
    #[arg(long)]
    dataset: Option<std::path::PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(dataset) = args.dataset {
        config.dataset.path = dataset;
    }

    info!("Loading dataset from {}", config.dataset.path.display());
    let raw = DatasetLoader::new(&config.dataset).load(&config.dataset.path)?;
    let enriched = pipeline::build_enriched_table(&raw, &config.analytics)?;

    let engine = StatisticsEngine::new(config.analytics.significance_level);
    let test_results = engine.run(&enriched);

    let aggregator = Aggregator::new(&config.analytics);
    let app = DashboardApp::new(enriched, aggregator, test_results);

    info!("Pipeline ready. Launching dashboard.");
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("Shipsight"),
        ..Default::default()
    };
    eframe::run_native(
        "Shipsight",
        native_options,
        Box::new(|cc| {
            shipsight::interfaces::ui::apply_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
