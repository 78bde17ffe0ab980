//! Headless companion to the dashboard: runs the same pipeline and prints
//! the KPI snapshot, grouped summaries, and the analysis suite to stdout.

use clap::Parser;
use shipsight::application::kpi::Aggregator;
use shipsight::application::pipeline;
use shipsight::application::stats::StatisticsEngine;
use shipsight::config::Config;
use shipsight::domain::filter::{DimensionFilter, FilterSelection};
use shipsight::infrastructure::dataset::DatasetLoader;
use shipsight::infrastructure::mock::MockDataset;
use tracing::Level;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "report", version, about = "Order-fulfillment KPI report")]
struct Args {
    /// Dataset path; overrides SHIPSIGHT_DATASET.
    #[arg(long)]
    dataset: Option<std::path::PathBuf>,

    /// Use a seeded synthetic dataset instead of reading a file.
    #[arg(long, conflicts_with = "dataset")]
    mock: bool,

    /// Rows for --mock.
    #[arg(long, default_value_t = 5_000)]
    mock_rows: usize,

    /// Restrict to one region.
    #[arg(long)]
    region: Option<String>,

    /// Restrict to one product category.
    #[arg(long)]
    category: Option<String>,

    /// Restrict to one customer segment.
    #[arg(long)]
    segment: Option<String>,

    /// Emit the snapshot and test results as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn dimension(value: Option<String>) -> DimensionFilter {
    match value {
        Some(v) => DimensionFilter::Only(v),
        None => DimensionFilter::All,
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).compact();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with(stdout_layer)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(dataset) = args.dataset {
        config.dataset.path = dataset;
    }

    let raw = if args.mock {
        MockDataset::new(args.mock_rows, 42).generate()
    } else {
        DatasetLoader::new(&config.dataset).load(&config.dataset.path)?
    };

    let enriched = pipeline::build_enriched_table(&raw, &config.analytics)?;
    let test_results = StatisticsEngine::new(config.analytics.significance_level).run(&enriched);

    let filter = FilterSelection {
        region: dimension(args.region),
        category: dimension(args.category),
        segment: dimension(args.segment),
    };
    let (snapshot, summaries) = Aggregator::new(&config.analytics).aggregate(&enriched, &filter);

    if args.json {
        let payload = serde_json::json!({
            "filter": filter,
            "snapshot": snapshot,
            "summaries": summaries,
            "tests": test_results,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("== Filter ==");
    println!(
        "region: {} | category: {} | segment: {}",
        filter.region, filter.category, filter.segment
    );
    println!();
    println!("== KPIs ({} rows) ==", snapshot.rows);
    println!("total sales:        {:.2}", snapshot.total_sales);
    println!("total profit:       {:.2}", snapshot.total_profit);
    println!("avg lead time:      {} days", snapshot.avg_lead_time_days);
    println!("late deliveries:    {} %", snapshot.late_delivery_pct);
    println!("p90 lead time:      {} days", snapshot.p90_lead_time_days);
    println!("p90 quantity:       {}", snapshot.p90_quantity);
    match &snapshot.high_risk_corridor {
        Some(corridor) => println!(
            "high-risk corridor: {} / {} ({:.1} % late over {} orders)",
            corridor.region,
            corridor.segment,
            corridor.late_rate * 100.0,
            corridor.orders
        ),
        None => println!("high-risk corridor: N/A"),
    }
    println!("stockout risk:      {}", snapshot.stockout_risk);

    println!();
    println!("== Monthly trend ==");
    for row in &summaries.monthly_trend {
        println!(
            "month {:>2}: sales {:>12.2}  avg lead {:>5.2} d  orders {:>6}",
            row.month, row.total_sales, row.avg_lead_time, row.orders
        );
    }

    println!();
    println!("== Statistical analysis ==");
    for result in &test_results {
        println!("{:<35} {}", result.name, result.describe());
    }

    Ok(())
}
