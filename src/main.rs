// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use market_intel::config::DEFAULT_CONFIG_FILE;
use market_intel::{load_dataset, Dashboard, DashboardConfig, VERSION};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = DashboardConfig::load_or_default(&config_path)?;

    if args.len() > 1 && args[1] == "summary" {
        run_summary(config)?;
    } else {
        // UI mode (default)
        run_ui_mode(config)?;
    }

    Ok(())
}

/// Logs go to stderr so they never tear the terminal UI
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("market_intel=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print the priority ranking without opening the dashboard
fn run_summary(config: DashboardConfig) -> Result<()> {
    println!("📊 Market Intelligence v{} - Competitor Summary", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n📂 Loading {}...", config.data_path.display());
    let mut dashboard = Dashboard::new(config.clone());
    dashboard.load_now(load_dataset(&config.data_path));

    let Some(summary) = dashboard.summary_view() else {
        return Ok(());
    };

    if summary.total_categories == 0 {
        println!("⚠️  No competitor data found");
        return Ok(());
    }

    println!(
        "✓ {} competitors across {} categories\n",
        summary.total_competitors, summary.total_categories
    );

    for table in &summary.tables {
        let mean = table
            .mean_similarity
            .map(|m| format!("{:.3}", m))
            .unwrap_or_else(|| "n/a".to_string());
        println!("#{} {}  (avg similarity {})", table.priority, table.category, mean);
        for row in &table.rows {
            println!(
                "   {:>3}. {:<40} {:<14} {:<8} {}",
                row.rank, row.school_name, row.state, row.similarity, row.acceptance_rate
            );
        }
        println!();
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: DashboardConfig) -> Result<()> {
    println!("🖥️  Loading Market Intelligence Dashboard v{}...\n", VERSION);

    if !config.data_path.exists() {
        eprintln!("⚠️  Competitor data not found at {}", config.data_path.display());
        eprintln!("   The dashboard will open with an empty dataset.");
    }

    let mut app = ui::App::new(config);
    ui::run_ui(&mut app)?;

    println!("\n✅ Dashboard closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: DashboardConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the JSON API: cargo run --bin market-intel-server --features server");
    std::process::exit(1);
}
