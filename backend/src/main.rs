//! Regtrack CLI - vehicle registration workbooks to a quarterly dashboard
//!
//! # Main Commands
//!
//! ```bash
//! regtrack ingest data/              # Build master_Data.csv from data/<year>/*.xlsx
//! regtrack serve                     # Start the dashboard API (port 3000)
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! regtrack inspect data/2021/two_wheeler.xlsx   # Parse one workbook to JSON
//! regtrack classify "Four Wheeler.xlsx"         # Show inferred categories
//! regtrack query --category "Four Wheeler"      # Print a single view as JSON
//! ```

use clap::{Parser, Subcommand};
use regtrack::{
    classify_category, read_workbook, run_ingest, single_view, AppConfig, IngestOptions, MasterTable,
    ParseOptions, SingleQuery, VehicleCategory,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "regtrack")]
#[command(about = "Quarterly vehicle registration trends from yearly workbook exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full ingestion: <BASE>/<year>/*.xlsx → master table
    Ingest {
        /// Base directory (default: REGTRACK_DATA_DIR or ./data)
        base: Option<PathBuf>,

        /// Output master table (default: REGTRACK_MASTER_FILE or master_Data.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Absolute header row index in every sheet
        #[arg(long)]
        header_row: Option<usize>,
    },

    /// Parse one workbook and print its raw records as JSON
    Inspect {
        /// Workbook file
        workbook: PathBuf,

        /// Year of the workbook (default: parent directory name)
        #[arg(short, long)]
        year: Option<i32>,

        /// Absolute header row index
        #[arg(long)]
        header_row: Option<usize>,
    },

    /// Show the category inferred from workbook file names
    Classify {
        /// File names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print the single-maker view as JSON
    Query {
        /// Vehicle category label ("Two Wheeler", "Three Wheeler", "Four Wheeler")
        #[arg(short, long)]
        category: String,

        /// Maker (default: ALL_MAKERS)
        #[arg(short, long)]
        maker: Option<String>,

        /// First year (inclusive)
        #[arg(long)]
        from: Option<i32>,

        /// Last year (inclusive)
        #[arg(long)]
        to: Option<i32>,

        /// Include filtered rows
        #[arg(long)]
        raw: bool,

        /// Master table (default: REGTRACK_MASTER_FILE or master_Data.csv)
        #[arg(long)]
        master: Option<PathBuf>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: REGTRACK_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Master table (default: REGTRACK_MASTER_FILE or master_Data.csv)
        #[arg(long)]
        master: Option<PathBuf>,

        /// Built frontend directory to serve at /
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    let result = match cli.command {
        Commands::Ingest {
            base,
            output,
            header_row,
        } => cmd_ingest(&config, base, output, header_row),

        Commands::Inspect {
            workbook,
            year,
            header_row,
        } => cmd_inspect(&config, &workbook, year, header_row),

        Commands::Classify { names } => cmd_classify(&names),

        Commands::Query {
            category,
            maker,
            from,
            to,
            raw,
            master,
        } => cmd_query(&config, &category, maker, from, to, raw, master),

        Commands::Serve {
            port,
            master,
            static_dir,
        } => cmd_serve(config, port, master, static_dir).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_options(config: &AppConfig, header_row: Option<usize>) -> ParseOptions {
    ParseOptions {
        header_row: header_row.unwrap_or(config.header_row),
        ..ParseOptions::default()
    }
}

fn cmd_ingest(
    config: &AppConfig,
    base: Option<PathBuf>,
    output: Option<PathBuf>,
    header_row: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = IngestOptions {
        base_dir: base.unwrap_or_else(|| config.data_dir.clone()),
        output: output.unwrap_or_else(|| config.master_file.clone()),
        parse: parse_options(config, header_row),
    };
    eprintln!("📄 Ingesting: {}", options.base_dir.display());

    let report = run_ingest(&options)?;

    eprintln!("\n📊 Summary:");
    for file in &report.files {
        eprintln!(
            "   {} {:<14} {:>4} makers  {}",
            file.year,
            file.category.to_string(),
            file.makers,
            file.months.join(" ")
        );
    }
    eprintln!("   Maker rows:     {}", report.maker_rows);
    eprintln!("   Aggregate rows: {}", report.aggregate_rows);
    eprintln!("   💾 Saved to: {}", report.output.display());

    eprintln!("\n🔎 Preview:");
    for row in &report.preview {
        eprintln!(
            "   {:<14} {:<24} {} {:>12}",
            row.vehicle_category.to_string(),
            row.maker,
            row.year_quarter,
            row.registrations.map(|v| format!("{:.0}", v)).unwrap_or_default()
        );
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_inspect(
    config: &AppConfig,
    workbook: &Path,
    year: Option<i32>,
    header_row: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Inspecting: {}", workbook.display());

    let year = match year {
        Some(year) => year,
        None => workbook
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .and_then(|n| n.parse().ok())
            .ok_or("cannot infer the year from the parent directory; pass --year")?,
    };
    let name = workbook
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let category = classify_category(&name);

    let data = read_workbook(workbook, year, category, &parse_options(config, header_row))?;
    eprintln!("   Year: {}", data.year);
    eprintln!("   Category: {}", data.category);
    eprintln!(
        "   Months: {}",
        data.months.iter().map(|m| m.label()).collect::<Vec<_>>().join(", ")
    );
    eprintln!("✅ Parsed {} makers", data.records.len());

    println!("{}", serde_json::to_string_pretty(&data.records)?);
    Ok(())
}

fn cmd_classify(names: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    for name in names {
        println!("{}\t{}", classify_category(name), name);
    }
    Ok(())
}

fn cmd_query(
    config: &AppConfig,
    category: &str,
    maker: Option<String>,
    year_from: Option<i32>,
    year_to: Option<i32>,
    include_raw: bool,
    master: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let category = VehicleCategory::from_label(category)
        .ok_or_else(|| format!("unknown vehicle category: {}", category))?;
    let master = master.unwrap_or_else(|| config.master_file.clone());

    let table = MasterTable::load(&master)?;
    let view = single_view(
        &table,
        &SingleQuery {
            category,
            maker,
            year_from,
            year_to,
            include_raw,
        },
    );
    eprintln!("{}", view.caption);

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

async fn cmd_serve(
    mut config: AppConfig,
    port: Option<u16>,
    master: Option<PathBuf>,
    static_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(master) = master {
        config.master_file = master;
    }
    if static_dir.is_some() {
        config.static_dir = static_dir;
    }
    regtrack::server::start_server(&config).await?;
    Ok(())
}
