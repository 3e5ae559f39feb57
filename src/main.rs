use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mentor_groups::loader::collect_inputs;
use mentor_groups::{
    AppConfig, GroupWriter, Manifest, MinSize, SheetSummary, WorkbookWriter, assemble,
    assign_files,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "mentor-groups")]
#[command(version, about = "Stratified mentoring group assignment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assign students from roster CSV files into mentoring groups
    Assign(AssignArgs),
}

#[derive(Args, Debug)]
struct AssignArgs {
    /// Roster CSV files or directories containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Maximum group members count
    #[arg(long)]
    group_size: Option<usize>,

    /// Minimum group members count (-1 merges all leftovers into one group)
    #[arg(long, allow_negative_numbers = true)]
    min_size: Option<i64>,

    /// Output archive name (".zip" is appended when missing)
    #[arg(short, long, default_value = "mentoring")]
    out: String,

    /// JSON config file with grouping, column and category settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Column holding the binary category
    #[arg(long)]
    category_column: Option<String>,

    /// Column holding the organizational unit
    #[arg(long)]
    unit_column: Option<String>,

    /// Column holding the optional cluster used for ordering
    #[arg(long)]
    cluster_column: Option<String>,

    /// Column holding the study program
    #[arg(long)]
    program_column: Option<String>,

    /// Print the sheet plan as JSON instead of writing the archive
    #[arg(long)]
    dry_run: bool,
}

impl AssignArgs {
    /// Config file values with CLI overrides applied
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;

        if let Some(size) = self.group_size {
            config.grouping.target_size = size;
        }
        if let Some(min) = self.min_size {
            config.grouping.min_size = MinSize::try_from(min)?;
        }
        if let Some(column) = &self.category_column {
            config.columns.category = column.clone();
        }
        if let Some(column) = &self.unit_column {
            config.columns.unit = column.clone();
        }
        if let Some(column) = &self.cluster_column {
            config.columns.cluster = column.clone();
        }
        if let Some(column) = &self.program_column {
            config.columns.program = column.clone();
        }

        config.grouping.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

fn run_assign(args: AssignArgs) -> Result<()> {
    let start = Instant::now();
    let config = args.resolve_config()?;

    info!(
        group_size = config.grouping.target_size,
        min_size = %config.grouping.min_size,
        "assigning mentoring groups"
    );

    let files = collect_inputs(&args.inputs)?;
    let output = assign_files(&config, &files)?;
    let sheets = assemble(output.assignment, config.grouping.min_size);

    if args.dry_run {
        let plan: Vec<SheetSummary> = sheets.iter().map(|s| s.summary()).collect();
        let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        println!("{}", json);
    } else {
        let manifest = Manifest::new(config.grouping, output.inputs);
        let mut writer = WorkbookWriter::new(WorkbookWriter::archive_path(&args.out), manifest);
        writer.write(&sheets)?;
        println!("{}", writer.output_path().display());
    }

    info!(
        sheets = sheets.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Assign(args) => run_assign(args),
    }
}
