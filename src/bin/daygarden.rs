use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "daygarden", version)]
struct Cli {
    /// Log debug details (message scheduling, grid exhaustion) to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out the garden and print placements as JSON.
    Layout(LayoutArgs),
    /// Print an ASCII preview of a text mask.
    Mask(MaskArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Garden config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Number of days to lay out. Defaults to the days elapsed up to `--today`.
    #[arg(long, allow_negative_numbers = true, conflicts_with = "today")]
    days: Option<i64>,

    /// Date to count elapsed days up to (YYYY-MM-DD). Defaults to the local date.
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print counts and visible species instead of every placement.
    #[arg(long, default_value_t = false)]
    summary: bool,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Text line; repeat for more lines.
    #[arg(long = "text", required = true)]
    lines: Vec<String>,

    /// Columns between glyphs.
    #[arg(long, default_value_t = 1)]
    char_spacing: usize,

    /// Rows between lines.
    #[arg(long, default_value_t = 2)]
    line_spacing: usize,

    /// Horizontal pixel magnification.
    #[arg(long, default_value_t = 1)]
    scale_x: usize,

    /// Vertical pixel magnification.
    #[arg(long, default_value_t = 1)]
    scale_y: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Mask(args) => cmd_mask(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let config = daygarden::GardenConfig::from_path(&args.config)?;
    config
        .validate()
        .with_context(|| format!("validate '{}'", args.config.display()))?;
    let catalog = config.variant_catalog()?;
    let opts = config.options();

    let count = match args.days {
        Some(days) => days,
        None => {
            let today = args.today.unwrap_or_else(daygarden::today_local);
            daygarden::days_elapsed(config.start_date, today)
        }
    };

    let placements = daygarden::generate_garden(count, &config.messages, &catalog, &opts);
    let json = if args.summary {
        serde_json::to_string_pretty(&daygarden::GardenSummary::from_placements(&placements))
    } else {
        serde_json::to_string_pretty(&placements)
    }
    .map_err(|e| daygarden::GardenError::serde(format!("encode placements: {e}")))?;

    match &args.out {
        Some(path) => {
            write_output(path, &json)?;
            eprintln!("wrote {} ({} placements)", path.display(), placements.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write placements to stdout")?;
        }
    }
    Ok(())
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let opts = daygarden::MaskOptions {
        char_spacing: args.char_spacing,
        line_spacing: args.line_spacing,
        pixel_scale_x: args.scale_x,
        pixel_scale_y: args.scale_y,
    };
    let glyphs = daygarden::GlyphTable::default();
    for line in &args.lines {
        for ch in line.chars().filter(|&c| c != ' ' && !glyphs.contains(c)) {
            tracing::warn!(%ch, "no glyph; rendering as a space");
        }
    }

    let mask = daygarden::build_text_mask(&args.lines, &opts, &glyphs);
    print!("{}", mask.to_ascii());
    eprintln!(
        "{}x{} cells, {} lit, {} letters",
        mask.cols(),
        mask.rows(),
        mask.on_count(),
        mask.letter_meta().len()
    );
    Ok(())
}

fn write_output(path: &Path, json: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("write json '{}'", path.display()))
}
