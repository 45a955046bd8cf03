use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "barrace", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the sorted list of years.
    Years(InputArgs),
    /// Print the stable top-N rows of one year.
    Slice(SliceArgs),
    /// Print the full year -> rows table.
    Table(TableArgs),
    /// Print the tween frames between two years.
    Tween(TweenArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input population JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SliceArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Year to print.
    #[arg(long)]
    year: i64,

    /// Rows per year.
    #[arg(long, default_value_t = barrace::DEFAULT_WINDOW)]
    window: usize,
}

#[derive(Parser, Debug)]
struct TableArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Rows per year.
    #[arg(long, default_value_t = barrace::DEFAULT_WINDOW)]
    window: usize,
}

#[derive(Parser, Debug)]
struct TweenArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Year shown before the transition.
    #[arg(long)]
    from: i64,

    /// Year selected for the transition.
    #[arg(long)]
    to: i64,

    /// Rows per year.
    #[arg(long, default_value_t = barrace::DEFAULT_WINDOW)]
    window: usize,

    /// Transition length in milliseconds.
    #[arg(long, default_value_t = barrace::DEFAULT_TWEEN_MS)]
    duration_ms: u64,

    /// Frames per second to sample at.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Skip interpolation and emit only the final frame.
    #[arg(long, default_value_t = false)]
    reduced_motion: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Years(args) => cmd_years(args),
        Command::Slice(args) => cmd_slice(args),
        Command::Table(args) => cmd_table(args),
        Command::Tween(args) => cmd_tween(args),
    }
}

fn load(args: &InputArgs, window: usize) -> anyhow::Result<Arc<barrace::Dataset>> {
    let blocks = barrace::load_from_path(&args.in_path)
        .with_context(|| format!("load '{}'", args.in_path.display()))?;
    let cache = barrace::DatasetCache::with_blocks(window, blocks);
    Ok(Arc::clone(cache.get()))
}

fn print_json<T: serde::Serialize>(v: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, v).context("write JSON to stdout")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_years(args: InputArgs) -> anyhow::Result<()> {
    let ds = load(&args, barrace::DEFAULT_WINDOW)?;
    print_json(&ds.years())
}

fn cmd_slice(args: SliceArgs) -> anyhow::Result<()> {
    let ds = load(&args.input, args.window)?;
    print_json(&ds.rows(args.year))
}

fn cmd_table(args: TableArgs) -> anyhow::Result<()> {
    let ds = load(&args.input, args.window)?;
    print_json(&serde_json::json!({
        "years": ds.years(),
        "max_pop": ds.max_pop(),
        "rows": ds.all_rows(),
    }))
}

fn cmd_tween(args: TweenArgs) -> anyhow::Result<()> {
    let opts = barrace::ChartOpts {
        window: args.window,
        tween_ms: args.duration_ms,
        fps: args.fps,
        reduced_motion: args.reduced_motion,
    };
    opts.validate()?;
    let ds = load(&args.input, opts.window)?;

    let mut session = barrace::ChartSession::new(ds, opts.clone())?;
    let t0 = std::time::Instant::now();
    session.select_year(args.from, t0);
    session.frame_at(t0 + opts.tween_duration());

    let Some((generation, tween)) = session.select_year(args.to, t0 + opts.tween_duration())
    else {
        return print_json(&Vec::<Vec<barrace::CountryRow>>::new());
    };
    tracing::debug!(generation, year = ?session.year(), "tween");

    // Under reduced motion the tween has zero length and samples to its final frame only.
    print_json(&tween.sample_frames(opts.fps))
}
