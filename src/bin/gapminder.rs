use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use gapminder::{
    App, ChartConfig, Continent, ContinentFilter, Dataset, ExportOpts, ExportSession,
    FfmpegSink, FfmpegSinkOpts, FrameSink, Fps, Millis, PngSequenceSink, Rasterizer,
    RenderThreading, Script,
};

#[derive(Parser, Debug)]
#[command(name = "gapminder", version, about = "Animated Gapminder bubble chart")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one settled year as SVG or PNG.
    Frame(FrameArgs),
    /// Record a scripted session as a PNG sequence or an MP4 (MP4 requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print per-year dataset statistics as JSON.
    Summary(SummaryArgs),
}

#[derive(Parser, Debug)]
struct ChartArgs {
    /// Dataset JSON (array of year entries).
    #[arg(long, default_value = "data/data.json")]
    data: PathBuf,

    /// Optional chart config JSON; unset fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    chart: ChartArgs,

    /// Calendar year (clamped to the dataset).
    #[arg(long)]
    year: Option<u32>,

    /// Continent selector: `all`, `europe`, `asia`, `americas` or `africa`.
    #[arg(long, default_value = "all")]
    continent: ContinentFilter,

    /// Output path; `.png` rasterizes, anything else writes SVG.
    #[arg(long)]
    out: PathBuf,

    /// Print the number of font faces available to the rasterizer.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    chart: ChartArgs,

    /// Control script JSON; defaults to pressing play at time zero.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Session length in seconds; defaults to one full pass over every year.
    #[arg(long)]
    seconds: Option<f64>,

    /// Output frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output directory for a PNG sequence, or a `.mp4` file.
    #[arg(long)]
    out: PathBuf,

    /// Rasterize frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads when `--parallel` is set.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per rasterization chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Rasterize every frame even when it repeats the previous one.
    #[arg(long)]
    no_elision: bool,
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    chart: ChartArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Summary(args) => cmd_summary(args),
    }
}

fn load_chart(args: &ChartArgs) -> anyhow::Result<(Arc<Dataset>, ChartConfig)> {
    let config = match &args.config {
        Some(path) => ChartConfig::from_path(path)?,
        None => ChartConfig::default(),
    };
    let dataset = gapminder::load_path(&args.data, config.first_year)
        .with_context(|| format!("load dataset '{}'", args.data.display()))?;
    Ok((Arc::new(dataset), config))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (dataset, config) = load_chart(&args.chart)?;
    let first_year = u32::from(dataset.first_year());
    let mut app = App::new(dataset, config, Millis::ZERO)?;

    app.select_continent(args.continent, Millis::ZERO);
    app.seek(args.year.unwrap_or(first_year), Millis::ZERO);
    let doc = app.frame_document(app.settled_at());

    gapminder::encode::ensure_parent_dir(&args.out)?;
    if has_extension(&args.out, "png") {
        let rasterizer = Rasterizer::with_system_fonts();
        if args.dump_fonts {
            eprintln!("font_faces: {}", rasterizer.font_faces());
        }
        rasterizer.rasterize(&doc)?.save_png(&args.out)?;
    } else {
        std::fs::write(&args.out, doc)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    }

    eprintln!(
        "wrote {} (year {}, {} marks)",
        args.out.display(),
        app.calendar_year(),
        app.scene().len()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (dataset, config) = load_chart(&args.chart)?;
    let script = match &args.script {
        Some(path) => Script::from_path(path)?,
        None => Script::autoplay(),
    };

    let duration_ms = match args.seconds {
        Some(s) if s.is_finite() && s > 0.0 => (s * 1000.0).round() as u64,
        Some(s) => anyhow::bail!("--seconds must be positive, got {s}"),
        None => (dataset.len() as u64) * config.tick_ms + config.transition_ms,
    };

    let opts = ExportOpts {
        fps: Fps::new(args.fps, 1)?,
        duration_ms,
        threading: RenderThreading {
            parallel: args.parallel,
            chunk_size: args.chunk_size,
            threads: args.threads,
            static_frame_elision: !args.no_elision,
        },
    };

    let rasterizer = Rasterizer::with_system_fonts();
    let session = ExportSession::new(&rasterizer, opts)?;
    let mut app = App::new(dataset, config, Millis::ZERO)?;

    let mut sink: Box<dyn FrameSink> = if has_extension(&args.out, "mp4") {
        Box::new(FfmpegSink::new(FfmpegSinkOpts::new(&args.out)))
    } else {
        Box::new(PngSequenceSink::new(&args.out))
    };

    let stats = session.run(&mut app, &script, sink.as_mut())?;
    eprintln!(
        "wrote {} ({} frames, {} rasterized)",
        args.out.display(),
        stats.frames_total,
        stats.frames_rendered
    );
    Ok(())
}

#[derive(serde::Serialize)]
struct YearSummary {
    year: u32,
    countries: usize,
    continents: BTreeMap<Continent, usize>,
    income: Option<[f64; 2]>,
    life_exp: Option<[f64; 2]>,
    population: u64,
}

#[derive(serde::Serialize)]
struct Summary {
    stats: gapminder::LoadStats,
    years: Vec<YearSummary>,
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<[f64; 2]> {
    values.fold(None, |acc, v| match acc {
        None => Some([v, v]),
        Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
    })
}

fn cmd_summary(args: SummaryArgs) -> anyhow::Result<()> {
    let (dataset, _) = load_chart(&args.chart)?;

    let years = dataset
        .iter()
        .map(|snapshot| {
            let mut continents = BTreeMap::new();
            for r in snapshot.iter() {
                *continents.entry(r.continent).or_insert(0) += 1;
            }
            YearSummary {
                year: dataset.calendar_year(snapshot.index),
                countries: snapshot.len(),
                continents,
                income: min_max(snapshot.iter().map(|r| r.income)),
                life_exp: min_max(snapshot.iter().map(|r| r.life_exp)),
                population: snapshot.iter().map(|r| r.population).sum(),
            }
        })
        .collect();

    let summary = Summary {
        stats: dataset.stats(),
        years,
    };
    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &summary).context("write summary")?;
    println!();
    Ok(())
}
