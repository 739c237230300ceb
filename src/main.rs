use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use chroma_probe_rs::logger::{self, error, info};
use chroma_probe_rs::probe_pipeline::{
    Anchor, CancellationToken, CsvTableWriter, DisplayCoord, LineProbe, LoggingProgress, NativeCoord,
    PointProbe, ProbeConfig, ProbeSession, RasterReader, TiffFrameSequence, TiffRasterReader,
};

#[derive(Parser)]
#[command(name = "chroma-probe")]
#[command(author, version, about = "Sample color profiles from images and frame sequences")]
#[command(long_about = "
Samples RGB/HSV along a line across an image, or the mean RGB around a point
across every frame of a sequence, and writes the result as CSV.

Examples:
  chroma-probe line photo.tif --start 10,20 --end 300,20
  chroma-probe line photo.tif --start 5,5 --end 120,80 --display -o line.csv
  chroma-probe profile frames/ --point 64,48 --region 7 -o profile.csv
  chroma-probe pick photo.tif --at 200,150 --display
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Args)]
struct ViewArgs {
    /// Interpret coordinates in viewport space instead of native pixels
    #[arg(long, global = true)]
    display: bool,

    /// Viewport width used with --display
    #[arg(long, global = true, default_value = "600")]
    viewport_width: u32,

    /// Viewport height used with --display
    #[arg(long, global = true, default_value = "400")]
    viewport_height: u32,

    /// Anchor the scaled raster at the top-left corner instead of centering it
    #[arg(long, global = true)]
    top_left: bool,

    /// Fixed decimals for floating-point columns
    #[arg(long, global = true)]
    precision: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample RGB/HSV along a line across a TIFF image
    Line(LineArgs),

    /// Average RGB around a point across a directory of TIFF frames
    Profile(ProfileArgs),

    /// Print the color under one point of a TIFF image
    Pick(PickArgs),
}

#[derive(Args)]
struct LineArgs {
    /// Input TIFF image
    input: PathBuf,

    /// Line start as X,Y
    #[arg(long, value_parser = parse_point)]
    start: (f64, f64),

    /// Line end as X,Y
    #[arg(long, value_parser = parse_point)]
    end: (f64, f64),

    /// Output CSV file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ProfileArgs {
    /// Directory of TIFF frames, ordered by file name
    input: PathBuf,

    /// Probe point as X,Y
    #[arg(long, value_parser = parse_point)]
    point: (f64, f64),

    /// Side of the square averaging window (odd)
    #[arg(short, long, default_value = "5")]
    region: u32,

    /// Output CSV file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PickArgs {
    /// Input TIFF image
    input: PathBuf,

    /// Point as X,Y
    #[arg(long, value_parser = parse_point)]
    at: (f64, f64),
}

fn parse_point(s: &str) -> std::result::Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad X '{}': {}", x, e))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad Y '{}': {}", y, e))?;
    Ok((x, y))
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = ProbeConfig::builder()
        .viewport(cli.view.viewport_width, cli.view.viewport_height)
        .anchor(if cli.view.top_left { Anchor::TopLeft } else { Anchor::Center })
        .float_precision(cli.view.precision)
        .build();
    let mut session = ProbeSession::new(config);

    match cli.command {
        Commands::Line(args) => run_line(&mut session, &cli.view, args),
        Commands::Profile(args) => run_profile(&mut session, &cli.view, args),
        Commands::Pick(args) => run_pick(&mut session, &cli.view, args),
    }
}

fn run_line(session: &mut ProbeSession<CsvTableWriter>, view: &ViewArgs, args: LineArgs) -> Result<()> {
    let raster = read_image(&args.input)?;
    session.load_raster(&raster)?;

    let probe = if view.display {
        session.line_probe_at(to_display(args.start), to_display(args.end))?
    } else {
        LineProbe::new(to_native(args.start)?, to_native(args.end)?)
    };

    info!("Sampling line {:?} -> {:?}", probe.start, probe.end);
    session.run_line(&raster, &probe)?;
    write_output(session, args.output.as_deref())
}

fn run_profile(session: &mut ProbeSession<CsvTableWriter>, view: &ViewArgs, args: ProfileArgs) -> Result<()> {
    let mut frames = TiffFrameSequence::open(&args.input)
        .with_context(|| format!("opening frames in {}", args.input.display()))?;
    session.load_frames(&frames)?;

    let probe = if view.display {
        session.point_probe_at(to_display(args.point), Some(args.region))?
    } else {
        PointProbe::new(to_native(args.point)?, args.region)?
    };

    let mut progress = LoggingProgress::new(session.config().progress_step_percent);
    session.run_profile(&mut frames, &probe, &mut progress, &CancellationToken::new())?;
    write_output(session, args.output.as_deref())
}

fn run_pick(session: &mut ProbeSession<CsvTableWriter>, view: &ViewArgs, args: PickArgs) -> Result<()> {
    let raster = read_image(&args.input)?;
    session.load_raster(&raster)?;

    let picked = if view.display {
        session.pick(&raster, to_display(args.at))?
    } else {
        session.pick_native(&raster, to_native(args.at)?)?
    };
    println!(
        "({}, {}) RGB({}, {}, {}) HSV({}, {}, {})",
        picked.coord.x, picked.coord.y, picked.rgb.r, picked.rgb.g, picked.rgb.b, picked.hsv.h, picked.hsv.s,
        picked.hsv.v
    );
    Ok(())
}

fn read_image(path: &Path) -> Result<chroma_probe_rs::probe_pipeline::RgbRaster> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    TiffRasterReader
        .read_raster(&bytes)
        .with_context(|| format!("decoding {}", path.display()))
}

fn write_output(session: &ProbeSession<CsvTableWriter>, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => session
            .export_to_file(path)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            session.export(&mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}

fn to_display((x, y): (f64, f64)) -> DisplayCoord {
    DisplayCoord::new(x, y)
}

fn to_native((x, y): (f64, f64)) -> Result<NativeCoord> {
    if x < 0.0 || y < 0.0 || x.fract() != 0.0 || y.fract() != 0.0 || x > u32::MAX as f64 || y > u32::MAX as f64 {
        bail!("native coordinates must be non-negative integers, got {},{}", x, y);
    }
    Ok(NativeCoord::new(x as u32, y as u32))
}
