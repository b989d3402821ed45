use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use surfacefx::{
    BlitBounds, BlitOpts, BlitParams, ImageResampler, Rect, ResampleFilter, Surface as _,
    SurfaceFx as _,
};

#[derive(Parser, Debug)]
#[command(name = "surfacefx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blur an image, or only the edge band of a rectangle.
    Blur(BlurArgs),
    /// Convert a premultiplied-alpha image to straight alpha.
    Demultiply(DemultiplyArgs),
    /// Resample an image and composite it onto another.
    Draw(DrawArgs),
}

#[derive(Parser, Debug)]
struct BlurArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image; format follows the extension.
    #[arg(long)]
    out: PathBuf,

    /// Gaussian standard deviation in pixels. Clamped to what the blurred region can hold.
    #[arg(long)]
    sigma: f64,

    /// Only blur pixels within this many pixels of the region's edges.
    #[arg(long)]
    band: Option<u32>,

    /// Region to blur as `x1,y1,x2,y2` (half-open). Defaults to the whole image.
    #[arg(long, value_parser = parse_rect)]
    rect: Option<Rect>,
}

#[derive(Parser, Debug)]
struct DemultiplyArgs {
    /// Input image with premultiplied alpha.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DrawArgs {
    /// Destination image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Image to draw.
    #[arg(long)]
    image: PathBuf,

    /// Output image.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, allow_hyphen_values = true)]
    x: i32,

    #[arg(long, allow_hyphen_values = true)]
    y: i32,

    /// Width after resampling.
    #[arg(long)]
    width: u32,

    /// Height after resampling.
    #[arg(long)]
    height: u32,

    /// JSON file with draw options (`{"bounds": "clip", "filter": "lanczos3"}`).
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Overrides `bounds` from `--opts`.
    #[arg(long, value_enum)]
    bounds: Option<BoundsChoice>,

    /// Overrides `filter` from `--opts`.
    #[arg(long, value_enum)]
    filter: Option<FilterChoice>,
}

/// Contents of `draw --opts`: blit options plus the resampling filter.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
struct DrawOpts {
    #[serde(flatten)]
    blit: BlitOpts,
    filter: ResampleFilter,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BoundsChoice {
    Clip,
    Linear,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterChoice {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<BoundsChoice> for BlitBounds {
    fn from(c: BoundsChoice) -> Self {
        match c {
            BoundsChoice::Clip => BlitBounds::Clip,
            BoundsChoice::Linear => BlitBounds::Linear,
        }
    }
}

impl From<FilterChoice> for ResampleFilter {
    fn from(c: FilterChoice) -> Self {
        match c {
            FilterChoice::Nearest => ResampleFilter::Nearest,
            FilterChoice::Triangle => ResampleFilter::Triangle,
            FilterChoice::CatmullRom => ResampleFilter::CatmullRom,
            FilterChoice::Gaussian => ResampleFilter::Gaussian,
            FilterChoice::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Blur(args) => cmd_blur(args),
        Command::Demultiply(args) => cmd_demultiply(args),
        Command::Draw(args) => cmd_draw(args),
    }
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("rect coordinates must be unsigned integers: {e}"))?;
    let [x1, y1, x2, y2] = parts[..] else {
        return Err(format!("expected x1,y1,x2,y2, got '{s}'"));
    };
    Rect::new(x1, y1, x2, y2).map_err(|e| e.to_string())
}

fn read_draw_opts(path: &Path) -> anyhow::Result<DrawOpts> {
    let f = File::open(path).with_context(|| format!("open draw opts '{}'", path.display()))?;
    let opts: DrawOpts = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse draw opts '{}'", path.display()))?;
    Ok(opts)
}

fn cmd_blur(args: BlurArgs) -> anyhow::Result<()> {
    let mut surface = surfacefx::load_surface(&args.in_path)?;
    let rect = args
        .rect
        .unwrap_or_else(|| Rect::full(surface.width(), surface.height()));

    match (args.band, args.rect) {
        (None, None) => surface.blur_full(args.sigma)?,
        (Some(band), _) => surface.blur_partial_rect(args.sigma, band, rect)?,
        // A band as wide as the rect blurs all of it.
        (None, Some(_)) => {
            let band = rect.width().max(rect.height());
            surface.blur_partial_rect(args.sigma, band, rect)?
        }
    }

    surfacefx::save_surface(&surface, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_demultiply(args: DemultiplyArgs) -> anyhow::Result<()> {
    let mut surface = surfacefx::load_surface(&args.in_path)?;
    surface.demultiply_alpha()?;
    surfacefx::save_surface(&surface, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_draw(args: DrawArgs) -> anyhow::Result<()> {
    let mut opts = match &args.opts {
        Some(path) => read_draw_opts(path)?,
        None => DrawOpts::default(),
    };
    if let Some(bounds) = args.bounds {
        opts.blit.bounds = bounds.into();
    }
    if let Some(filter) = args.filter {
        opts.filter = filter.into();
    }

    let mut surface = surfacefx::load_surface(&args.in_path)?;
    let image = surfacefx::load_image(&args.image)?;
    let params = BlitParams {
        x: args.x,
        y: args.y,
        width: args.width,
        height: args.height,
    };
    surface.draw_image(&image, params, &ImageResampler::new(opts.filter), &opts.blit)?;

    surfacefx::save_surface(&surface, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
