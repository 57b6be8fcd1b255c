use clap::{Parser, Subcommand, ValueEnum};
use photopress::config::Config;
use photopress::imaging::{RasterBackend, RustBackend, WaterMarkPosition};
use photopress::session::Session;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photopress")]
#[command(about = "Transform a raster image: resize, thumbnail, watermark")]
#[command(long_about = "\
Transform a raster image: resize, thumbnail, watermark

Each command decodes one source image, applies its transform, and writes a
JPEG. Existing files are never overwritten — a numeric suffix is appended to
the filename stem instead, and the path actually written is printed to
stdout.

Defaults for thumbnail size and watermark placement can be supplied from a
TOML config file:

  [thumbnail]
  size = 320

  [watermark]
  position = \"center\"   # or \"right-top\"
  angle = 12.5")]
#[command(version)]
struct Cli {
    /// TOML file supplying defaults (flags still win)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log geometry decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print image dimensions and disposition
    Info { image: PathBuf },
    /// Resize an image, exactly or bounded by a max box
    Resize {
        image: PathBuf,
        /// Output path (JPEG)
        #[arg(short, long)]
        output: PathBuf,
        /// Fit inside this width, preserving aspect ratio
        #[arg(long, requires = "max_height", conflicts_with_all = ["width", "height"])]
        max_width: Option<u32>,
        /// Fit inside this height, preserving aspect ratio
        #[arg(long, requires = "max_width", conflicts_with_all = ["width", "height"])]
        max_height: Option<u32>,
        /// Exact output width, ignoring aspect ratio
        #[arg(long, requires = "height")]
        width: Option<u32>,
        /// Exact output height, ignoring aspect ratio
        #[arg(long, requires = "width")]
        height: Option<u32>,
    },
    /// Produce a square or cover-fit thumbnail
    Thumbnail {
        image: PathBuf,
        /// Output path (JPEG)
        #[arg(short, long)]
        output: PathBuf,
        /// Square edge length (defaults from config)
        #[arg(long, conflicts_with_all = ["width", "height"])]
        size: Option<u32>,
        /// Thumbnail width (cover-fit crop)
        #[arg(long, requires = "height")]
        width: Option<u32>,
        /// Thumbnail height (cover-fit crop)
        #[arg(long, requires = "width")]
        height: Option<u32>,
    },
    /// Blend a translucent watermark onto an image
    Watermark {
        image: PathBuf,
        /// Watermark image (PNG with alpha works best)
        #[arg(long)]
        mark: PathBuf,
        /// Output path (JPEG)
        #[arg(short, long)]
        output: PathBuf,
        /// Placement of the mark
        #[arg(long)]
        position: Option<PositionArg>,
        /// Rotate the mark by this many degrees before blending
        #[arg(long)]
        angle: Option<f32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PositionArg {
    Center,
    RightTop,
}

impl From<PositionArg> for WaterMarkPosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Center => WaterMarkPosition::Center,
            PositionArg::RightTop => WaterMarkPosition::RightTop,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Info { image } => {
            let session = Session::open(RustBackend::new(), &image)?;
            let (width, height) = session.dimensions();
            println!("{width}x{height} ({})", session.disposition());
        }
        Command::Resize {
            image,
            output,
            max_width,
            max_height,
            width,
            height,
        } => {
            let mut session = Session::open(RustBackend::new(), &image)?;
            match (max_width, max_height, width, height) {
                (Some(mw), Some(mh), _, _) => session.resize_with_max(mw, mh)?,
                (_, _, Some(w), Some(h)) => session.resize(w, h)?,
                _ => return Err("pass --max-width/--max-height or --width/--height".into()),
            }
            let written = session.save(&output)?;
            println!("{}", written.display());
        }
        Command::Thumbnail {
            image,
            output,
            size,
            width,
            height,
        } => {
            let session = Session::open(RustBackend::new(), &image)?;
            let written = match (width, height) {
                (Some(w), Some(h)) => session.save_thumbnail_rect(&output, w, h)?,
                _ => session.save_thumbnail(&output, size.unwrap_or(config.thumbnail.size))?,
            };
            println!("{}", written.display());
        }
        Command::Watermark {
            image,
            mark,
            output,
            position,
            angle,
        } => {
            let backend = RustBackend::new();
            let mark_bytes = std::fs::read(&mark)?;
            let mark = backend.decode(&mark_bytes)?;

            let mut session = Session::open(backend, &image)?;
            let position = position
                .map(WaterMarkPosition::from)
                .unwrap_or(config.watermark.position);
            session.add_water_mark_at(&mark, position, angle.unwrap_or(config.watermark.angle))?;
            let written = session.save(&output)?;
            println!("{}", written.display());
        }
    }

    Ok(())
}

/// Route tracing output to stderr so stdout stays machine-readable (it only
/// ever carries the written path).
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "photopress=debug"
    } else {
        "photopress=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
