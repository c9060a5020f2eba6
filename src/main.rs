use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use facegrade::{
    config::{self, OutputFormat},
    report::Report,
    AnalysisSession, JsonLandmarkSource, Pipeline, SubScores,
};
use facegrade_vision::{tips, RatioSet};
use log::{info, warn};

#[derive(Parser)]
#[command(name = "facegrade")]
#[command(
    version,
    about = "Heuristic face proportion scoring from 68-point landmarks"
)]
struct Cli {
    /// Config file (defaults to the system config path)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log per-measurement detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the face in an image
    Analyze {
        /// Image file
        image: PathBuf,
        /// Detector output (JSON) for this image
        #[arg(short, long)]
        landmarks: PathBuf,
        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Show which tips given ratios and scores would produce
    Tips {
        #[arg(long, default_value_t = 1.0)]
        face_ratio: f64,
        #[arg(long, default_value_t = 0.46)]
        eye_spacing: f64,
        #[arg(long, default_value_t = 0.22)]
        nose_ratio: f64,
        #[arg(long, default_value_t = 0.34)]
        mouth_ratio: f64,
        #[arg(long, default_value_t = 100)]
        symmetry: u8,
        #[arg(long, default_value_t = 100)]
        feature: u8,
        #[arg(long, default_value_t = 100)]
        skin: u8,
    },
    /// Open config file in editor
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_target(false)
        .format_timestamp(None)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze {
            image,
            landmarks,
            format,
        } => {
            let cfg = config::load_config(config_path)?;
            analyze(&cfg, &image, &landmarks, format.unwrap_or(cfg.format))
        }
        Commands::Tips {
            face_ratio,
            eye_spacing,
            nose_ratio,
            mouth_ratio,
            symmetry,
            feature,
            skin,
        } => {
            let ratios = RatioSet {
                face_ratio,
                eye_spacing,
                nose_ratio,
                mouth_ratio,
                eye_openness_l: 0.3,
                eye_openness_r: 0.3,
            };
            let scores = SubScores::new(symmetry, 100, feature, skin);
            for tip in tips::select_tips(&scores, &ratios) {
                println!("{}: {}", tip.title, tip.body);
            }
            Ok(())
        }
        Commands::Config => open_config(config_path),
    }
}

fn analyze(
    cfg: &config::Config,
    image_path: &Path,
    landmarks_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    info!("Analysing {}", image_path.display());

    let img = image::open(image_path)
        .with_context(|| format!("Failed to open image {}", image_path.display()))?;
    let source = JsonLandmarkSource::open(landmarks_path).context("Failed to load landmarks")?;

    let session = AnalysisSession::new();
    let submission = session.submit();
    let mut pipeline = Pipeline::new(source);

    let report = match pipeline.process_submission(&submission, &img) {
        Ok((_detection, analysis)) => Report::from_analysis(&analysis, cfg),
        Err(e) if e.is_absence() => {
            warn!("{}", e);
            Report::cleared()
        }
        Err(e) => return Err(e).context("Analysis failed"),
    };

    print!("{}", report.render(format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn open_config(path: Option<&Path>) -> Result<()> {
    let config_path = path.unwrap_or(&config::CONFIG_PATH);
    if !config_path.exists() {
        config::save_config(&config::Config::default(), Some(config_path))
            .context("Failed to write default config")?;
        info!("Wrote default config to {}", config_path.display());
    }

    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    info!("Opening config file: {:?}", config_path);

    let status = std::process::Command::new(editor)
        .arg(config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        anyhow::bail!("Editor exited with non-zero status");
    }

    Ok(())
}
