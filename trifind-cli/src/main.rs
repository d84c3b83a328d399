use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trifind::io::load_image;
use trifind::{DetectConfig, Detection, Detector, PreprocessConfig, TemplateBank};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Triangle finder (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    image_path: String,
    templates_dir: String,
    output_path: Option<String>,
    scale: f32,
    edge_threshold: f32,
    stride: usize,
    threshold: f32,
    parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        let pre = PreprocessConfig::default();
        let detect = DetectConfig::default();
        Self {
            image_path: String::new(),
            templates_dir: String::new(),
            output_path: None,
            scale: pre.scale,
            edge_threshold: pre.edge_threshold,
            stride: detect.stride,
            threshold: detect.threshold,
            parallel: detect.parallel,
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    label: &'static str,
    score: f32,
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            label: value.label,
            score: value.score,
            min_x: value.bbox.min_x,
            min_y: value.bbox.min_y,
            max_x: value.bbox.max_x,
            max_y: value.bbox.max_y,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    templates: usize,
    detections: Vec<DetectionRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("trifind=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.templates_dir.is_empty() {
        return Err("image_path and templates_dir must be set in the config".into());
    }

    let pre = PreprocessConfig {
        scale: config.scale,
        edge_threshold: config.edge_threshold,
        ..PreprocessConfig::default()
    };
    let bank = TemplateBank::from_dir(&config.templates_dir, pre)?;
    tracing::info!(templates = bank.len(), dir = %config.templates_dir, "templates loaded");

    let detector = Detector::new(bank).with_config(DetectConfig {
        stride: config.stride,
        threshold: config.threshold,
        parallel: config.parallel,
    });

    let frame = load_image(&config.image_path)?;
    let detections = detector.detect(&frame)?;
    let output = Output {
        templates: detector.bank().len(),
        detections: detections.into_iter().map(DetectionRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
