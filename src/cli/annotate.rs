// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::RecognizerConfig;
use crate::vision::{Orientation, RecognitionOutput, RecognizedSign, SignClass, SignRecognizer};

/// Arguments for the annotate command
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Recognizer configuration file (TOML); defaults apply when omitted
    #[arg(long, env = "SIGN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Input images are already upright (skip the sensor rotation)
    #[arg(long)]
    pub upright: bool,

    /// Print the per-image summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Directory for annotated PNG output
    #[arg(long, default_value = "./annotated")]
    pub output_dir: PathBuf,

    /// Images to annotate
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

/// Per-image result printed after annotation
#[derive(Debug, Serialize)]
pub struct ImageSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub signs: Vec<RecognizedSign>,
    pub skipped_regions: usize,
    pub processing_time_ms: u64,
}

impl ImageSummary {
    fn new(input: &Path, output: PathBuf, result: &RecognitionOutput) -> Self {
        Self {
            input: input.to_path_buf(),
            output,
            signs: result.signs.clone(),
            skipped_regions: result.skipped_regions,
            processing_time_ms: result.processing_time_ms,
        }
    }
}

/// Resolve the recognizer configuration for the annotate command
pub fn resolve_config(args: &AnnotateArgs) -> Result<RecognizerConfig> {
    let config = match args.config.as_ref() {
        Some(path) => RecognizerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RecognizerConfig::default(),
    };
    let mut config = config.apply_env_overrides();
    if args.upright {
        config.orientation = Orientation::Upright;
    }
    config.validate()?;
    Ok(config)
}

/// Output path for an annotated image
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    output_dir.join(format!("{}_annotated.png", stem))
}

/// Annotate every input image and write the results
pub async fn annotate_images(args: AnnotateArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let recognizer = SignRecognizer::load(&config).await?;

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let mut summaries = Vec::with_capacity(args.inputs.len());
    let mut failures = 0usize;

    for input in &args.inputs {
        match annotate_one(&recognizer, input, &args.output_dir) {
            Ok(summary) => {
                if !args.json {
                    print_summary(&summary);
                }
                summaries.push(summary);
            }
            Err(e) => {
                warn!("Skipping {}: {:#}", input.display(), e);
                failures += 1;
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }

    info!(
        "Annotated {} of {} images into {}",
        summaries.len(),
        args.inputs.len(),
        args.output_dir.display()
    );

    if summaries.is_empty() && failures > 0 {
        bail!("No images could be annotated");
    }
    Ok(())
}

fn annotate_one(
    recognizer: &SignRecognizer,
    input: &Path,
    output_dir: &Path,
) -> Result<ImageSummary> {
    let frame = image::open(input)
        .with_context(|| format!("Failed to decode {}", input.display()))?
        .to_rgba8();

    let result = recognizer.process(frame);
    let output = output_path(output_dir, input);
    result
        .frame
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(ImageSummary::new(input, output, &result))
}

fn print_summary(summary: &ImageSummary) {
    println!(
        "📷 {} -> {} ({} signs, {} skipped, {}ms)",
        summary.input.display(),
        summary.output.display(),
        summary.signs.len(),
        summary.skipped_regions,
        summary.processing_time_ms
    );
    for sign in &summary.signs {
        println!(
            "   [{:>2}] {:<45} score {:.3} at ({}, {}, {}x{})",
            sign.class_id,
            sign.label,
            sign.score,
            sign.region.x,
            sign.region.y,
            sign.region.width,
            sign.region.height
        );
    }
}

/// Print the class label table
pub fn print_labels() -> Result<()> {
    for class in SignClass::ALL {
        println!("{:>2}  {}", class.id(), class.label());
    }
    Ok(())
}
