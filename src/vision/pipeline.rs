// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-frame sign recognition pipeline
//!
//! ```text
//! orient -> grayscale -> detect_regions
//!        -> for each region: preprocess -> classify -> decide -> annotate
//!        -> restore orientation
//! ```
//!
//! [`SignRecognizer`] holds the loaded detector, classifier and compositor.
//! It is immutable after construction and can back concurrent calls from
//! several threads. Frame processing never fails: per-frame and per-region
//! problems are logged and the frame is delivered with whatever annotations
//! succeeded.

use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::classification::{
    validate_scores, ClassifierOptions, OnnxSignClassifier, SignClassifier,
};
use super::compositor::{FrameCompositor, GlyphLabelRenderer};
use super::decision::decide;
use super::detection::{ProposalOptions, RegionDetector, RegionProposer};
use super::geometry::{orient, to_grayscale, unorient, Frame, Orientation, Region};
use super::preprocessing::{preprocess, SIGN_INPUT_SIZE};
use crate::config::RecognizerConfig;
use crate::error::RecognizerError;

/// Per-frame settings fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOptions {
    /// Side of the square classifier input
    pub input_size: u32,
    /// Orientation of frames supplied by the host
    pub orientation: Orientation,
    /// Detector policy
    pub proposal: ProposalOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            input_size: SIGN_INPUT_SIZE,
            orientation: Orientation::SensorLandscape,
            proposal: ProposalOptions::default(),
        }
    }
}

/// One classified region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognizedSign {
    /// Region in upright frame coordinates, clamped to the frame
    pub region: Region,
    pub class_id: usize,
    pub label: &'static str,
    pub score: f32,
}

/// Result of processing one frame
#[derive(Debug, Clone)]
pub struct RecognitionOutput {
    /// Annotated frame in the orientation it was supplied
    pub frame: Frame,
    /// Signs recognized in this frame, in detection order
    pub signs: Vec<RecognizedSign>,
    /// Candidates dropped for this frame (degenerate or failed inference)
    pub skipped_regions: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Loaded recognizer state: detector, classifier and compositor
pub struct SignRecognizer {
    proposer: RegionProposer,
    classifier: Box<dyn SignClassifier>,
    compositor: FrameCompositor,
    options: PipelineOptions,
}

impl std::fmt::Debug for SignRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignRecognizer")
            .field("proposer", &self.proposer)
            .field("compositor", &self.compositor)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl SignRecognizer {
    /// Build a recognizer from already-loaded collaborators, without a detector
    ///
    /// Use [`SignRecognizer::with_detector`] to attach one. Without a detector
    /// every frame passes through unannotated.
    pub fn new(
        classifier: Box<dyn SignClassifier>,
        compositor: FrameCompositor,
        options: PipelineOptions,
    ) -> Self {
        Self {
            proposer: RegionProposer::disabled(options.proposal),
            classifier,
            compositor,
            options,
        }
    }

    pub fn with_detector(mut self, detector: Box<dyn RegionDetector>) -> Self {
        self.proposer = RegionProposer::new(Some(detector), self.options.proposal);
        self
    }

    /// Load all assets named by `config`
    ///
    /// # Errors
    /// Any missing or unreadable asset, or an invalid configuration. A
    /// configured cascade path that cannot be used is an error; no cascade
    /// path means the recognizer runs without a detector.
    pub async fn load(config: &RecognizerConfig) -> Result<Self, RecognizerError> {
        config.validate()?;

        let classifier = OnnxSignClassifier::new(
            &config.model_path,
            ClassifierOptions {
                intra_threads: config.intra_threads,
                num_classes: config.num_classes,
                use_gpu: config.use_gpu,
            },
        )
        .await?;

        let renderer = GlyphLabelRenderer::from_file(&config.font_path)?
            .with_size(config.label_size_px);
        let compositor = FrameCompositor::new(Box::new(renderer));

        let recognizer = Self::new(Box::new(classifier), compositor, config.pipeline_options());

        let recognizer = match config.cascade_path.as_ref() {
            Some(path) => recognizer.with_detector(load_detector(path)?),
            None => {
                warn!("No cascade_path configured, frames will pass through unannotated");
                recognizer
            }
        };

        info!(
            "✅ Sign recognizer ready (input {}x{}, detector: {})",
            config.input_size,
            config.input_size,
            recognizer.has_detector()
        );
        Ok(recognizer)
    }

    pub fn has_detector(&self) -> bool {
        self.proposer.has_detector()
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Annotate one frame and return it in its original orientation
    pub fn recognize(&self, frame: Frame) -> Frame {
        self.process(frame).frame
    }

    /// Run the full pipeline on one frame
    pub fn process(&self, frame: Frame) -> RecognitionOutput {
        let start = Instant::now();

        let mut working = orient(frame, self.options.orientation);
        let gray = to_grayscale(&working);
        let regions = self.proposer.detect_regions(&gray);

        let mut signs = Vec::with_capacity(regions.len());
        let mut skipped_regions = 0;

        for region in &regions {
            let tensor = match preprocess(&working, region, self.options.input_size) {
                Ok(tensor) => tensor,
                Err(e) => {
                    debug!("Skipping region: {}", e);
                    skipped_regions += 1;
                    continue;
                }
            };

            let scores = match self.classifier.classify(&tensor).and_then(|scores| {
                validate_scores(&scores, self.classifier.num_classes())?;
                Ok(scores)
            }) {
                Ok(scores) => scores,
                Err(e) => {
                    warn!("Skipping region {:?}, classification failed: {:#}", region, e);
                    skipped_regions += 1;
                    continue;
                }
            };

            let decision = decide(&scores);
            let clamped = region.clamp(working.width(), working.height());
            working = self.compositor.annotate(working, &clamped, decision.label);

            signs.push(RecognizedSign {
                region: clamped,
                class_id: decision.class_id,
                label: decision.label,
                score: decision.score,
            });
        }

        let frame = unorient(working, self.options.orientation);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            regions = regions.len(),
            recognized = signs.len(),
            skipped = skipped_regions,
            elapsed_ms = processing_time_ms,
            "frame processed"
        );

        RecognitionOutput {
            frame,
            signs,
            skipped_regions,
            processing_time_ms,
        }
    }
}

impl Drop for SignRecognizer {
    fn drop(&mut self) {
        info!("Releasing sign recognizer (detector and classifier)");
    }
}

#[cfg(feature = "opencv-cascade")]
fn load_detector(path: &std::path::Path) -> Result<Box<dyn RegionDetector>, RecognizerError> {
    Ok(Box::new(super::detection::CascadeDetector::new(path)?))
}

#[cfg(not(feature = "opencv-cascade"))]
fn load_detector(path: &std::path::Path) -> Result<Box<dyn RegionDetector>, RecognizerError> {
    Err(RecognizerError::DetectorUnsupported(path.to_path_buf()))
}
