// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Recognizer configuration
//!
//! Loaded from a TOML file, then optionally overridden from the environment:
//!
//! ```toml
//! model_path = "./models/gtsrb/model.onnx"
//! cascade_path = "./models/gtsrb/cascade.xml"
//! font_path = "./assets/DejaVuSans.ttf"
//! input_size = 30
//! intra_threads = 8
//! use_gpu = false
//! orientation = "sensor_landscape"
//!
//! [detector]
//! scale_factor = 1.1
//! min_neighbors = 2
//! min_size_fraction = 0.1
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::RecognizerError;
use crate::vision::compositor::LABEL_SIZE_PX;
use crate::vision::detection::{
    ProposalOptions, DEFAULT_MIN_NEIGHBORS, DEFAULT_MIN_SIZE_FRACTION, DEFAULT_SCALE_FACTOR,
};
use crate::vision::geometry::Orientation;
use crate::vision::pipeline::PipelineOptions;
use crate::vision::preprocessing::SIGN_INPUT_SIZE;
use crate::vision::signs::NUM_SIGN_CLASSES;

/// Region detector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub scale_factor: f64,
    pub min_neighbors: i32,
    /// Minimum candidate side as a fraction of upright frame height
    pub min_size_fraction: f32,
    /// Maximum candidate side in pixels (unbounded if absent)
    pub max_size: Option<u32>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_size_fraction: DEFAULT_MIN_SIZE_FRACTION,
            max_size: None,
        }
    }
}

/// Everything needed to construct a [`crate::vision::SignRecognizer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// ONNX classifier model
    pub model_path: PathBuf,
    /// Haar cascade definition; no detector is loaded when absent
    pub cascade_path: Option<PathBuf>,
    /// Font used for label text
    pub font_path: PathBuf,
    /// Side of the square classifier input
    pub input_size: u32,
    /// Number of classes the model scores
    pub num_classes: usize,
    /// Thread hint passed to the inference engine
    pub intra_threads: usize,
    /// Try CUDA before CPU for classification (needs the `cuda` feature)
    pub use_gpu: bool,
    /// Label text height in pixels
    pub label_size_px: f32,
    pub orientation: Orientation,
    pub detector: DetectorConfig,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/gtsrb/model.onnx"),
            cascade_path: cfg!(feature = "opencv-cascade")
                .then(|| PathBuf::from("./models/gtsrb/cascade.xml")),
            font_path: PathBuf::from("./assets/DejaVuSans.ttf"),
            input_size: SIGN_INPUT_SIZE,
            num_classes: NUM_SIGN_CLASSES,
            intra_threads: 8,
            use_gpu: false,
            label_size_px: LABEL_SIZE_PX,
            orientation: Orientation::SensorLandscape,
            detector: DetectorConfig::default(),
        }
    }
}

impl RecognizerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RecognizerError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| RecognizerError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RecognizerError> {
        Ok(toml::from_str(content)?)
    }

    /// Override fields from `SIGN_*` environment variables
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("SIGN_MODEL_PATH") {
            self.model_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("SIGN_CASCADE_PATH") {
            self.cascade_path = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        if let Ok(val) = std::env::var("SIGN_FONT_PATH") {
            self.font_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("SIGN_INPUT_SIZE") {
            if let Ok(num) = val.parse() {
                self.input_size = num;
            }
        }

        if let Ok(val) = std::env::var("SIGN_INTRA_THREADS") {
            if let Ok(num) = val.parse() {
                self.intra_threads = num;
            }
        }

        if let Ok(val) = std::env::var("SIGN_USE_GPU") {
            if let Ok(flag) = val.parse() {
                self.use_gpu = flag;
            }
        }

        if let Ok(val) = std::env::var("SIGN_MIN_SIZE_FRACTION") {
            if let Ok(num) = val.parse() {
                self.detector.min_size_fraction = num;
            }
        }

        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), RecognizerError> {
        let invalid = |msg: String| Err(RecognizerError::InvalidConfig(msg));

        if self.model_path.as_os_str().is_empty() {
            return invalid("model_path must be set".to_string());
        }
        if self.input_size == 0 {
            return invalid("input_size must be greater than 0".to_string());
        }
        if self.num_classes != NUM_SIGN_CLASSES {
            return invalid(format!(
                "num_classes must be {} (one score per sign class), got {}",
                NUM_SIGN_CLASSES, self.num_classes
            ));
        }
        if self.intra_threads == 0 {
            return invalid("intra_threads must be at least 1".to_string());
        }
        if !(self.label_size_px > 0.0) {
            return invalid(format!(
                "label_size_px must be positive, got {}",
                self.label_size_px
            ));
        }
        if !(self.detector.min_size_fraction > 0.0 && self.detector.min_size_fraction <= 1.0) {
            return invalid(format!(
                "detector.min_size_fraction must be in (0, 1], got {}",
                self.detector.min_size_fraction
            ));
        }
        if !(self.detector.scale_factor > 1.0) {
            return invalid(format!(
                "detector.scale_factor must be greater than 1, got {}",
                self.detector.scale_factor
            ));
        }
        if self.detector.min_neighbors < 0 {
            return invalid("detector.min_neighbors must not be negative".to_string());
        }
        Ok(())
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            input_size: self.input_size,
            orientation: self.orientation,
            proposal: ProposalOptions {
                scale_factor: self.detector.scale_factor,
                min_neighbors: self.detector.min_neighbors,
                min_size_fraction: self.detector.min_size_fraction,
                max_size: self.detector.max_size,
            },
        }
    }
}
