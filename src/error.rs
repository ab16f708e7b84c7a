// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the sign recognition pipeline
//!
//! Construction-time failures (missing assets, bad configuration) surface as
//! [`RecognizerError`] and leave no usable pipeline behind. Per-region
//! conditions use [`PreprocessError`] and are absorbed by the pipeline.

use std::path::PathBuf;
use thiserror::Error;

use crate::vision::geometry::Region;

/// Errors that can occur while building a [`crate::vision::SignRecognizer`]
#[derive(Error, Debug)]
pub enum RecognizerError {
    /// Classifier model file not found at the configured path
    #[error("Sign classifier model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// ONNX Runtime could not build a session from the model
    #[error("Failed to load sign classifier from {}: {reason}", .path.display())]
    ModelLoadFailed { path: PathBuf, reason: String },

    /// Cascade definition file not found at the configured path
    #[error("Region detector definition not found: {}", .0.display())]
    DetectorNotFound(PathBuf),

    /// Cascade definition exists but could not be loaded
    #[error("Failed to load region detector from {}: {reason}", .path.display())]
    DetectorLoadFailed { path: PathBuf, reason: String },

    /// A cascade path was configured but this build has no cascade backend
    #[error(
        "Region detector configured at {} but the crate was built without the `opencv-cascade` feature",
        .0.display()
    )]
    DetectorUnsupported(PathBuf),

    /// Label font not found at the configured path
    #[error("Label font not found: {}", .0.display())]
    FontNotFound(PathBuf),

    /// Font file could not be parsed
    #[error("Invalid label font {}: {reason}", .path.display())]
    InvalidFont { path: PathBuf, reason: String },

    /// Configuration file could not be read
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::config::RecognizerConfig`]
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Per-region preprocessing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreprocessError {
    /// Region has no area left after clamping to the frame bounds
    #[error("Degenerate region after clamping: {region:?}")]
    DegenerateRegion { region: Region },
}
