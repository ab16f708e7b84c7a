// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Traffic sign recognition on camera frames
//!
//! This module provides:
//! - Candidate region proposal via a pluggable detector (Haar cascade)
//! - Region preprocessing into classifier tensors
//! - Sign classification via ONNX Runtime (GTSRB, 43 classes)
//! - Frame annotation with boxes and labels
//!
//! Everything runs on CPU, one frame at a time.

pub mod classification;
pub mod compositor;
pub mod decision;
pub mod detection;
pub mod geometry;
pub mod pipeline;
pub mod preprocessing;
pub mod signs;

pub use classification::{ClassifierOptions, OnnxSignClassifier, ScoreVector, SignClassifier};
pub use compositor::{FrameCompositor, GlyphLabelRenderer, LabelRenderer};
pub use decision::{decide, find_winner, Decision};
pub use detection::{ProposalOptions, RegionDetector, RegionProposer, ScanParams};
pub use geometry::{Frame, Orientation, Region};
pub use pipeline::{PipelineOptions, RecognitionOutput, RecognizedSign, SignRecognizer};
pub use preprocessing::{preprocess, SIGN_INPUT_SIZE};
pub use signs::{label_for_id, SignClass, NUM_SIGN_CLASSES, UNKNOWN_SIGN_LABEL};

#[cfg(feature = "opencv-cascade")]
pub use detection::CascadeDetector;
