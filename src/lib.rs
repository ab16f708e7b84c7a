// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod config;
pub mod error;
pub mod version;
pub mod vision;

pub use config::{DetectorConfig, RecognizerConfig};
pub use error::{PreprocessError, RecognizerError};
pub use vision::{
    Frame, Orientation, RecognitionOutput, RecognizedSign, Region, SignClass, SignRecognizer,
};
