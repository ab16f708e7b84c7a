// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Traffic sign classification
//!
//! The pipeline only depends on [`SignClassifier`]. [`OnnxSignClassifier`]
//! is the production engine: ONNX Runtime on CPU (or CUDA when built with
//! the `cuda` feature and enabled), one forward pass per region.

use anyhow::{Context, Result};
use ndarray::Array4;
use ort::ep::CPU as CPUExecutionProvider;
#[cfg(feature = "cuda")]
use ort::ep::CUDA as CUDAExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use super::preprocessing::INPUT_CHANNELS;
use super::signs::NUM_SIGN_CLASSES;
use crate::error::RecognizerError;

/// Per-class scores from one forward pass
pub type ScoreVector = Vec<f32>;

/// A loaded sign classification engine
///
/// Implementations must be safe to share across frame-processing threads.
pub trait SignClassifier: Send + Sync {
    /// Score one preprocessed region tensor of shape `[1, S, S, 3]`
    fn classify(&self, input: &Array4<f32>) -> Result<ScoreVector>;

    /// Length every score vector must have
    fn num_classes(&self) -> usize {
        NUM_SIGN_CLASSES
    }
}

/// Engine settings passed through to ONNX Runtime
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    /// Intra-op thread hint for the engine
    pub intra_threads: usize,
    /// Expected length of the score vector
    pub num_classes: usize,
    /// Try the CUDA execution provider before CPU (needs the `cuda` feature)
    pub use_gpu: bool,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            intra_threads: 8,
            num_classes: NUM_SIGN_CLASSES,
            use_gpu: false,
        }
    }
}

impl ClassifierOptions {
    /// Whether session construction will attempt CUDA
    pub fn cuda_enabled(&self) -> bool {
        self.use_gpu && cfg!(feature = "cuda")
    }
}

/// ONNX sign classifier (GTSRB CNN exported from the trained Keras model)
#[derive(Clone)]
pub struct OnnxSignClassifier {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Model input name
    input_name: String,
    /// Expected number of output classes
    num_classes: usize,
}

impl std::fmt::Debug for OnnxSignClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxSignClassifier")
            .field("input_name", &self.input_name)
            .field("num_classes", &self.num_classes)
            .finish_non_exhaustive()
    }
}

impl OnnxSignClassifier {
    /// Load the classifier model from a file
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - ONNX Runtime initialization fails
    pub async fn new<P: AsRef<Path>>(
        model_path: P,
        options: ClassifierOptions,
    ) -> std::result::Result<Self, RecognizerError> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            return Err(RecognizerError::ModelNotFound(model_path.to_path_buf()));
        }

        info!("Loading sign classifier from {}", model_path.display());

        if options.use_gpu && !options.cuda_enabled() {
            warn!("⚠️  GPU requested but built without the `cuda` feature, using CPU");
        }

        let session = Self::build_session(model_path, &options).map_err(|e| {
            RecognizerError::ModelLoadFailed {
                path: model_path.to_path_buf(),
                reason: format!("{:#}", e),
            }
        })?;

        let input_name = session
            .inputs()
            .first()
            .map(|input| input.name().to_string())
            .unwrap_or_else(|| "input".to_string());

        if let Some(input) = session.inputs().first() {
            debug!("Classifier input: {} {:?}", input_name, input.dtype());
        }

        info!(
            "✅ Sign classifier loaded ({} classes, {} intra threads)",
            options.num_classes, options.intra_threads
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            num_classes: options.num_classes,
        })
    }

    fn build_session(model_path: &Path, options: &ClassifierOptions) -> Result<Session> {
        #[cfg(feature = "cuda")]
        if options.cuda_enabled() {
            info!("   Attempting CUDA execution provider...");
            let cuda_result = Session::builder()
                .context("Failed to create session builder")?
                .with_execution_providers([CUDAExecutionProvider::default().build()])
                .map_err(ort::Error::<()>::from)
                .context("Failed to set CUDA execution provider")?
                .with_optimization_level(GraphOptimizationLevel::Level3)
                .map_err(ort::Error::<()>::from)
                .context("Failed to set optimization level")?
                .with_intra_threads(options.intra_threads)
                .map_err(ort::Error::<()>::from)
                .context("Failed to set intra threads")?
                .commit_from_file(model_path);

            match cuda_result {
                Ok(session) => {
                    info!("✅ CUDA execution provider initialized");
                    return Ok(session);
                }
                Err(e) => {
                    warn!("⚠️  CUDA execution provider failed: {}", e);
                    warn!("   Falling back to CPU execution provider");
                }
            }
        }

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .map_err(ort::Error::<()>::from)
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(ort::Error::<()>::from)
            .context("Failed to set optimization level")?
            .with_intra_threads(options.intra_threads)
            .map_err(ort::Error::<()>::from)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load sign classifier from {}",
                model_path.display()
            ))?;
        Ok(session)
    }
}

impl SignClassifier for OnnxSignClassifier {
    fn classify(&self, input: &Array4<f32>) -> Result<ScoreVector> {
        validate_input_shape(input.shape())?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Classifier session lock poisoned"))?;

        let input_value =
            Value::from_array(input.to_owned()).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Classification inference failed")?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        Ok(output_tensor.iter().copied().collect())
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }
}

/// Check a tensor is `[1, S, S, 3]`
pub fn validate_input_shape(shape: &[usize]) -> Result<()> {
    if shape.len() != 4
        || shape[0] != 1
        || shape[1] == 0
        || shape[1] != shape[2]
        || shape[3] != INPUT_CHANNELS
    {
        anyhow::bail!(
            "Invalid input shape: {:?}, expected [1, S, S, {}]",
            shape,
            INPUT_CHANNELS
        );
    }
    Ok(())
}

/// Check the engine produced one score per known class
pub fn validate_scores(scores: &[f32], num_classes: usize) -> Result<()> {
    if scores.len() != num_classes {
        anyhow::bail!(
            "Classifier returned {} scores, expected {}",
            scores.len(),
            num_classes
        );
    }
    Ok(())
}
