// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Haar cascade region detector backed by OpenCV

use anyhow::{Context, Result};
use image::GrayImage;
use opencv::core::{Mat, Rect, Scalar, Size, Vector, CV_8UC1};
use opencv::objdetect::{CascadeClassifier, CASCADE_SCALE_IMAGE};
use opencv::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use super::{RegionDetector, ScanParams};
use crate::error::RecognizerError;
use crate::vision::geometry::Region;

/// OpenCV `CascadeClassifier` loaded once from a cascade XML definition
pub struct CascadeDetector {
    /// `detect_multi_scale` needs `&mut`, so scans are serialized
    classifier: Mutex<CascadeClassifier>,
    path: PathBuf,
}

impl std::fmt::Debug for CascadeDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeDetector")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl CascadeDetector {
    pub fn new<P: AsRef<Path>>(cascade_path: P) -> std::result::Result<Self, RecognizerError> {
        let path = cascade_path.as_ref();
        if !path.exists() {
            return Err(RecognizerError::DetectorNotFound(path.to_path_buf()));
        }

        let load_failed = |reason: String| RecognizerError::DetectorLoadFailed {
            path: path.to_path_buf(),
            reason,
        };

        let path_str = path
            .to_str()
            .ok_or_else(|| load_failed("path is not valid UTF-8".to_string()))?;
        let classifier =
            CascadeClassifier::new(path_str).map_err(|e| load_failed(e.to_string()))?;
        if classifier.empty().map_err(|e| load_failed(e.to_string()))? {
            return Err(load_failed("cascade definition is empty".to_string()));
        }

        info!("✅ Haar cascade detector loaded from {}", path.display());

        Ok(Self {
            classifier: Mutex::new(classifier),
            path: path.to_path_buf(),
        })
    }

    fn to_mat(gray: &GrayImage) -> Result<Mat> {
        let mut mat = Mat::new_rows_cols_with_default(
            gray.height() as i32,
            gray.width() as i32,
            CV_8UC1,
            Scalar::all(0.0),
        )
        .context("Failed to allocate grayscale Mat")?;
        mat.data_bytes_mut()
            .context("Failed to access Mat buffer")?
            .copy_from_slice(gray.as_raw());
        Ok(mat)
    }
}

impl RegionDetector for CascadeDetector {
    fn detect(&self, gray: &GrayImage, params: &ScanParams) -> Result<Vec<Region>> {
        let mat = Self::to_mat(gray)?;
        let mut objects = Vector::<Rect>::new();
        let min_size = Size::new(params.min_size as i32, params.min_size as i32);
        let max_size = params
            .max_size
            .map(|side| Size::new(side as i32, side as i32))
            .unwrap_or_default();

        let mut classifier = self
            .classifier
            .lock()
            .map_err(|_| anyhow::anyhow!("Cascade detector lock poisoned"))?;
        classifier
            .detect_multi_scale(
                &mat,
                &mut objects,
                params.scale_factor,
                params.min_neighbors,
                CASCADE_SCALE_IMAGE,
                min_size,
                max_size,
            )
            .context("Cascade detect_multi_scale failed")?;

        let regions: Vec<Region> = objects
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect();
        debug!("Cascade proposed {} regions", regions.len());
        Ok(regions)
    }
}
