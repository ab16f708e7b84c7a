// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Candidate sign region proposal
//!
//! A [`RegionDetector`] scans a grayscale upright frame and returns candidate
//! rectangles. [`RegionProposer`] owns the detector (if any), derives the
//! scan parameters from the frame, and absorbs detector failures so that a
//! broken detector only costs the frame its annotations.

#[cfg(feature = "opencv-cascade")]
pub mod cascade;

#[cfg(feature = "opencv-cascade")]
pub use cascade::CascadeDetector;

use anyhow::Result;
use image::GrayImage;
use tracing::{debug, warn};

use super::geometry::Region;

/// Default scale step between detector pyramid levels
pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;

/// Default number of overlapping hits required to keep a candidate
pub const DEFAULT_MIN_NEIGHBORS: i32 = 2;

/// Default minimum candidate side as a fraction of frame height
pub const DEFAULT_MIN_SIZE_FRACTION: f32 = 0.1;

/// Parameters for one detector scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanParams {
    pub scale_factor: f64,
    pub min_neighbors: i32,
    /// Smallest square side (px) the detector should report
    pub min_size: u32,
    /// Largest square side (px); `None` means unbounded
    pub max_size: Option<u32>,
}

/// A loaded region detector
pub trait RegionDetector: Send + Sync {
    /// Scan a grayscale frame for candidate sign rectangles
    fn detect(&self, gray: &GrayImage, params: &ScanParams) -> Result<Vec<Region>>;
}

/// Detector policy applied to every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposalOptions {
    pub scale_factor: f64,
    pub min_neighbors: i32,
    pub min_size_fraction: f32,
    pub max_size: Option<u32>,
}

impl Default for ProposalOptions {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_size_fraction: DEFAULT_MIN_SIZE_FRACTION,
            max_size: None,
        }
    }
}

/// Wraps the (optional) region detector for the pipeline
pub struct RegionProposer {
    detector: Option<Box<dyn RegionDetector>>,
    options: ProposalOptions,
}

impl std::fmt::Debug for RegionProposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionProposer")
            .field("has_detector", &self.detector.is_some())
            .field("options", &self.options)
            .finish()
    }
}

impl RegionProposer {
    pub fn new(detector: Option<Box<dyn RegionDetector>>, options: ProposalOptions) -> Self {
        Self { detector, options }
    }

    /// Proposer with no detector; every frame yields zero regions
    pub fn disabled(options: ProposalOptions) -> Self {
        Self::new(None, options)
    }

    pub fn has_detector(&self) -> bool {
        self.detector.is_some()
    }

    pub fn options(&self) -> &ProposalOptions {
        &self.options
    }

    /// Scan parameters for a frame of the given height
    pub fn scan_params(&self, frame_height: u32) -> ScanParams {
        ScanParams {
            scale_factor: self.options.scale_factor,
            min_neighbors: self.options.min_neighbors,
            min_size: (frame_height as f32 * self.options.min_size_fraction) as u32,
            max_size: self.options.max_size,
        }
    }

    /// Candidate regions in the detector's native order
    ///
    /// Never fails: a missing detector or a detector error yields an empty
    /// list. Candidates smaller than the minimum side are dropped.
    pub fn detect_regions(&self, gray: &GrayImage) -> Vec<Region> {
        let Some(detector) = self.detector.as_ref() else {
            debug!("No region detector loaded, skipping detection");
            return Vec::new();
        };

        let params = self.scan_params(gray.height());
        let candidates = match detector.detect(gray, &params) {
            Ok(regions) => regions,
            Err(e) => {
                warn!("Region detection failed, frame left unannotated: {:#}", e);
                return Vec::new();
            }
        };

        let min_side = params.min_size.min(i32::MAX as u32) as i32;
        let total = candidates.len();
        let regions: Vec<Region> = candidates
            .into_iter()
            .filter(|r| !r.is_empty() && r.width >= min_side && r.height >= min_side)
            .collect();

        if regions.len() < total {
            debug!(
                "Dropped {} candidates below minimum side {}px",
                total - regions.len(),
                min_side
            );
        }

        regions
    }
}
