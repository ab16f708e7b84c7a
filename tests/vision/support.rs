// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hand-written collaborators for pipeline tests

use fabstir_sign_recognition::vision::{
    Frame, FrameCompositor, LabelRenderer, PipelineOptions, Region, RegionDetector, ScanParams,
    SignClassifier, SignRecognizer,
};
use image::GrayImage;
use ndarray::Array4;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub type LabelCalls = Arc<Mutex<Vec<(i32, i32, String)>>>;

/// Detector returning the same regions for every frame
pub struct FixedDetector {
    pub regions: Vec<Region>,
}

impl RegionDetector for FixedDetector {
    fn detect(&self, _gray: &GrayImage, _params: &ScanParams) -> anyhow::Result<Vec<Region>> {
        Ok(self.regions.clone())
    }
}

/// Classifier whose winning class is fixed; counts calls
pub struct FakeClassifier {
    pub winner: usize,
    pub len: usize,
    pub calls: Arc<AtomicUsize>,
}

impl FakeClassifier {
    pub fn new(winner: usize) -> Self {
        Self {
            winner,
            len: 43,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }
}

impl SignClassifier for FakeClassifier {
    fn classify(&self, input: &Array4<f32>) -> anyhow::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(input.shape(), &[1, 30, 30, 3]);
        let mut scores = vec![0.01; self.len];
        if self.winner < self.len {
            scores[self.winner] = 0.9;
        }
        Ok(scores)
    }
}

/// Classifier that always fails
pub struct FailingClassifier;

impl SignClassifier for FailingClassifier {
    fn classify(&self, _input: &Array4<f32>) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("inference engine unavailable")
    }
}

/// Label renderer that records where labels were drawn
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: LabelCalls,
}

impl LabelRenderer for RecordingRenderer {
    fn draw_label(&self, _frame: &mut Frame, x: i32, y: i32, text: &str) {
        self.calls.lock().unwrap().push((x, y, text.to_string()));
    }
}

/// Recognizer over fakes; returns the label log alongside
pub fn recognizer(
    classifier: Box<dyn SignClassifier>,
    regions: Vec<Region>,
) -> (SignRecognizer, LabelCalls) {
    let renderer = RecordingRenderer::default();
    let calls = Arc::clone(&renderer.calls);
    let recognizer = SignRecognizer::new(
        classifier,
        FrameCompositor::new(Box::new(renderer)),
        PipelineOptions::default(),
    )
    .with_detector(Box::new(FixedDetector { regions }));
    (recognizer, calls)
}

/// Sensor-landscape frame filled with mid gray
pub fn gray_frame(width: u32, height: u32) -> Frame {
    Frame::from_pixel(width, height, image::Rgba([128, 128, 128, 255]))
}
