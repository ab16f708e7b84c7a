// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Frame orientation and region geometry
//!
//! Camera sensors deliver landscape frames; detection and annotation run on
//! the upright (portrait) frame. [`to_upright`] and [`restore_orientation`]
//! are exact inverses, so a frame that receives no annotation comes back
//! bit-for-bit identical.

use image::{imageops, GrayImage, Luma, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// A captured video frame (RGBA, 8 bits per channel)
pub type Frame = RgbaImage;

/// Orientation of incoming frames relative to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Native sensor landscape; rotated upright before detection
    #[default]
    SensorLandscape,
    /// Already upright; no rotation applied
    Upright,
}

/// Axis-aligned rectangle in upright frame coordinates
///
/// Fields are signed because detector output may extend past the frame edge.
/// Use [`Region::clamp`] before indexing pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    /// Intersect with the frame rectangle `[0, frame_width) x [0, frame_height)`
    ///
    /// The result may be empty (zero width or height) when the region lies
    /// entirely outside the frame.
    pub fn clamp(&self, frame_width: u32, frame_height: u32) -> Region {
        let fw = frame_width.min(i32::MAX as u32) as i64;
        let fh = frame_height.min(i32::MAX as u32) as i64;

        let x0 = (self.x as i64).clamp(0, fw);
        let y0 = (self.y as i64).clamp(0, fh);
        let x1 = (self.x as i64 + self.width.max(0) as i64).clamp(0, fw);
        let y1 = (self.y as i64 + self.height.max(0) as i64).clamp(0, fh);

        Region {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0).max(0) as i32,
            height: (y1 - y0).max(0) as i32,
        }
    }
}

/// Rotate a sensor frame into display orientation
///
/// Transpose followed by a horizontal mirror, i.e. 90 degrees clockwise.
/// A `W x H` frame becomes `H x W`.
pub fn to_upright(frame: Frame) -> Frame {
    imageops::rotate90(&frame)
}

/// Undo [`to_upright`]
///
/// Transpose followed by a vertical mirror, i.e. 90 degrees
/// counter-clockwise.
pub fn restore_orientation(frame: Frame) -> Frame {
    imageops::rotate270(&frame)
}

/// Apply the orientation correction selected for this capture session
pub fn orient(frame: Frame, orientation: Orientation) -> Frame {
    match orientation {
        Orientation::SensorLandscape => to_upright(frame),
        Orientation::Upright => frame,
    }
}

/// Inverse of [`orient`]
pub fn unorient(frame: Frame, orientation: Orientation) -> Frame {
    match orientation {
        Orientation::SensorLandscape => restore_orientation(frame),
        Orientation::Upright => frame,
    }
}

/// BT.601 luma weights in 14-bit fixed point (R, G, B)
const LUMA_WEIGHTS: [u32; 3] = [4899, 9617, 1868];
const LUMA_SHIFT: u32 = 14;

/// Single-channel luma view of a frame, as consumed by region detectors
///
/// Uses BT.601 weights (0.299, 0.587, 0.114), the conversion cascade
/// definitions are trained on. Alpha is ignored.
pub fn to_grayscale(frame: &Frame) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        Luma([luma_bt601(frame.get_pixel(x, y))])
    })
}

fn luma_bt601(pixel: &Rgba<u8>) -> u8 {
    let [r, g, b, _] = pixel.0;
    let weighted = r as u32 * LUMA_WEIGHTS[0]
        + g as u32 * LUMA_WEIGHTS[1]
        + b as u32 * LUMA_WEIGHTS[2]
        + (1 << (LUMA_SHIFT - 1));
    (weighted >> LUMA_SHIFT).min(255) as u8
}
