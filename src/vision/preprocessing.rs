// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Region preprocessing for the sign classifier

use image::imageops::{self, FilterType};
use image::RgbaImage;
use ndarray::Array4;

use super::geometry::{Frame, Region};
use crate::error::PreprocessError;

/// Side of the square classifier input (GTSRB model trained on 30x30)
pub const SIGN_INPUT_SIZE: u32 = 30;

/// Number of colour channels fed to the classifier (R, G, B)
pub const INPUT_CHANNELS: usize = 3;

/// Flat length of a preprocessed tensor for the given input side
pub fn tensor_len(input_size: u32) -> usize {
    INPUT_CHANNELS * input_size as usize * input_size as usize
}

/// Preprocess one candidate region for classification
///
/// Steps:
/// 1. Clamp the region to the frame bounds
/// 2. Reject regions with no area left (`DegenerateRegion`)
/// 3. Crop the clamped rectangle
/// 4. Resize to `input_size x input_size` (nearest neighbour, no antialiasing)
/// 5. Normalize to an NHWC tensor `[1, S, S, 3]` with values in [0.0, 1.0]
pub fn preprocess(
    frame: &Frame,
    region: &Region,
    input_size: u32,
) -> Result<Array4<f32>, PreprocessError> {
    let clamped = region.clamp(frame.width(), frame.height());
    if clamped.is_empty() {
        return Err(PreprocessError::DegenerateRegion { region: *region });
    }

    let crop = imageops::crop_imm(
        frame,
        clamped.x as u32,
        clamped.y as u32,
        clamped.width as u32,
        clamped.height as u32,
    )
    .to_image();

    let scaled = if crop.dimensions() == (input_size, input_size) {
        crop
    } else {
        imageops::resize(&crop, input_size, input_size, FilterType::Nearest)
    };

    Ok(normalize_rgb(&scaled))
}

/// Convert an RGBA image into a `[1, H, W, 3]` tensor of `channel / 255.0`
///
/// Rows are the outer loop, columns the inner loop, and each pixel emits R, G,
/// B in that order, so the standard-layout buffer is row-major and
/// channel-interleaved. Alpha is dropped.
pub fn normalize_rgb(image: &RgbaImage) -> Array4<f32> {
    let (width, height) = image.dimensions();
    let mut tensor = Array4::zeros((1, height as usize, width as usize, INPUT_CHANNELS));

    for y in 0..height as usize {
        for x in 0..width as usize {
            let pixel = image.get_pixel(x as u32, y as u32);
            for c in 0..INPUT_CHANNELS {
                tensor[[0, y, x, c]] = pixel[c] as f32 / 255.0;
            }
        }
    }

    tensor
}
