// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Drawing recognition results onto frames
//!
//! Each recognized region gets a green outline and its label in red, anchored
//! just inside the top-left corner. Nothing is clipped or wrapped: labels near
//! the frame edge simply run off-canvas. Later annotations overwrite earlier
//! ones.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::Rgba;
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;
use tracing::info;

use super::geometry::{Frame, Region};
use crate::error::RecognizerError;

/// Outline colour for recognized regions
pub const BOX_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// Outline stroke width in pixels
pub const BOX_STROKE: u32 = 2;

/// Label text colour
pub const LABEL_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Label text height in pixels
pub const LABEL_SIZE_PX: f32 = 30.0;

/// Label baseline offset from the region's top-left corner
pub const LABEL_OFFSET: (i32, i32) = (10, 20);

/// Draws label text onto a frame
pub trait LabelRenderer: Send + Sync {
    /// Draw `text` with its baseline starting at `(x, y)`
    fn draw_label(&self, frame: &mut Frame, x: i32, y: i32, text: &str);
}

/// Label renderer using a TrueType/OpenType font
#[derive(Clone)]
pub struct GlyphLabelRenderer {
    font: FontArc,
    scale: PxScale,
    color: Rgba<u8>,
}

impl std::fmt::Debug for GlyphLabelRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphLabelRenderer")
            .field("scale", &self.scale)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl GlyphLabelRenderer {
    pub fn new(font: FontArc) -> Self {
        Self {
            font,
            scale: PxScale::from(LABEL_SIZE_PX),
            color: LABEL_COLOR,
        }
    }

    /// Load the label font from disk
    ///
    /// # Errors
    /// - `FontNotFound` if the file does not exist
    /// - `InvalidFont` if it cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(font_path: P) -> Result<Self, RecognizerError> {
        let path = font_path.as_ref();
        if !path.exists() {
            return Err(RecognizerError::FontNotFound(path.to_path_buf()));
        }

        let invalid = |reason: String| RecognizerError::InvalidFont {
            path: path.to_path_buf(),
            reason,
        };
        let bytes = std::fs::read(path).map_err(|e| invalid(e.to_string()))?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| invalid(e.to_string()))?;

        info!("Loaded label font from {}", path.display());
        Ok(Self::new(font))
    }

    pub fn with_size(mut self, size_px: f32) -> Self {
        self.scale = PxScale::from(size_px);
        self
    }

    pub fn with_color(mut self, color: Rgba<u8>) -> Self {
        self.color = color;
        self
    }
}

impl LabelRenderer for GlyphLabelRenderer {
    fn draw_label(&self, frame: &mut Frame, x: i32, y: i32, text: &str) {
        // draw_text_mut positions by the top of the line, not the baseline
        let ascent = self.font.as_scaled(self.scale).ascent();
        let top = y - ascent.round() as i32;
        draw_text_mut(frame, self.color, x, top, self.scale, &self.font, text);
    }
}

/// Annotates frames with region outlines and labels
pub struct FrameCompositor {
    renderer: Box<dyn LabelRenderer>,
    box_color: Rgba<u8>,
    stroke: u32,
    label_offset: (i32, i32),
}

impl std::fmt::Debug for FrameCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCompositor")
            .field("box_color", &self.box_color)
            .field("stroke", &self.stroke)
            .field("label_offset", &self.label_offset)
            .finish_non_exhaustive()
    }
}

impl FrameCompositor {
    pub fn new(renderer: Box<dyn LabelRenderer>) -> Self {
        Self {
            renderer,
            box_color: BOX_COLOR,
            stroke: BOX_STROKE,
            label_offset: LABEL_OFFSET,
        }
    }

    pub fn with_box_color(mut self, color: Rgba<u8>) -> Self {
        self.box_color = color;
        self
    }

    pub fn with_stroke(mut self, stroke: u32) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_label_offset(mut self, dx: i32, dy: i32) -> Self {
        self.label_offset = (dx, dy);
        self
    }

    /// Draw the outline of `region` and its label, returning the frame
    pub fn annotate(&self, mut frame: Frame, region: &Region, label: &str) -> Frame {
        self.draw_outline(&mut frame, region);
        self.renderer.draw_label(
            &mut frame,
            region.x.saturating_add(self.label_offset.0),
            region.y.saturating_add(self.label_offset.1),
            label,
        );
        frame
    }

    fn draw_outline(&self, frame: &mut Frame, region: &Region) {
        for inset in 0..self.stroke as i32 {
            let width = region.width - 2 * inset;
            let height = region.height - 2 * inset;
            if width <= 0 || height <= 0 {
                break;
            }
            let rect = Rect::at(region.x + inset, region.y + inset)
                .of_size(width as u32, height as u32);
            draw_hollow_rect_mut(frame, rect, self.box_color);
        }
    }
}
