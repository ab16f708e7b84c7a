// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Orientation and region clamping tests

use fabstir_sign_recognition::vision::geometry::{
    orient, restore_orientation, to_grayscale, to_upright, unorient,
};
use fabstir_sign_recognition::vision::{Frame, Orientation, Region};
use image::Rgba;

fn marked_frame(width: u32, height: u32) -> Frame {
    Frame::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 50, 255]))
}

#[test]
fn test_upright_swaps_dimensions() {
    let upright = to_upright(marked_frame(64, 48));
    assert_eq!(upright.dimensions(), (48, 64));
}

#[test]
fn test_upright_moves_top_left_to_top_right() {
    let mut frame = Frame::new(64, 48);
    frame.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

    let upright = to_upright(frame);
    assert_eq!(*upright.get_pixel(47, 0), Rgba([255, 0, 0, 255]));
}

#[test]
fn test_restore_is_exact_inverse() {
    let frame = marked_frame(37, 21);
    let restored = restore_orientation(to_upright(frame.clone()));
    assert_eq!(restored.dimensions(), frame.dimensions());
    assert_eq!(restored.as_raw(), frame.as_raw());
}

#[test]
fn test_orient_round_trip_for_both_modes() {
    for orientation in [Orientation::SensorLandscape, Orientation::Upright] {
        let frame = marked_frame(40, 30);
        let back = unorient(orient(frame.clone(), orientation), orientation);
        assert_eq!(back.as_raw(), frame.as_raw(), "{:?}", orientation);
    }
}

#[test]
fn test_grayscale_keeps_dimensions() {
    let gray = to_grayscale(&marked_frame(40, 30));
    assert_eq!(gray.dimensions(), (40, 30));
}

#[test]
fn test_grayscale_matches_cascade_training_luma() {
    let red = Frame::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
    let blue = Frame::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
    assert!(to_grayscale(&red).pixels().all(|p| p.0 == [76]));
    assert!(to_grayscale(&blue).pixels().all(|p| p.0 == [29]));
}

#[test]
fn test_clamp_handles_negative_origin() {
    let clamped = Region::new(-5, -10, 20, 30).clamp(100, 100);
    assert_eq!(clamped, Region::new(0, 0, 15, 20));
}

#[test]
fn test_clamp_outside_frame_is_empty() {
    assert!(Region::new(120, 10, 20, 20).clamp(100, 100).is_empty());
    assert!(Region::new(10, -50, 20, 20).clamp(100, 100).is_empty());
    assert!(Region::new(10, 10, -4, 20).clamp(100, 100).is_empty());
}

#[test]
fn test_clamp_does_not_overflow() {
    let clamped = Region::new(i32::MAX - 1, 0, i32::MAX, 10).clamp(u32::MAX, 50);
    assert!(clamped.width >= 0);
    assert_eq!(clamped.height, 10);
}

#[test]
fn test_region_serializes_as_object() {
    let json = serde_json::to_value(Region::new(1, 2, 3, 4)).unwrap();
    assert_eq!(json, serde_json::json!({"x": 1, "y": 2, "width": 3, "height": 4}));
}
