// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Fabstir sign recognizer

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-gtsrb-cascade-2025-10-14";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Major version number
pub const VERSION_MAJOR: u32 = 1;

/// Minor version number
pub const VERSION_MINOR: u32 = 0;

/// Patch version number
pub const VERSION_PATCH: u32 = 0;

/// Build date
pub const BUILD_DATE: &str = "2025-10-14";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "haar-cascade-detection",
    "gtsrb-43-classes",
    "onnx-classifier",
    "nhwc-30x30-input",
    "sensor-landscape-orientation",
    "box-and-label-overlay",
    "toml-config",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Sign Recognizer {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info as JSON
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
        "cascade_detector": cfg!(feature = "opencv-cascade"),
        "cuda": cfg!(feature = "cuda"),
    })
}
