// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Recognizer configuration file tests

use fabstir_sign_recognition::vision::Orientation;
use fabstir_sign_recognition::{RecognizerConfig, RecognizerError};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_config_from_file() {
    let file = write_config(
        r#"
        model_path = "/srv/models/gtsrb.onnx"
        cascade_path = "/srv/models/signs_cascade.xml"
        font_path = "/srv/fonts/label.ttf"
        input_size = 32
        intra_threads = 2
        label_size_px = 24.0
        orientation = "upright"

        [detector]
        scale_factor = 1.2
        min_neighbors = 3
        min_size_fraction = 0.05
        max_size = 400
        "#,
    );

    let config = RecognizerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.model_path, PathBuf::from("/srv/models/gtsrb.onnx"));
    assert_eq!(
        config.cascade_path,
        Some(PathBuf::from("/srv/models/signs_cascade.xml"))
    );
    assert_eq!(config.input_size, 32);
    assert_eq!(config.intra_threads, 2);
    assert_eq!(config.orientation, Orientation::Upright);
    assert_eq!(config.detector.max_size, Some(400));
    assert!(config.validate().is_ok());

    let options = config.pipeline_options();
    assert_eq!(options.input_size, 32);
    assert_eq!(options.proposal.scale_factor, 1.2);
    assert_eq!(options.proposal.min_size_fraction, 0.05);
}

#[test]
fn test_serialized_config_reloads() {
    let original = RecognizerConfig {
        input_size: 40,
        ..RecognizerConfig::default()
    };
    let file = write_config(&toml::to_string(&original).unwrap());

    let reloaded = RecognizerConfig::from_file(file.path()).unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn test_empty_file_gives_defaults() {
    let file = write_config("");
    let config = RecognizerConfig::from_file(file.path()).unwrap();
    assert_eq!(config, RecognizerConfig::default());
}

#[test]
fn test_out_of_range_values_fail_validation() {
    let file = write_config(
        r#"
        [detector]
        min_size_fraction = 1.5
        "#,
    );
    let config = RecognizerConfig::from_file(file.path()).unwrap();
    assert!(matches!(
        config.validate(),
        Err(RecognizerError::InvalidConfig(_))
    ));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = write_config("model_path = [");
    let result = RecognizerConfig::from_file(file.path());
    assert!(matches!(result, Err(RecognizerError::ConfigParse(_))));
}

// Every SIGN_* variable is touched in this one test so parallel tests never
// observe a half-applied environment.
#[test]
fn test_env_overrides_apply_and_ignore_bad_numbers() {
    const VARS: [&str; 7] = [
        "SIGN_MODEL_PATH",
        "SIGN_CASCADE_PATH",
        "SIGN_FONT_PATH",
        "SIGN_INPUT_SIZE",
        "SIGN_INTRA_THREADS",
        "SIGN_USE_GPU",
        "SIGN_MIN_SIZE_FRACTION",
    ];

    std::env::set_var("SIGN_MODEL_PATH", "/env/model.onnx");
    std::env::set_var("SIGN_CASCADE_PATH", "/env/cascade.xml");
    std::env::set_var("SIGN_FONT_PATH", "/env/font.ttf");
    std::env::set_var("SIGN_INPUT_SIZE", "48");
    std::env::set_var("SIGN_INTRA_THREADS", "3");
    std::env::set_var("SIGN_USE_GPU", "true");
    std::env::set_var("SIGN_MIN_SIZE_FRACTION", "0.25");

    let config = RecognizerConfig::default().apply_env_overrides();
    assert_eq!(config.model_path, PathBuf::from("/env/model.onnx"));
    assert_eq!(config.cascade_path, Some(PathBuf::from("/env/cascade.xml")));
    assert_eq!(config.font_path, PathBuf::from("/env/font.ttf"));
    assert_eq!(config.input_size, 48);
    assert_eq!(config.intra_threads, 3);
    assert!(config.use_gpu);
    assert_eq!(config.detector.min_size_fraction, 0.25);

    // Empty cascade path disables the detector
    std::env::set_var("SIGN_CASCADE_PATH", "");
    let config = RecognizerConfig::default().apply_env_overrides();
    assert_eq!(config.cascade_path, None);

    // Unparsable values leave the file/default value in place
    std::env::set_var("SIGN_INPUT_SIZE", "abc");
    std::env::set_var("SIGN_INTRA_THREADS", "-1");
    std::env::set_var("SIGN_USE_GPU", "maybe");
    std::env::set_var("SIGN_MIN_SIZE_FRACTION", "tenth");
    let base = RecognizerConfig {
        intra_threads: 6,
        ..RecognizerConfig::default()
    };
    let config = base.apply_env_overrides();
    assert_eq!(config.input_size, 30);
    assert_eq!(config.intra_threads, 6);
    assert!(!config.use_gpu);
    assert_eq!(config.detector.min_size_fraction, 0.1);

    for var in VARS {
        std::env::remove_var(var);
    }

    let config = RecognizerConfig::default().apply_env_overrides();
    assert_eq!(config, RecognizerConfig::default());
}

#[test]
fn test_label_table_size_is_fixed() {
    let file = write_config("num_classes = 44\n");
    let config = RecognizerConfig::from_file(file.path()).unwrap();
    assert!(matches!(
        config.validate(),
        Err(RecognizerError::InvalidConfig(_))
    ));
}
