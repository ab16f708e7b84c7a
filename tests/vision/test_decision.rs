// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Score decision and label table tests

use fabstir_sign_recognition::vision::{
    decide, find_winner, label_for_id, SignClass, NUM_SIGN_CLASSES, UNKNOWN_SIGN_LABEL,
};

#[test]
fn test_first_maximum_wins() {
    assert_eq!(find_winner(&[0.2, 0.9, 0.9, 0.1]), 1);
}

#[test]
fn test_no_positive_score_selects_class_zero() {
    assert_eq!(find_winner(&[0.0; NUM_SIGN_CLASSES]), 0);
    assert_eq!(find_winner(&[-0.5, -0.1, -2.0]), 0);
    assert_eq!(find_winner(&[f32::NAN, f32::NAN]), 0);
    assert_eq!(find_winner(&[]), 0);
}

#[test]
fn test_decide_resolves_label() {
    let mut scores = vec![0.0; NUM_SIGN_CLASSES];
    scores[14] = 0.97;
    let decision = decide(&scores);
    assert_eq!(decision.class_id, 14);
    assert_eq!(decision.label, "Stop");
    assert_eq!(decision.score, 0.97);
}

#[test]
fn test_winner_beyond_table_is_unknown() {
    let mut scores = vec![0.0; 50];
    scores[45] = 1.0;
    let decision = decide(&scores);
    assert_eq!(decision.class_id, 45);
    assert_eq!(decision.label, UNKNOWN_SIGN_LABEL);
}

#[test]
fn test_label_table_is_total_over_known_ids() {
    for id in 0..NUM_SIGN_CLASSES {
        assert_ne!(label_for_id(id), UNKNOWN_SIGN_LABEL, "id {}", id);
        assert_eq!(SignClass::from_id(id).map(SignClass::id), Some(id));
    }
    assert_eq!(label_for_id(NUM_SIGN_CLASSES), UNKNOWN_SIGN_LABEL);
    assert_eq!(label_for_id(usize::MAX), UNKNOWN_SIGN_LABEL);
}

#[test]
fn test_well_known_labels() {
    assert_eq!(label_for_id(0), "Speed limit (20km/h)");
    assert_eq!(label_for_id(13), "Yield");
    assert_eq!(label_for_id(17), "No entry");
    assert_eq!(label_for_id(42), "End of no passing by vehicles over 3.5 tons");
}
