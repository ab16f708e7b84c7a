// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Turning a classifier score vector into a sign decision

use super::signs::label_for_id;

/// The class picked for one region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Winning classifier index
    pub class_id: usize,
    /// Score of the winner (0.0 if no entry beat the starting sentinel)
    pub score: f32,
    /// Display label, or the unknown-sign fallback
    pub label: &'static str,
}

/// Index of the highest score
///
/// The scan starts from a sentinel of (id 0, score 0.0) and only moves on a
/// strictly greater score, so ties go to the lowest index and a vector with
/// no positive entry picks class 0.
pub fn find_winner(scores: &[f32]) -> usize {
    winner_with_score(scores).0
}

fn winner_with_score(scores: &[f32]) -> (usize, f32) {
    let mut max_id = 0;
    let mut max_value = 0.0_f32;
    for (id, &score) in scores.iter().enumerate() {
        if max_value < score {
            max_value = score;
            max_id = id;
        }
    }
    (max_id, max_value)
}

/// Pick the winning class and resolve its label
pub fn decide(scores: &[f32]) -> Decision {
    let (class_id, score) = winner_with_score(scores);
    Decision {
        class_id,
        score,
        label: label_for_id(class_id),
    }
}
