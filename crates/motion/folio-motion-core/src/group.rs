//! Sequenced groups: ordered multi-element choreography with stagger/overlap.
//!
//! Each member starts relative to the previous member's *start*, not its end:
//! `start_i = sum_{j<i}(d_j - o_j)` with the first overlap fixed at 0. Total
//! duration is `sum(d) - sum(o)`, clamped to at least the longest single
//! member.

use serde::{Deserialize, Serialize};

use crate::transition::TransitionSpec;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GroupMember {
    pub spec: TransitionSpec,
    /// Overlap with the previous member in milliseconds (the site's gsap
    /// `-=0.5` offsets). Ignored for the first member.
    #[serde(default)]
    pub overlap_ms: f32,
}

/// Start time of each member relative to group activation:
/// `start_i = start_{i-1} + d_{i-1} - o_i`, clamped at 0.
pub fn member_start_times(members: &[GroupMember]) -> Vec<f32> {
    let mut starts = Vec::with_capacity(members.len());
    let mut prev_end = 0.0f32;
    for (i, m) in members.iter().enumerate() {
        let start = if i == 0 {
            0.0
        } else {
            (prev_end - m.overlap_ms).max(0.0)
        };
        starts.push(start);
        prev_end = start + m.spec.duration_ms;
    }
    starts
}

/// Total elapsed time of the whole sequence, clamped to at least the longest
/// single member duration.
pub fn group_total_duration(members: &[GroupMember]) -> f32 {
    if members.is_empty() {
        return 0.0;
    }
    let sum_durations: f32 = members.iter().map(|m| m.spec.duration_ms).sum();
    let sum_overlaps: f32 = members.iter().skip(1).map(|m| m.overlap_ms).sum();
    let longest = members
        .iter()
        .map(|m| m.spec.duration_ms)
        .fold(0.0f32, f32::max);
    (sum_durations - sum_overlaps).max(longest)
}
