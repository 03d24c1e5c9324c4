//! Collapse the last `(start, end)` pair of a subtopology into the single
//! position of the waypoint marker that follows it.

use crate::topology_error::InvalidTopologyReason;

/// The rule that decided a marker position. Rules are tried in
/// declaration order and the first match wins.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerRule {
    /// `start == end`: already a single position.
    Degenerate,
    /// `start == 0`: the waypoint is at `end`.
    StartsAtOrigin,
    /// `start == 1`: traversed backwards, the waypoint is at `end`.
    StartsAtEnd,
    /// `end == 0`: traversed backwards towards the origin, waypoint at `start`.
    EndsAtOrigin,
    /// `end == 1`: the waypoint is at `start`.
    EndsAtEnd,
    /// The subtopology has a single path: the waypoint is at `end`.
    LonePath,
}

impl MarkerRule {
    /// Select the rule for a pair, or `None` when no rule applies.
    pub fn select(start: f64, end: f64, path_count: usize) -> Option<Self> {
        if start == end {
            Some(MarkerRule::Degenerate)
        } else if start == 0.0 {
            Some(MarkerRule::StartsAtOrigin)
        } else if start == 1.0 {
            Some(MarkerRule::StartsAtEnd)
        } else if end == 0.0 {
            Some(MarkerRule::EndsAtOrigin)
        } else if end == 1.0 {
            Some(MarkerRule::EndsAtEnd)
        } else if path_count == 1 {
            Some(MarkerRule::LonePath)
        } else {
            None
        }
    }

    pub fn position(self, start: f64, end: f64) -> f64 {
        match self {
            MarkerRule::Degenerate
            | MarkerRule::StartsAtOrigin
            | MarkerRule::StartsAtEnd
            | MarkerRule::LonePath => end,
            MarkerRule::EndsAtOrigin | MarkerRule::EndsAtEnd => start,
        }
    }
}

/// Position of the marker placed after the last path of a subtopology.
///
/// `path_count` is the number of paths in that subtopology.
pub fn resolve_marker_position(
    start: f64,
    end: f64,
    path_count: usize,
) -> Result<f64, InvalidTopologyReason> {
    MarkerRule::select(start, end, path_count)
        .map(|rule| rule.position(start, end))
        .ok_or(InvalidTopologyReason::UncollapsibleMarker { start, end })
}
