//! Aggregation engine for goal progress and the swimmer ranking.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{MeterLogEntry, PersonName, ShareNumber, Swimmer, SwimmerId};

/// Shared cumulative target in meters.
pub const GOAL_METERS: i64 = 1_000_000;

const FULL_BASIS_POINTS: i128 = 10_000;

/// Progress towards the goal as a fixed-point string with two decimals.
///
/// # Examples
/// ```
/// use million_meters::domain::Percentage;
///
/// assert_eq!(Percentage::of_goal(1_234_567, 1_000_000).as_str(), "100.00");
/// assert_eq!(Percentage::of_goal(12_345, 1_000_000).as_str(), "1.23");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(String);

impl Percentage {
    /// `min(total / goal * 100, 100)` rounded half-up to two decimals.
    ///
    /// A non-positive goal counts as already reached.
    pub fn of_goal(total_meters: i64, goal: i64) -> Self {
        let basis_points = if goal <= 0 {
            FULL_BASIS_POINTS
        } else {
            let total = i128::from(total_meters.max(0));
            let goal = i128::from(goal);
            ((2 * total * FULL_BASIS_POINTS + goal) / (2 * goal)).min(FULL_BASIS_POINTS)
        };
        Self(format!("{}.{:02}", basis_points / 100, basis_points % 100))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-swimmer aggregate used in the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwimmerTotals {
    pub id: SwimmerId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub share_number: Option<ShareNumber>,
    pub total_meters: i64,
    pub total_sessions: i64,
}

/// Goal progress and ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub goal: i64,
    pub total_meters: i64,
    pub percentage: Percentage,
    pub swimmer_count: i64,
    pub by_swimmer: Vec<SwimmerTotals>,
}

impl Summary {
    /// Meters still needed to reach the goal, never negative.
    pub fn remaining_meters(&self) -> i64 {
        remaining_meters(self.goal, self.total_meters)
    }
}

/// `max(goal - total, 0)`.
pub fn remaining_meters(goal: i64, total_meters: i64) -> i64 {
    goal.saturating_sub(total_meters).max(0)
}

/// Aggregate every entry into goal progress and a ranking of every swimmer.
///
/// Swimmers without entries rank with zero totals. The ranking is ordered by
/// `total_meters` descending with ties broken by ascending id. Entries whose
/// swimmer is not in `swimmers` still count towards `total_meters`.
///
/// # Examples
/// ```
/// use million_meters::domain::{GOAL_METERS, compute_summary};
///
/// let summary = compute_summary(GOAL_METERS, &[], &[]);
/// assert_eq!(summary.total_meters, 0);
/// assert_eq!(summary.percentage.as_str(), "0.00");
/// assert_eq!(summary.remaining_meters(), GOAL_METERS);
/// ```
pub fn compute_summary(goal: i64, swimmers: &[Swimmer], entries: &[MeterLogEntry]) -> Summary {
    let mut per_swimmer: HashMap<SwimmerId, (i64, i64)> = HashMap::new();
    let mut total_meters: i64 = 0;
    for entry in entries {
        let meters = entry.meters().get();
        total_meters = total_meters.saturating_add(meters);
        let slot = per_swimmer.entry(entry.swimmer_id()).or_default();
        slot.0 = slot.0.saturating_add(meters);
        slot.1 += 1;
    }

    let mut by_swimmer: Vec<SwimmerTotals> = swimmers
        .iter()
        .map(|swimmer| {
            let (meters, sessions) = per_swimmer
                .get(&swimmer.id())
                .copied()
                .unwrap_or_default();
            SwimmerTotals {
                id: swimmer.id(),
                first_name: swimmer.first_name().clone(),
                last_name: swimmer.last_name().clone(),
                share_number: swimmer.share_number(),
                total_meters: meters,
                total_sessions: sessions,
            }
        })
        .collect();
    by_swimmer.sort_by(|a, b| {
        b.total_meters
            .cmp(&a.total_meters)
            .then_with(|| a.id.cmp(&b.id))
    });

    Summary {
        goal,
        total_meters,
        percentage: Percentage::of_goal(total_meters, goal),
        swimmer_count: i64::try_from(swimmers.len()).unwrap_or(i64::MAX),
        by_swimmer,
    }
}
