//! Core domain types for the Heroforge system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout categories and logged workout records
//! - Workout-mix statistics consumed by the path classifier
//! - Hero paths and their static metadata
//! - Level-up notifications and unlocked content flags
//! - App flows consumed by the flow sequencer

use crate::config::ClassifierParams;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

// ============================================================================
// Workout Types
// ============================================================================

/// Category of a logged workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutCategory {
    Strength,
    Cardio,
    Functional,
}

impl WorkoutCategory {
    /// All categories in canonical order
    pub const ALL: [WorkoutCategory; 3] = [
        WorkoutCategory::Strength,
        WorkoutCategory::Cardio,
        WorkoutCategory::Functional,
    ];

    /// Human-readable category name
    pub fn name(&self) -> &'static str {
        match self {
            WorkoutCategory::Strength => "Strength",
            WorkoutCategory::Cardio => "Cardio",
            WorkoutCategory::Functional => "Functional",
        }
    }
}

/// A single logged workout
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub category: WorkoutCategory,
    pub performed_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub xp_awarded: u64,
}

// ============================================================================
// Workout-Mix Statistics
// ============================================================================

/// Immutable snapshot of a user's workout-type distribution.
///
/// Percentages are expected to sum to roughly 100 but this is not enforced;
/// the classifier works with whatever values the caller provides. Constructed
/// fresh per classification request and discarded after use.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTypeStats {
    pub strength_percentage: f64,
    pub cardio_percentage: f64,
    pub functional_percentage: f64,
    pub total_workouts: u32,
}

impl WorkoutTypeStats {
    pub fn new(
        strength_percentage: f64,
        cardio_percentage: f64,
        functional_percentage: f64,
        total_workouts: u32,
    ) -> Self {
        Self {
            strength_percentage,
            cardio_percentage,
            functional_percentage,
            total_workouts,
        }
    }

    /// Aggregate a workout history into a distribution snapshot.
    ///
    /// An empty history produces all-zero percentages with zero total.
    pub fn from_records(records: &[WorkoutRecord]) -> Self {
        if records.is_empty() {
            return Self::new(0.0, 0.0, 0.0, 0);
        }

        let total = records.len() as u32;
        let count_for = |category: WorkoutCategory| {
            records.iter().filter(|r| r.category == category).count() as f64
        };
        let pct = |count: f64| count / f64::from(total) * 100.0;

        Self::new(
            pct(count_for(WorkoutCategory::Strength)),
            pct(count_for(WorkoutCategory::Cardio)),
            pct(count_for(WorkoutCategory::Functional)),
            total,
        )
    }

    /// Percentage for a single category
    pub fn percentage_for(&self, category: WorkoutCategory) -> f64 {
        match category {
            WorkoutCategory::Strength => self.strength_percentage,
            WorkoutCategory::Cardio => self.cardio_percentage,
            WorkoutCategory::Functional => self.functional_percentage,
        }
    }

    /// Categories ranked by percentage, highest first.
    ///
    /// The sort is stable over the canonical category order; the relative
    /// order of exactly equal percentages is unspecified.
    pub fn sorted_by_percentage(&self) -> [(WorkoutCategory, f64); 3] {
        let mut ranked = WorkoutCategory::ALL.map(|c| (c, self.percentage_for(c)));
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// The single most dominant category
    pub fn most_dominant(&self) -> WorkoutCategory {
        self.sorted_by_percentage()[0].0
    }

    /// All three categories within the champion tolerance of an even split
    pub fn has_champion_distribution(&self, params: &ClassifierParams) -> bool {
        WorkoutCategory::ALL.iter().all(|c| {
            (self.percentage_for(*c) - params.champion_target).abs() <= params.champion_tolerance
        })
    }

    /// Dominant category at or above the single-dominant threshold
    pub fn has_single_dominant_type(&self, params: &ClassifierParams) -> bool {
        self.sorted_by_percentage()[0].1 >= params.dominant_threshold
    }
}

// ============================================================================
// Hero Paths
// ============================================================================

/// The seven hero path archetypes assigned from a user's workout mix
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HeroPath {
    Brute,
    Ranger,
    Sentinel,
    Hunter,
    Juggernaut,
    Strider,
    Champion,
}

impl HeroPath {
    /// Display name shown on the path reveal
    pub fn display_name(&self) -> &'static str {
        match self {
            HeroPath::Brute => "The Brute",
            HeroPath::Ranger => "The Ranger",
            HeroPath::Sentinel => "The Sentinel",
            HeroPath::Hunter => "The Hunter",
            HeroPath::Juggernaut => "The Juggernaut",
            HeroPath::Strider => "The Strider",
            HeroPath::Champion => "The Champion",
        }
    }

    /// Flavor description shown beneath the path name
    pub fn description(&self) -> &'static str {
        match self {
            HeroPath::Brute => "Raw power is the only language you speak. Heavy iron, heavier resolve.",
            HeroPath::Ranger => "Distance means nothing to you. Endurance is your weapon.",
            HeroPath::Sentinel => "Mobility, control, and balance. You are ready for anything.",
            HeroPath::Hunter => "Strong and fast. You chase your prey down and finish the job.",
            HeroPath::Juggernaut => "Unstoppable force meets practiced movement. Nothing slows you.",
            HeroPath::Strider => "Light on your feet and always moving. The ground barely holds you.",
            HeroPath::Champion => "Master of all disciplines. The rarest path of all.",
        }
    }

    /// Asset name of the path icon
    pub fn icon(&self) -> &'static str {
        match self {
            HeroPath::Brute => "path_brute",
            HeroPath::Ranger => "path_ranger",
            HeroPath::Sentinel => "path_sentinel",
            HeroPath::Hunter => "path_hunter",
            HeroPath::Juggernaut => "path_juggernaut",
            HeroPath::Strider => "path_strider",
            HeroPath::Champion => "path_champion",
        }
    }

    /// The workout categories this path favors
    pub fn primary_categories(&self) -> &'static [WorkoutCategory] {
        match self {
            HeroPath::Brute => &[WorkoutCategory::Strength],
            HeroPath::Ranger => &[WorkoutCategory::Cardio],
            HeroPath::Sentinel => &[WorkoutCategory::Functional],
            HeroPath::Hunter => &[WorkoutCategory::Strength, WorkoutCategory::Cardio],
            HeroPath::Juggernaut => &[WorkoutCategory::Strength, WorkoutCategory::Functional],
            HeroPath::Strider => &[WorkoutCategory::Functional, WorkoutCategory::Cardio],
            HeroPath::Champion => &[
                WorkoutCategory::Strength,
                WorkoutCategory::Cardio,
                WorkoutCategory::Functional,
            ],
        }
    }

    /// Hybrid path for an unordered pair of co-dominant categories.
    ///
    /// Identical categories should not occur with the fixed three-category
    /// model; any unexpected pairing falls back to `Brute`.
    pub fn hybrid_for(a: WorkoutCategory, b: WorkoutCategory) -> HeroPath {
        use WorkoutCategory::{Cardio, Functional, Strength};
        match (a, b) {
            (Strength, Cardio) | (Cardio, Strength) => HeroPath::Hunter,
            (Strength, Functional) | (Functional, Strength) => HeroPath::Juggernaut,
            (Functional, Cardio) | (Cardio, Functional) => HeroPath::Strider,
            _ => HeroPath::Brute,
        }
    }

    /// The two hybrid paths that include `primary` as one of their inputs
    pub fn hybrid_partners(primary: WorkoutCategory) -> [HeroPath; 2] {
        match primary {
            WorkoutCategory::Strength => [HeroPath::Hunter, HeroPath::Juggernaut],
            WorkoutCategory::Cardio => [HeroPath::Hunter, HeroPath::Strider],
            WorkoutCategory::Functional => [HeroPath::Juggernaut, HeroPath::Strider],
        }
    }
}

// ============================================================================
// Level-Up Notification Types
// ============================================================================

/// Content gated behind a level threshold
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UnlockedContent {
    ItemShop,
    Missions,
    Factions,
}

impl UnlockedContent {
    /// Human-readable content name
    pub fn name(&self) -> &'static str {
        match self {
            UnlockedContent::ItemShop => "Item Shop",
            UnlockedContent::Missions => "Missions",
            UnlockedContent::Factions => "Factions",
        }
    }
}

/// Event payload describing a crossed XP threshold and what it unlocked.
///
/// Created once per level-crossing event, immutable, and consumed exactly
/// once by the flow sequencer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpNotification {
    pub from_level: u32,
    pub to_level: u32,
    pub unlocked_content: BTreeSet<UnlockedContent>,
    pub new_path: Option<HeroPath>,
    pub has_faction_unlock: bool,
}

impl LevelUpNotification {
    /// Whether a path-assignment flow must chain after the level-up banner
    pub fn has_path_assignment(&self) -> bool {
        self.new_path.is_some()
    }
}

// ============================================================================
// App Flow Types
// ============================================================================

/// Queue kind of a full-screen flow.
///
/// The derived `Ord` is the promotion priority: level-up is always presented
/// before path assignment, which precedes faction selection.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    LevelUp,
    PathAssignment,
    FactionSelection,
}

/// A full-screen flow the presentation layer must show to completion.
///
/// Equality is structural (variant plus payload).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AppFlow {
    #[default]
    Idle,
    LevelUp(LevelUpNotification),
    PathAssignment(HeroPath),
    FactionSelection,
}

impl AppFlow {
    /// Queue kind for this flow (`None` for idle, which is never queued)
    pub fn kind(&self) -> Option<FlowKind> {
        match self {
            AppFlow::Idle => None,
            AppFlow::LevelUp(_) => Some(FlowKind::LevelUp),
            AppFlow::PathAssignment(_) => Some(FlowKind::PathAssignment),
            AppFlow::FactionSelection => Some(FlowKind::FactionSelection),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, AppFlow::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: WorkoutCategory) -> WorkoutRecord {
        WorkoutRecord {
            id: Uuid::new_v4(),
            category,
            performed_at: Utc::now(),
            duration_minutes: 30,
            xp_awarded: 300,
        }
    }

    #[test]
    fn test_from_records_percentages() {
        let mut records = vec![];
        for _ in 0..5 {
            records.push(record(WorkoutCategory::Strength));
        }
        for _ in 0..3 {
            records.push(record(WorkoutCategory::Cardio));
        }
        for _ in 0..2 {
            records.push(record(WorkoutCategory::Functional));
        }

        let stats = WorkoutTypeStats::from_records(&records);
        assert_eq!(stats.total_workouts, 10);
        assert!((stats.strength_percentage - 50.0).abs() < f64::EPSILON);
        assert!((stats.cardio_percentage - 30.0).abs() < f64::EPSILON);
        assert!((stats.functional_percentage - 20.0).abs() < f64::EPSILON);

        let sum = stats.strength_percentage + stats.cardio_percentage + stats.functional_percentage;
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_records_empty_history() {
        let stats = WorkoutTypeStats::from_records(&[]);
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.strength_percentage, 0.0);
        assert_eq!(stats.cardio_percentage, 0.0);
        assert_eq!(stats.functional_percentage, 0.0);
    }

    #[test]
    fn test_sorted_by_percentage_descending() {
        let stats = WorkoutTypeStats::new(20.0, 50.0, 30.0, 10);
        let ranked = stats.sorted_by_percentage();

        assert_eq!(ranked[0].0, WorkoutCategory::Cardio);
        assert_eq!(ranked[1].0, WorkoutCategory::Functional);
        assert_eq!(ranked[2].0, WorkoutCategory::Strength);
        assert_eq!(stats.most_dominant(), WorkoutCategory::Cardio);
    }

    #[test]
    fn test_champion_distribution_bounds() {
        let params = ClassifierParams::default();

        let even = WorkoutTypeStats::new(34.0, 33.0, 33.0, 30);
        assert!(even.has_champion_distribution(&params));

        let skewed = WorkoutTypeStats::new(36.0, 32.0, 32.0, 30);
        assert!(!skewed.has_champion_distribution(&params));
    }

    #[test]
    fn test_single_dominant_threshold() {
        let params = ClassifierParams::default();

        let dominant = WorkoutTypeStats::new(80.0, 15.0, 5.0, 20);
        assert!(dominant.has_single_dominant_type(&params));

        let spread = WorkoutTypeStats::new(79.9, 15.0, 5.1, 20);
        assert!(!spread.has_single_dominant_type(&params));
    }

    #[test]
    fn test_hybrid_pair_table() {
        use WorkoutCategory::{Cardio, Functional, Strength};

        assert_eq!(HeroPath::hybrid_for(Strength, Cardio), HeroPath::Hunter);
        assert_eq!(HeroPath::hybrid_for(Cardio, Strength), HeroPath::Hunter);
        assert_eq!(HeroPath::hybrid_for(Strength, Functional), HeroPath::Juggernaut);
        assert_eq!(HeroPath::hybrid_for(Cardio, Functional), HeroPath::Strider);
        // Degenerate same-category pair falls back
        assert_eq!(HeroPath::hybrid_for(Strength, Strength), HeroPath::Brute);
    }

    #[test]
    fn test_hybrid_partners_contain_primary() {
        for category in WorkoutCategory::ALL {
            for path in HeroPath::hybrid_partners(category) {
                assert!(path.primary_categories().contains(&category));
            }
        }
    }

    #[test]
    fn test_flow_kind_priority_order() {
        assert!(FlowKind::LevelUp < FlowKind::PathAssignment);
        assert!(FlowKind::PathAssignment < FlowKind::FactionSelection);
    }

    #[test]
    fn test_app_flow_kind_mapping() {
        assert_eq!(AppFlow::Idle.kind(), None);
        assert_eq!(
            AppFlow::PathAssignment(HeroPath::Hunter).kind(),
            Some(FlowKind::PathAssignment)
        );
        assert_eq!(AppFlow::FactionSelection.kind(), Some(FlowKind::FactionSelection));
        assert!(AppFlow::Idle.is_idle());
    }
}
