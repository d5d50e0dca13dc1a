//! XP accounting and level-up detection.
//!
//! Level N costs `xp_per_level_base * N` XP beyond level N-1, so the
//! cumulative requirement grows triangularly. Crossing a boundary yields a
//! `LevelOutcome` describing every unlock in the crossed range; the caller
//! turns it into a `LevelUpNotification` for the flow sequencer, attaching a
//! freshly classified path when a path milestone was crossed.

use crate::config::LevelingParams;
use crate::{HeroPath, LevelUpNotification, UnlockedContent};
use std::collections::BTreeSet;

/// Result of applying an XP gain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XpOutcome {
    pub new_total: u64,
    /// Present only when a level boundary was crossed
    pub level_up: Option<LevelOutcome>,
}

/// A crossed level boundary and everything it unlocked
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelOutcome {
    pub from_level: u32,
    pub to_level: u32,
    pub unlocked: BTreeSet<UnlockedContent>,
    pub crossed_path_milestone: bool,
}

/// Cumulative XP required to reach `level`
pub fn xp_for_level(level: u32, params: &LevelingParams) -> u64 {
    // Triangular sum: base * (1 + 2 + ... + level)
    let level = u64::from(level);
    params.xp_per_level_base * level * (level + 1) / 2
}

/// Level reached at a cumulative XP total
pub fn level_for_xp(xp: u64, params: &LevelingParams) -> u32 {
    let mut level = 0;
    while xp_for_level(level + 1, params) <= xp {
        level += 1;
    }
    level
}

/// XP awarded for a workout with no explicit award recorded
pub fn xp_for_duration(duration_minutes: u32, params: &LevelingParams) -> u64 {
    u64::from(duration_minutes) * params.xp_per_minute
}

/// Apply an XP gain and report any crossed level boundary.
///
/// Unlocks are collected over every level in `(from, to]`, so a gain that
/// jumps several levels at once still reports each unlock exactly once.
pub fn apply_xp(current_xp: u64, gained: u64, params: &LevelingParams) -> XpOutcome {
    let new_total = current_xp.saturating_add(gained);
    let from_level = level_for_xp(current_xp, params);
    let to_level = level_for_xp(new_total, params);

    if to_level <= from_level {
        return XpOutcome {
            new_total,
            level_up: None,
        };
    }

    let mut unlocked = BTreeSet::new();
    let mut crossed_path_milestone = false;
    for level in (from_level + 1)..=to_level {
        if level == params.item_shop_unlock_level {
            unlocked.insert(UnlockedContent::ItemShop);
        }
        if level == params.missions_unlock_level {
            unlocked.insert(UnlockedContent::Missions);
        }
        if level == params.faction_unlock_level {
            unlocked.insert(UnlockedContent::Factions);
        }
        if params.path_milestone_interval > 0 && level % params.path_milestone_interval == 0 {
            crossed_path_milestone = true;
        }
    }

    tracing::info!(
        "Level up: {} -> {} ({} unlocks, path milestone: {})",
        from_level,
        to_level,
        unlocked.len(),
        crossed_path_milestone
    );

    XpOutcome {
        new_total,
        level_up: Some(LevelOutcome {
            from_level,
            to_level,
            unlocked,
            crossed_path_milestone,
        }),
    }
}

impl LevelUpNotification {
    /// Build the sequencer payload for a crossed boundary.
    ///
    /// `new_path` is attached by the caller when the outcome crossed a path
    /// milestone; classification stays outside this module so leveling needs
    /// no random source.
    pub fn from_outcome(outcome: &LevelOutcome, new_path: Option<HeroPath>) -> Self {
        Self {
            from_level: outcome.from_level,
            to_level: outcome.to_level,
            unlocked_content: outcome.unlocked.clone(),
            new_path,
            has_faction_unlock: outcome.unlocked.contains(&UnlockedContent::Factions),
        }
    }
}
