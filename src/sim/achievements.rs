//! End-of-run achievements

use crate::consts::{SPEED_DEMON_COMBO, TIME_MASTER_SECONDS};

/// Unlockable achievements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    /// Reached a combo of 5 or more
    SpeedDemon,
    /// Collected every star with more than 30 seconds left
    TimeMaster,
    /// Collected every star
    PerfectRun,
}

impl Achievement {
    pub const ALL: [Achievement; 3] = [
        Achievement::SpeedDemon,
        Achievement::TimeMaster,
        Achievement::PerfectRun,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::TimeMaster => "Time Master",
            Achievement::PerfectRun => "Perfect Run",
        }
    }

    /// Icon name used by the end screen
    pub fn icon(&self) -> &'static str {
        match self {
            Achievement::SpeedDemon => "bolt",
            Achievement::TimeMaster => "clock",
            Achievement::PerfectRun => "star",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Achievement::SpeedDemon => 1,
            Achievement::TimeMaster => 1 << 1,
            Achievement::PerfectRun => 1 << 2,
        }
    }
}

/// Final statistics of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalStats {
    pub score: u32,
    pub star_count: u32,
    pub time_left: f32,
    pub max_combo: u32,
}

/// Achievements earned by a run, in display order
pub fn evaluate(stats: &FinalStats) -> Vec<Achievement> {
    let all_collected = stats.score == stats.star_count;
    Achievement::ALL
        .into_iter()
        .filter(|a| match a {
            Achievement::SpeedDemon => stats.max_combo >= SPEED_DEMON_COMBO,
            Achievement::TimeMaster => stats.time_left > TIME_MASTER_SECONDS && all_collected,
            Achievement::PerfectRun => all_collected,
        })
        .collect()
}

/// One-way set of unlocked achievements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementSet {
    bits: u8,
}

impl AchievementSet {
    /// Unlock; returns true if it was newly unlocked
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        let was = self.is_unlocked(achievement);
        self.bits |= achievement.bit();
        !was
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.bits & achievement.bit() != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Achievement> + '_ {
        Achievement::ALL
            .into_iter()
            .filter(|a| self.is_unlocked(*a))
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}
