//! High score and best time records
//!
//! Two scalars persisted as plain integer strings under fixed
//! LocalStorage keys.

use crate::persistence::{self, Storage};

/// What changed when a run was submitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub new_high_score: bool,
    pub new_best_time: bool,
}

impl RecordUpdate {
    pub fn any(&self) -> bool {
        self.new_high_score || self.new_best_time
    }
}

/// Persistent records; both values only ever go up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Records {
    /// Most stars collected in one run
    pub high_score: u32,
    /// Most whole seconds left on a winning run
    pub best_time: u32,
}

impl Records {
    pub const HIGH_SCORE_KEY: &'static str = "cosmicHighScore";
    pub const BEST_TIME_KEY: &'static str = "cosmicBestTime";

    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished run into the records
    pub fn submit(&mut self, score: u32, won: bool, time_left: f32) -> RecordUpdate {
        let mut update = RecordUpdate::default();

        if score > self.high_score {
            self.high_score = score;
            update.new_high_score = true;
        }

        if won && time_left > self.best_time as f32 {
            self.best_time = time_left.max(0.0).floor() as u32;
            update.new_best_time = true;
        }

        update
    }

    /// Load records; unreadable values fall back to zero
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let read = |key: &str| match persistence::read_u32(storage, key) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                log::warn!("Ignoring stored {}: {}", key, e);
                0
            }
        };

        let records = Self {
            high_score: read(Self::HIGH_SCORE_KEY),
            best_time: read(Self::BEST_TIME_KEY),
        };
        log::info!(
            "Loaded records: high score {}, best time {}s",
            records.high_score,
            records.best_time
        );
        records
    }

    /// Persist the values flagged in `update`
    pub fn save<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
        update: RecordUpdate,
    ) -> persistence::Result<()> {
        if update.new_high_score {
            persistence::write_u32(storage, Self::HIGH_SCORE_KEY, self.high_score)?;
        }
        if update.new_best_time {
            persistence::write_u32(storage, Self::BEST_TIME_KEY, self.best_time)?;
        }
        if update.any() {
            log::info!(
                "Records saved (high score {}, best time {}s)",
                self.high_score,
                self.best_time
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_high_score_is_running_max() {
        let mut records = Records::new();
        assert!(records.submit(4, false, 0.0).new_high_score);
        assert!(!records.submit(3, false, 0.0).new_high_score);
        assert!(!records.submit(4, false, 0.0).new_high_score);
        assert_eq!(records.high_score, 4);
    }

    #[test]
    fn test_best_time_only_on_wins() {
        let mut records = Records::new();
        let update = records.submit(10, false, 45.0);
        assert!(!update.new_best_time);
        assert_eq!(records.best_time, 0);

        let update = records.submit(10, true, 41.7);
        assert!(update.new_best_time);
        assert_eq!(records.best_time, 41);

        // 41.5 > 41 but floors to the same value
        assert!(records.submit(10, true, 41.5).new_best_time);
        assert_eq!(records.best_time, 41);
        assert!(!records.submit(10, true, 40.0).new_best_time);
        assert_eq!(records.best_time, 41);
    }

    #[test]
    fn test_load_save_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut records = Records::new();
        let update = records.submit(10, true, 33.2);
        records.save(&mut storage, update).unwrap();

        assert_eq!(
            storage.get_item(Records::HIGH_SCORE_KEY).unwrap().as_deref(),
            Some("10")
        );
        assert_eq!(Records::load(&storage), records);
    }

    #[test]
    fn test_corrupt_values_load_as_zero() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Records::HIGH_SCORE_KEY, "NaN-ish").unwrap();
        storage.set_item(Records::BEST_TIME_KEY, "12").unwrap();
        let records = Records::load(&storage);
        assert_eq!(records.high_score, 0);
        assert_eq!(records.best_time, 12);
    }

    #[test]
    fn test_unchanged_records_write_nothing() {
        let mut storage = MemoryStorage::new();
        Records::new()
            .save(&mut storage, RecordUpdate::default())
            .unwrap();
        assert!(storage.is_empty());
    }
}
