//! Run lifecycle
//!
//! `Session` owns the current `GameState` plus everything that outlives a
//! run (records, unlocked achievements, settings, storage). States:
//! `Idle -> Running <-> Paused -> Ended -> Running`.

use crate::highscores::{RecordUpdate, Records};
use crate::persistence::{self, Storage};
use crate::settings::Settings;
use crate::sim::achievements::{self, Achievement, AchievementSet, FinalStats};
use crate::sim::tick::timer_now;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, TickOutcome, autopilot, scoring, tick};

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub won: bool,
    pub score: u32,
    pub star_count: u32,
    pub time_left: f32,
    pub max_combo: u32,
    /// Achievements earned by this run
    pub achievements: Vec<Achievement>,
    pub new_high_score: bool,
    pub new_best_time: bool,
}

/// What a frame did
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    /// Idle or ended; nothing simulated
    Inactive,
    /// Frame simulated (possibly paused); render it
    Running,
    /// The run ended on this frame
    Ended(SessionResult),
}

/// Owns one player's runs
pub struct Session<S: Storage> {
    state: GameState,
    records: Records,
    achievements: AchievementSet,
    settings: Settings,
    storage: S,
    seed: u64,
    runs_started: u64,
    last_result: Option<SessionResult>,
}

impl<S: Storage> Session<S> {
    /// Create an idle session, loading records from `storage`
    pub fn new(storage: S, settings: Settings, seed: u64, width: f32, height: f32) -> Self {
        let records = Records::load(&storage);
        Self {
            state: GameState::idle(width, height),
            records,
            achievements: AchievementSet::default(),
            settings,
            storage,
            seed,
            runs_started: 0,
            last_result: None,
        }
    }

    /// Start (or restart) a run with a fresh star layout
    pub fn start(&mut self) {
        let run_seed = self
            .seed
            .wrapping_add(self.runs_started.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.runs_started += 1;

        let (width, height) = (self.state.width, self.state.height);
        self.state = GameState::new(run_seed, width, height, self.settings.effective_star_count());
        self.last_result = None;
        log::info!(
            "Run {} started ({} stars, seed {})",
            self.runs_started,
            self.state.star_count(),
            run_seed
        );
    }

    /// Flip pause at wall clock `now_ms` while a run is active; returns the
    /// new paused flag
    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        match self.state.phase {
            GamePhase::Running => {
                self.state.pause(now_ms);
                self.state.events.push(GameEvent::Paused);
                log::info!("Paused");
                true
            }
            GamePhase::Paused => {
                self.state.resume(now_ms);
                self.state.events.push(GameEvent::Resumed);
                log::info!("Resumed");
                false
            }
            GamePhase::Idle | GamePhase::Ended => false,
        }
    }

    /// Manual boost (space / boost button)
    pub fn trigger_boost(&mut self, now_ms: f64) -> bool {
        let now = timer_now(&self.state, now_ms, &self.settings.tick_config());
        scoring::activate_manual_boost(&mut self.state, now)
    }

    /// Manual boost released
    pub fn release_boost(&mut self) {
        scoring::release_manual_boost(&mut self.state);
    }

    /// Run one frame of `dt` seconds at wall clock `now_ms`
    pub fn frame(&mut self, input: &TickInput, dt: f32, now_ms: f64) -> FrameStatus {
        let input = if input.idle_mode && self.state.phase == GamePhase::Running {
            autopilot::steer(&self.state)
        } else {
            input.clone()
        };

        match tick(&mut self.state, &input, dt, now_ms, &self.settings.tick_config()) {
            TickOutcome::Inactive => FrameStatus::Inactive,
            TickOutcome::Continue => FrameStatus::Running,
            TickOutcome::Ended { won } => FrameStatus::Ended(self.end(won)),
        }
    }

    /// Finish the run: records, achievements, results
    pub fn end(&mut self, won: bool) -> SessionResult {
        self.state.phase = GamePhase::Ended;

        let update = self
            .records
            .submit(self.state.score, won, self.state.time_left);
        self.persist_records(update);

        let stats = FinalStats {
            score: self.state.score,
            star_count: self.state.star_count() as u32,
            time_left: self.state.time_left,
            max_combo: self.state.max_combo,
        };
        let earned = achievements::evaluate(&stats);
        for achievement in &earned {
            if self.achievements.unlock(*achievement) {
                log::info!("Achievement unlocked: {}", achievement.title());
            }
        }

        let result = SessionResult {
            won,
            score: stats.score,
            star_count: stats.star_count,
            time_left: stats.time_left,
            max_combo: stats.max_combo,
            achievements: earned,
            new_high_score: update.new_high_score,
            new_best_time: update.new_best_time,
        };
        self.state.events.push(GameEvent::SessionEnded { won });
        log::info!(
            "Run ended ({}): score {}/{}, {:.1}s left, max combo {}",
            if won { "won" } else { "lost" },
            result.score,
            result.star_count,
            result.time_left.max(0.0),
            result.max_combo
        );

        self.last_result = Some(result.clone());
        result
    }

    fn persist_records(&mut self, update: RecordUpdate) {
        if let Err(e) = self.records.save(&mut self.storage, update) {
            log::warn!("Failed to save records: {}", e);
        }
    }

    /// Canvas resized
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Replace settings and persist them
    pub fn set_settings(&mut self, settings: Settings) -> persistence::Result<()> {
        self.settings = settings;
        self.settings.save(&mut self.storage)
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access (autopilot tools and tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn achievements(&self) -> &AchievementSet {
        &self.achievements
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    /// Restart is allowed mid-run and from the results screen
    pub fn can_restart(&self) -> bool {
        self.state.is_running() || self.state.phase == GamePhase::Ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    fn session() -> Session<MemoryStorage> {
        Session::new(MemoryStorage::new(), Settings::default(), 42, 800.0, 600.0)
    }

    #[test]
    fn test_starts_idle() {
        let mut s = session();
        assert_eq!(s.state().phase, GamePhase::Idle);
        assert!(!s.can_restart());
        assert_eq!(
            s.frame(&TickInput::default(), 0.016, 0.0),
            FrameStatus::Inactive
        );
        assert!(!s.toggle_pause(0.0));
    }

    #[test]
    fn test_start_builds_fresh_run() {
        let mut s = session();
        s.start();
        assert_eq!(s.state().phase, GamePhase::Running);
        assert_eq!(s.state().star_count(), 10);
        let first: Vec<_> = s.state().stars.iter().map(|st| st.pos).collect();

        s.state_mut().score = 3;
        s.start();
        assert_eq!(s.state().score, 0);
        let second: Vec<_> = s.state().stars.iter().map(|st| st.pos).collect();
        assert_ne!(first, second, "each run gets a new layout");
    }

    #[test]
    fn test_pause_toggle_round_trip() {
        let mut s = session();
        s.start();
        assert!(s.toggle_pause(100.0));
        assert!(s.state().is_paused());
        assert!(!s.toggle_pause(400.0));
        assert_eq!(s.state().paused_ms, 300.0);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::Paused, GameEvent::Resumed]
        );
    }

    #[test]
    fn test_end_updates_and_persists_records() {
        let mut s = session();
        s.start();
        s.state_mut().score = 10;
        s.state_mut().time_left = 35.5;
        s.state_mut().max_combo = 6;
        let result = s.end(true);

        assert!(result.won);
        assert!(result.new_high_score && result.new_best_time);
        assert_eq!(s.records().high_score, 10);
        assert_eq!(s.records().best_time, 35);
        assert_eq!(
            s.storage().get_item(Records::BEST_TIME_KEY).unwrap().as_deref(),
            Some("35")
        );
        assert_eq!(result.achievements.len(), 3);
        assert!(s.achievements().is_unlocked(Achievement::SpeedDemon));
        assert_eq!(s.state().phase, GamePhase::Ended);
        assert!(s.can_restart());
        assert_eq!(s.last_result(), Some(&result));
    }

    #[test]
    fn test_achievements_survive_later_runs() {
        let mut s = session();
        s.start();
        s.state_mut().score = 10;
        s.end(true);
        s.start();
        let result = s.end(false);
        assert!(result.achievements.is_empty());
        assert!(s.achievements().is_unlocked(Achievement::PerfectRun));
    }

    #[test]
    fn test_records_loaded_from_storage() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Records::HIGH_SCORE_KEY, "8").unwrap();
        let mut s = Session::new(storage, Settings::default(), 1, 800.0, 600.0);
        assert_eq!(s.records().high_score, 8);
        s.start();
        s.state_mut().score = 5;
        let result = s.end(false);
        assert!(!result.new_high_score);
        assert_eq!(s.records().high_score, 8);
    }

    #[test]
    fn test_manual_boost_blocked_while_paused() {
        let mut s = session();
        assert!(!s.trigger_boost(0.0));
        s.start();
        s.toggle_pause(0.0);
        assert!(!s.trigger_boost(0.0));
        s.toggle_pause(0.0);
        assert!(s.trigger_boost(0.0));
        assert_eq!(s.state().player_speed, crate::consts::MANUAL_BOOST_SPEED);
    }

    #[test]
    fn test_pausable_boost_survives_long_pause_with_clamped_frames() {
        let settings = Settings {
            pausable_timers: true,
            ..Default::default()
        };
        let mut s = Session::new(MemoryStorage::new(), settings, 1, 800.0, 600.0);
        s.start();
        s.state_mut().player.pos = glam::Vec2::new(400.0, 300.0);
        assert!(s.trigger_boost(1000.0));
        s.toggle_pause(1000.0);

        s.frame(&TickInput::default(), 0.1, 6000.0);
        s.toggle_pause(6000.0);
        s.frame(&TickInput::default(), 0.016, 6016.0);

        assert!(s.state().boost_active);
        assert_eq!(s.state().player_speed, crate::consts::MANUAL_BOOST_SPEED);
    }

    #[test]
    fn test_settings_star_count_applies_on_start() {
        let settings = Settings {
            star_count: 3,
            ..Default::default()
        };
        let mut s = Session::new(MemoryStorage::new(), settings, 1, 800.0, 600.0);
        s.start();
        assert_eq!(s.state().star_count(), 3);
    }

    #[test]
    fn test_set_settings_persists() {
        let mut s = session();
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        s.set_settings(settings.clone()).unwrap();
        assert_eq!(Settings::load(s.storage()), settings);
    }
}
