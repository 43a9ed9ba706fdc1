//! HUD and end-screen view models
//!
//! Everything the DOM shows is computed here as plain strings and numbers,
//! so the browser glue only copies values into elements.

use crate::consts::{LOW_TIME_WARNING, ROUND_SECONDS};
use crate::highscores::Records;
use crate::session::SessionResult;
use crate::sim::{Achievement, GameState};

/// Number of speed indicator dots
pub const SPEED_DOTS: usize = 5;

/// Format a speed the way the HUD shows it ("3", "4.5")
pub fn format_speed(speed: f32) -> String {
    if speed.fract() == 0.0 {
        format!("{}", speed as i64)
    } else {
        format!("{:.1}", speed)
    }
}

/// Whole seconds shown on timers
pub fn display_seconds(time_left: f32) -> u32 {
    time_left.max(0.0).floor() as u32
}

/// HUD contents for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub time: String,
    pub score: String,
    pub speed: String,
    /// 0-100
    pub time_percent: f32,
    /// 0-100
    pub score_percent: f32,
    /// Lit speed dots out of `SPEED_DOTS`
    pub active_speed_dots: usize,
    pub high_score: String,
    pub best_time: String,
    /// "3x COMBO!" when combo > 1
    pub combo_banner: Option<String>,
    /// "HURRY! 7s" when under ten seconds
    pub time_warning: Option<String>,
    pub paused: bool,
    pub pause_button: &'static str,
}

impl HudView {
    pub fn new(state: &GameState, records: &Records) -> Self {
        let star_count = state.star_count().max(1) as f32;
        let active = state.is_running();

        Self {
            time: display_seconds(state.time_left).to_string(),
            score: state.score.to_string(),
            speed: format_speed(state.player_speed),
            time_percent: (state.time_left / ROUND_SECONDS * 100.0).clamp(0.0, 100.0),
            score_percent: (state.score as f32 / star_count * 100.0).clamp(0.0, 100.0),
            active_speed_dots: (state.player_speed.floor().max(0.0) as usize).min(SPEED_DOTS),
            high_score: records.high_score.to_string(),
            best_time: records.best_time.to_string(),
            combo_banner: (active && state.combo > 1).then(|| format!("{}x COMBO!", state.combo)),
            time_warning: (active && state.time_left < LOW_TIME_WARNING)
                .then(|| format!("HURRY! {}s", state.time_left.max(0.0).ceil() as u32)),
            paused: state.is_paused(),
            pause_button: if state.is_paused() { "RESUME" } else { "PAUSE" },
        }
    }
}

/// Pause overlay text
pub const PAUSE_TITLE: &str = "MISSION PAUSED";
pub const PAUSE_HINT: &str = "Press P or click Resume to continue";

/// End-screen contents
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub title: &'static str,
    pub message: &'static str,
    pub icon: &'static str,
    /// CSS colour for the icon
    pub icon_color: &'static str,
    pub final_score: String,
    pub final_time: String,
    /// Achievements earned by this run
    pub banners: Vec<Banner>,
}

/// One achievement banner on the results screen
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub achievement: Achievement,
    pub icon: &'static str,
    /// e.g. "Speed Demon Unlocked!"
    pub text: String,
}

impl ResultView {
    pub fn new(result: &SessionResult) -> Self {
        let (title, message, icon, icon_color) = if result.won {
            (
                "MISSION SUCCESS!",
                "You collected all stellar energy!",
                "trophy",
                "#ffd166",
            )
        } else {
            (
                "MISSION FAILED",
                "Time ran out! Try again.",
                "exclamation-triangle",
                "#ff6b6b",
            )
        };

        Self {
            title,
            message,
            icon,
            icon_color,
            final_score: result.score.to_string(),
            final_time: display_seconds(result.time_left).to_string(),
            banners: result.achievements.iter().map(banner).collect(),
        }
    }
}

fn banner(achievement: &Achievement) -> Banner {
    Banner {
        achievement: *achievement,
        icon: achievement.icon(),
        text: format!("{} Unlocked!", achievement.title()),
    }
}
