//! Game settings and preferences
//!
//! Persisted as JSON next to the records.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_STAR_COUNT;
use crate::persistence::{self, Storage};
use crate::sim::TickConfig;

/// Largest star count a round can be configured with
pub const MAX_STAR_COUNT: usize = 64;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 200,
            QualityPreset::Medium => 600,
            QualityPreset::High => 2000,
        }
    }

    /// Twinkling background stars
    pub fn distant_stars(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 50,
            QualityPreset::High => 100,
        }
    }

    /// Whether to render nebula background
    pub fn nebula_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Player trail
    pub trails: bool,
    /// Particle effects (explosions, boost sparks)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no background twinkle)
    pub reduced_motion: bool,

    // === Gameplay ===
    /// Freeze boost and combo timers while paused
    pub pausable_timers: bool,
    /// Stars per round
    pub star_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            trails: true,
            particles: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_motion: false,
            pausable_timers: false,
            star_count: DEFAULT_STAR_COUNT,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        if preset == QualityPreset::Low {
            self.trails = false;
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Star count clamped to a playable range
    pub fn effective_star_count(&self) -> usize {
        self.star_count.clamp(1, MAX_STAR_COUNT)
    }

    /// Effective sound volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Per-frame simulation knobs
    pub fn tick_config(&self) -> TickConfig {
        TickConfig {
            pausable_timers: self.pausable_timers,
            trails: self.trails,
            max_particles: self.max_particles(),
        }
    }

    /// Storage key
    pub const STORAGE_KEY: &'static str = "cosmic_settings";

    /// Load settings; missing or corrupt data yields defaults
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Settings unavailable: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> persistence::Result<()> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
