//! Tournament configuration: format, courts, scoring, wildcard, rating knobs.

use crate::models::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How many trailing rounds the ladder pairing checks for repeat partners.
pub const DEFAULT_ANTI_REPEAT_WINDOW: u32 = 3;

/// The two supported play formats.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Promotion/relegation between ranked courts.
    #[default]
    Ladder,
    /// Fixed 7-round schedule where all 8 players partner everyone once.
    Rotation,
}

/// How a single match on court comes to an end. The engine never enforces
/// this; it is carried for display and for picking sensible defaults.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// First team to `target` points.
    PointsCap { target: u32 },
    /// Play until the clock runs out.
    TimeLimit { minutes: u32 },
}

impl Default for ScoringMode {
    fn default() -> Self {
        ScoringMode::PointsCap { target: 21 }
    }
}

/// How hard a wildcard round scrambles a computed pairing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildcardIntensity {
    /// Re-deal teams within each court.
    Mild,
    /// Trade one player between adjacent courts, then re-deal.
    #[default]
    Medium,
    /// Throw everyone in one pot and re-deal the whole round.
    Mayhem,
}

/// Wildcard cadence. Ladder format only.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WildcardConfig {
    pub enabled: bool,
    /// First round number that may be a wildcard. Round 1 is seeded, not
    /// computed, so this starts at 2.
    pub start_round: u32,
    /// Every how many rounds, counted from `start_round`.
    pub frequency: u32,
    /// `None` falls back to the default intensity.
    pub intensity: Option<WildcardIntensity>,
}

impl Default for WildcardConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            start_round: 3,
            frequency: 2,
            intensity: None,
        }
    }
}

impl WildcardConfig {
    /// True when `round` lands on the configured cadence. A zero frequency
    /// never fires; `validate` rejects it before play starts.
    pub fn applies_to(&self, round: u32) -> bool {
        self.enabled
            && self.frequency > 0
            && round >= self.start_round
            && (round - self.start_round) % self.frequency == 0
    }

    pub fn intensity_or_default(&self) -> WildcardIntensity {
        self.intensity.unwrap_or_default()
    }
}

/// Point awards for a finished match. Tunable per tournament; the defaults
/// differ by format.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    pub base_win_points: u32,
    /// Winning margin at or above this earns the margin bonus.
    pub margin_bonus_threshold: u32,
    pub margin_bonus_points: u32,
    /// Extra for winning on court 1 after winning there the round before.
    pub defend_bonus_points: u32,
    /// Hard cap on what one match can award a player.
    pub max_points_per_match: u32,
}

impl ScoringParams {
    pub fn ladder_default() -> Self {
        Self {
            base_win_points: 10,
            margin_bonus_threshold: 5,
            margin_bonus_points: 2,
            defend_bonus_points: 3,
            max_points_per_match: 15,
        }
    }

    pub fn rotation_default() -> Self {
        Self {
            base_win_points: 10,
            margin_bonus_threshold: 7,
            margin_bonus_points: 2,
            defend_bonus_points: 0,
            max_points_per_match: 12,
        }
    }
}

/// Knobs for the zero-sum rating update.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingParams {
    pub k_factor: f64,
    pub max_gain: i32,
    pub max_loss: i32,
}

impl RatingParams {
    pub fn ladder_default() -> Self {
        Self {
            k_factor: 32.0,
            max_gain: 50,
            max_loss: 50,
        }
    }

    pub fn rotation_default() -> Self {
        Self {
            k_factor: 24.0,
            max_gain: 40,
            max_loss: 40,
        }
    }
}

/// Everything fixed at tournament start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub format: TournamentFormat,
    pub courts: u32,
    pub scoring_mode: ScoringMode,
    /// End after this many rounds, if set.
    pub round_limit: Option<u32>,
    /// End once this much wall-clock time has passed since the start, if set.
    pub time_limit_minutes: Option<u32>,
    pub wildcard: WildcardConfig,
    pub anti_repeat_window: u32,
    pub scoring: ScoringParams,
    pub rating: RatingParams,
}

impl TournamentConfig {
    /// A ladder tournament over the given number of courts, with defaults
    /// everywhere else.
    pub fn ladder(courts: u32) -> Self {
        Self {
            format: TournamentFormat::Ladder,
            courts,
            scoring_mode: ScoringMode::default(),
            round_limit: None,
            time_limit_minutes: None,
            wildcard: WildcardConfig::default(),
            anti_repeat_window: DEFAULT_ANTI_REPEAT_WINDOW,
            scoring: ScoringParams::ladder_default(),
            rating: RatingParams::ladder_default(),
        }
    }

    /// A rotation tournament: always 2 courts and 8 players.
    pub fn rotation() -> Self {
        Self {
            format: TournamentFormat::Rotation,
            courts: 2,
            scoring_mode: ScoringMode::default(),
            round_limit: None,
            time_limit_minutes: None,
            wildcard: WildcardConfig::default(),
            anti_repeat_window: DEFAULT_ANTI_REPEAT_WINDOW,
            scoring: ScoringParams::rotation_default(),
            rating: RatingParams::rotation_default(),
        }
    }

    /// Roster size this configuration requires: every court full, nobody
    /// sitting out.
    pub fn required_players(&self) -> usize {
        self.courts as usize * 4
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.format {
            TournamentFormat::Ladder => {
                if self.courts < 2 {
                    return Err(ConfigError::LadderCourts {
                        courts: self.courts,
                    });
                }
            }
            TournamentFormat::Rotation => {
                if self.courts != 2 {
                    return Err(ConfigError::RotationCourts {
                        courts: self.courts,
                    });
                }
            }
        }
        if self.wildcard.enabled {
            if self.wildcard.frequency < 1 {
                return Err(ConfigError::WildcardFrequency);
            }
            if self.wildcard.start_round < 2 {
                return Err(ConfigError::WildcardStart {
                    start_round: self.wildcard.start_round,
                });
            }
        }
        if self.scoring.max_points_per_match < self.scoring.base_win_points {
            return Err(ConfigError::PointsCapBelowBase {
                base: self.scoring.base_win_points,
                max: self.scoring.max_points_per_match,
            });
        }
        if self.rating.k_factor <= 0.0 {
            return Err(ConfigError::NonPositiveK {
                k: self.rating.k_factor,
            });
        }
        if self.rating.max_gain < 0 || self.rating.max_loss < 0 {
            return Err(ConfigError::NegativeRatingCap);
        }
        if self.round_limit == Some(0) {
            return Err(ConfigError::ZeroRoundLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_needs_two_courts() {
        let cfg = TournamentConfig::ladder(1);
        assert_eq!(cfg.validate(), Err(ConfigError::LadderCourts { courts: 1 }));
        assert!(TournamentConfig::ladder(2).validate().is_ok());
    }

    #[test]
    fn rotation_is_pinned_to_two_courts() {
        let mut cfg = TournamentConfig::rotation();
        assert!(cfg.validate().is_ok());
        cfg.courts = 3;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::RotationCourts { courts: 3 })
        );
    }

    #[test]
    fn wildcard_fields_are_checked_only_when_enabled() {
        let mut cfg = TournamentConfig::ladder(2);
        cfg.wildcard.frequency = 0;
        assert!(cfg.validate().is_ok());

        cfg.wildcard.enabled = true;
        assert_eq!(cfg.validate(), Err(ConfigError::WildcardFrequency));

        cfg.wildcard.frequency = 1;
        cfg.wildcard.start_round = 1;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::WildcardStart { start_round: 1 })
        );
    }

    #[test]
    fn wildcard_cadence_arithmetic() {
        let wc = WildcardConfig {
            enabled: true,
            start_round: 3,
            frequency: 2,
            intensity: None,
        };
        assert!(!wc.applies_to(2));
        assert!(wc.applies_to(3));
        assert!(!wc.applies_to(4));
        assert!(wc.applies_to(5));
        assert!(wc.applies_to(7));

        let off = WildcardConfig {
            enabled: false,
            ..wc
        };
        assert!(!off.applies_to(3));
    }

    #[test]
    fn a_zero_frequency_cadence_never_fires() {
        let wc = WildcardConfig {
            enabled: true,
            start_round: 2,
            frequency: 0,
            intensity: None,
        };
        for round in 1..10 {
            assert!(!wc.applies_to(round));
        }
    }

    #[test]
    fn missing_intensity_falls_back_to_medium() {
        let wc = WildcardConfig::default();
        assert_eq!(wc.intensity_or_default(), WildcardIntensity::Medium);
        let loud = WildcardConfig {
            intensity: Some(WildcardIntensity::Mayhem),
            ..wc
        };
        assert_eq!(loud.intensity_or_default(), WildcardIntensity::Mayhem);
    }

    #[test]
    fn points_cap_cannot_undercut_the_base_award() {
        let mut cfg = TournamentConfig::ladder(2);
        cfg.scoring.max_points_per_match = 5;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::PointsCapBelowBase { base: 10, max: 5 })
        );
    }
}
