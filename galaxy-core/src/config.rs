use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::palette::{self, Color};

/// Which geometric law places the points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Spiral,
    Elliptical,
    Cluster,
    Explosion,
    Tornado,
    Swirl,
    Helix,
    BlackHole,
    GalaxyMerge,
}

impl Mode {
    pub const ALL: [Mode; 9] = [
        Mode::Spiral,
        Mode::Elliptical,
        Mode::Cluster,
        Mode::Explosion,
        Mode::Tornado,
        Mode::Swirl,
        Mode::Helix,
        Mode::BlackHole,
        Mode::GalaxyMerge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Spiral => "Spiral",
            Mode::Elliptical => "Elliptical",
            Mode::Cluster => "Cluster",
            Mode::Explosion => "Explosion",
            Mode::Tornado => "Tornado",
            Mode::Swirl => "Swirl",
            Mode::Helix => "Helix",
            Mode::BlackHole => "Black Hole",
            Mode::GalaxyMerge => "Galaxy Merge",
        }
    }
}

/// Error returned when a mode name does not match any variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseModeError(pub String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mode name: {:?}", self.0)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    /// Parses a mode name. Matching is case-insensitive and ignores
    /// spaces and underscores, so `"black hole"`, `"blackHole"` and
    /// `"BLACK_HOLE"` all resolve to [`Mode::BlackHole`]. Unknown
    /// names are an error, never silently defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "spiral" => Ok(Mode::Spiral),
            "elliptical" => Ok(Mode::Elliptical),
            "cluster" => Ok(Mode::Cluster),
            "explosion" => Ok(Mode::Explosion),
            "tornado" => Ok(Mode::Tornado),
            "swirl" => Ok(Mode::Swirl),
            "helix" => Ok(Mode::Helix),
            "blackhole" => Ok(Mode::BlackHole),
            "galaxymerge" => Ok(Mode::GalaxyMerge),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

pub const COUNT_RANGE: RangeInclusive<u32> = 100..=20_000;
pub const SIZE_RANGE: RangeInclusive<f32> = 0.001..=0.1;
pub const RADIUS_RANGE: RangeInclusive<f32> = 0.5..=20.0;
pub const BRANCH_RANGE: RangeInclusive<u32> = 1..=12;
pub const SPIN_RANGE: RangeInclusive<f32> = -5.0..=5.0;
pub const POWER_RANGE: RangeInclusive<f32> = 1.0..=10.0;

/// Full parameter set for one generation pass.
///
/// `size` and `auto_rotate` are consumed by the presentation layer
/// only; everything else feeds the generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub mode: Mode,
    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness_power: f32,
    pub inside_color: Color,
    pub outside_color: Color,
    pub auto_rotate: bool,
}

impl Default for Config {
    fn default() -> Self {
        let (inside, outside) = palette::THEMES[0].colors();
        Self {
            mode: Mode::Spiral,
            count: 10_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness_power: 3.0,
            inside_color: inside,
            outside_color: outside,
            auto_rotate: true,
        }
    }
}

impl Config {
    /// Returns a copy with every numeric field clamped to its
    /// documented domain. The UI boundary applies this before handing
    /// the config to the generator.
    pub fn clamped(&self) -> Self {
        let mut cfg = *self;
        cfg.count = cfg.count.clamp(*COUNT_RANGE.start(), *COUNT_RANGE.end());
        cfg.size = cfg.size.clamp(*SIZE_RANGE.start(), *SIZE_RANGE.end());
        cfg.radius = cfg.radius.clamp(*RADIUS_RANGE.start(), *RADIUS_RANGE.end());
        cfg.branches = cfg
            .branches
            .clamp(*BRANCH_RANGE.start(), *BRANCH_RANGE.end());
        cfg.spin = cfg.spin.clamp(*SPIN_RANGE.start(), *SPIN_RANGE.end());
        cfg.randomness_power = cfg
            .randomness_power
            .clamp(*POWER_RANGE.start(), *POWER_RANGE.end());
        cfg
    }

    /// Copies a theme's gradient endpoints into this config.
    pub fn apply_theme(&mut self, theme: &palette::Theme) {
        let (inside, outside) = theme.colors();
        self.inside_color = inside;
        self.outside_color = outside;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_flexible_spellings() {
        assert_eq!("spiral".parse::<Mode>(), Ok(Mode::Spiral));
        assert_eq!("blackHole".parse::<Mode>(), Ok(Mode::BlackHole));
        assert_eq!("Black Hole".parse::<Mode>(), Ok(Mode::BlackHole));
        assert_eq!("GALAXY_MERGE".parse::<Mode>(), Ok(Mode::GalaxyMerge));
    }

    #[test]
    fn unknown_mode_name_is_rejected() {
        let err = "wormhole".parse::<Mode>().unwrap_err();
        assert_eq!(err, ParseModeError("wormhole".to_string()));
    }

    #[test]
    fn every_mode_label_roundtrips_through_parse() {
        for mode in Mode::ALL {
            assert_eq!(mode.label().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn default_config_is_within_domains() {
        let cfg = Config::default();
        assert_eq!(cfg.clamped(), cfg);
    }

    #[test]
    fn clamped_pulls_out_of_range_values_back() {
        let mut cfg = Config::default();
        cfg.count = 1_000_000;
        cfg.radius = -3.0;
        cfg.branches = 0;
        cfg.spin = 99.0;

        let cfg = cfg.clamped();
        assert_eq!(cfg.count, 20_000);
        assert_eq!(cfg.radius, 0.5);
        assert_eq!(cfg.branches, 1);
        assert_eq!(cfg.spin, 5.0);
    }
}
