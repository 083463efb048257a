//! Band arithmetic and proficiency tiers.
//!
//! A [`Band`] is stored as a count of half-band steps, so every value it can hold is
//! already a multiple of `0.5` inside `[0, 9]`.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_BAND, MAX_HALF_STEPS, MIN_BAND};

/// Clamps `x` to `[0, 9]` and rounds to the nearest `0.5`, half-up at the quarter.
///
/// `NaN` maps to `0.0`.
#[inline]
pub fn clamp_round(x: f64) -> f64 {
    Band::from_score(x).value()
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "f64", into = "f64")]
/// A criterion or aggregate score on the 0–9 scale in half-band steps.
pub struct Band(u8);

impl Band {
    pub const MIN: Band = Band(0);
    pub const MAX: Band = Band(MAX_HALF_STEPS);

    /// Builds a band from a raw score using [`clamp_round`] semantics.
    pub fn from_score(x: f64) -> Self {
        if x.is_nan() || x <= MIN_BAND {
            return Self::MIN;
        }
        if x >= MAX_BAND {
            return Self::MAX;
        }
        // multiply by 2, add 0.5, truncate
        Self((x * 2.0 + 0.5) as u8)
    }

    /// Builds a band from half-band steps, saturating at `9.0`.
    #[inline]
    pub const fn from_half_steps(steps: u8) -> Self {
        if steps > MAX_HALF_STEPS {
            Self(MAX_HALF_STEPS)
        } else {
            Self(steps)
        }
    }

    #[inline]
    pub const fn half_steps(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Mean of `bands`, clamped and rounded. An empty slice yields [`Band::MIN`].
    pub fn mean(bands: &[Band]) -> Band {
        if bands.is_empty() {
            return Self::MIN;
        }
        let total: u32 = bands.iter().map(|b| u32::from(b.0)).sum();
        Self::from_score(f64::from(total) / (2.0 * bands.len() as f64))
    }

    /// Absolute distance between two bands, in bands.
    #[inline]
    pub fn distance(self, other: Band) -> f64 {
        f64::from(self.0.abs_diff(other.0)) / 2.0
    }
}

impl From<f64> for Band {
    fn from(x: f64) -> Self {
        Self::from_score(x)
    }
}

impl From<Band> for f64 {
    fn from(band: Band) -> Self {
        band.value()
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Coarse proficiency classification derived from the aggregate band.
pub enum ProficiencyTier {
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl ProficiencyTier {
    /// Every tier, lowest first.
    pub const ALL: [ProficiencyTier; 5] = [Self::A2, Self::B1, Self::B2, Self::C1, Self::C2];

    /// Maps an aggregate score onto the fixed threshold table.
    ///
    /// | overall | tier |
    /// |---------|------|
    /// | ≥ 8.5   | C2   |
    /// | ≥ 7.5   | C1   |
    /// | ≥ 6.0   | B2   |
    /// | ≥ 4.0   | B1   |
    /// | else    | A2   |
    pub fn from_overall(overall: f64) -> Self {
        if overall >= 8.5 {
            Self::C2
        } else if overall >= 7.5 {
            Self::C1
        } else if overall >= 6.0 {
            Self::B2
        } else if overall >= 4.0 {
            Self::B1
        } else {
            Self::A2
        }
    }

    #[inline]
    pub fn from_band(band: Band) -> Self {
        Self::from_overall(band.value())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }
}

impl std::fmt::Display for ProficiencyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
