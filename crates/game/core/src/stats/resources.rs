//! Health and system strain meters.
//!
//! Health stores both current and max. System strain stores only the current
//! value and its adjustments; the max is derived from CON:
//!
//! - `strain_max = con.total + permanent - cyberware`

use super::core::StatBlock;

/// A current/max pair, e.g. hit points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    pub value: u32,
    pub max: u32,
}

impl Meter {
    pub const fn new(value: u32, max: u32) -> Self {
        Self { value, max }
    }

    pub const fn full(max: u32) -> Self {
        Self { value: max, max }
    }

    /// Add `amount` without exceeding max.
    pub fn restore(&self, amount: u32) -> u32 {
        self.value.saturating_add(amount).min(self.max)
    }

    pub const fn is_full(&self) -> bool {
        self.value >= self.max
    }
}

/// System strain accumulated by a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SystemStrain {
    pub value: u32,
    /// Permanent adjustment to the strain ceiling.
    pub permanent: i32,
    /// Strain locked in by installed cyberware.
    pub cyberware: i32,
}

impl SystemStrain {
    pub const fn new(value: u32) -> Self {
        Self {
            value,
            permanent: 0,
            cyberware: 0,
        }
    }

    /// Maximum strain the character can carry.
    pub fn max(&self, stats: &StatBlock) -> u32 {
        let max = stats.con.total() + self.permanent - self.cyberware;
        u32::try_from(max).unwrap_or(0)
    }

    /// Strain left after resting off `amount`.
    pub const fn recover(&self, amount: u32) -> u32 {
        self.value.saturating_sub(amount)
    }
}
