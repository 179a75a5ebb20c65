//! Stat scores - the stored layer of the stat system.
//!
//! A score is four stored numbers (base, bonus, boost, temp). The total and
//! the modifier are derived:
//!
//! - `total = base + boost + temp`
//! - `mod = clamp(trunc((total - 10.5) / 3.5), -2, 2) + bonus`

/// The six attributes of an SWN character.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StatKind {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

/// Stored components of one attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatScore {
    pub base: i32,
    /// Flat bonus added to the modifier, not the total.
    pub bonus: i32,
    pub boost: i32,
    pub temp: i32,
}

impl StatScore {
    pub const DEFAULT_BASE: i32 = 9;

    pub const fn new(base: i32) -> Self {
        Self {
            base,
            bonus: 0,
            boost: 0,
            temp: 0,
        }
    }

    pub const fn total(&self) -> i32 {
        self.base + self.boost + self.temp
    }

    /// Attribute modifier, truncated toward zero and capped at ±2 before the
    /// flat bonus is added.
    pub fn modifier(&self) -> i32 {
        let raw = (f64::from(self.total()) - 10.5) / 3.5;
        let stepped = raw.trunc() as i32;
        stepped.clamp(-2, 2) + self.bonus
    }

    pub fn values(&self) -> StatValues {
        StatValues {
            total: self.total(),
            modifier: self.modifier(),
        }
    }
}

impl Default for StatScore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE)
    }
}

/// Derived view of one attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatValues {
    pub total: i32,
    pub modifier: i32,
}

/// All six attribute scores of an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub str: StatScore,
    pub dex: StatScore,
    pub con: StatScore,
    pub int: StatScore,
    pub wis: StatScore,
    pub cha: StatScore,
}

impl StatBlock {
    /// Build a block from six base scores in `str, dex, con, int, wis, cha` order.
    pub const fn from_bases(bases: [i32; 6]) -> Self {
        Self {
            str: StatScore::new(bases[0]),
            dex: StatScore::new(bases[1]),
            con: StatScore::new(bases[2]),
            int: StatScore::new(bases[3]),
            wis: StatScore::new(bases[4]),
            cha: StatScore::new(bases[5]),
        }
    }

    pub const fn get(&self, kind: StatKind) -> &StatScore {
        match kind {
            StatKind::Str => &self.str,
            StatKind::Dex => &self.dex,
            StatKind::Con => &self.con,
            StatKind::Int => &self.int,
            StatKind::Wis => &self.wis,
            StatKind::Cha => &self.cha,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut StatScore {
        match kind {
            StatKind::Str => &mut self.str,
            StatKind::Dex => &mut self.dex,
            StatKind::Con => &mut self.con,
            StatKind::Int => &mut self.int,
            StatKind::Wis => &mut self.wis,
            StatKind::Cha => &mut self.cha,
        }
    }

    pub fn values(&self, kind: StatKind) -> StatValues {
        self.get(kind).values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_table_matches_swn_brackets() {
        let cases = [
            (3, -2),
            (4, -1),
            (7, -1),
            (8, 0),
            (10, 0),
            (13, 0),
            (14, 1),
            (17, 1),
            (18, 2),
        ];
        for (total, expected) in cases {
            let score = StatScore::new(total);
            assert_eq!(score.modifier(), expected, "total {total}");
        }
    }

    #[test]
    fn bonus_applies_after_cap() {
        let score = StatScore {
            base: 18,
            bonus: 1,
            boost: 0,
            temp: 0,
        };
        assert_eq!(score.modifier(), 3);
    }

    #[test]
    fn total_includes_boost_and_temp() {
        let score = StatScore {
            base: 12,
            bonus: 0,
            boost: 1,
            temp: 1,
        };
        assert_eq!(score.total(), 14);
        assert_eq!(score.modifier(), 1);
    }

    #[test]
    fn stat_kind_parses_case_insensitively() {
        assert_eq!("CHA".parse::<StatKind>().ok(), Some(StatKind::Cha));
        assert_eq!(StatKind::Wis.as_ref(), "wis");
        assert!("luck".parse::<StatKind>().is_err());
    }
}
