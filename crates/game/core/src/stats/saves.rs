use super::core::{StatBlock, StatKind};

/// Saving throw targets (roll at or above to succeed).
///
/// Each save starts at `16 - level` and is lowered by the better of its two
/// attribute modifiers. No save target goes below 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Saves {
    pub physical: i32,
    pub evasion: i32,
    pub mental: i32,
    pub luck: i32,
}

impl Saves {
    pub const BASE: i32 = 16;

    pub fn compute(level: u32, stats: &StatBlock) -> Self {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        let base = Self::BASE.saturating_sub(level);
        let better = |a: StatKind, b: StatKind| {
            stats.get(a).modifier().max(stats.get(b).modifier())
        };

        Self {
            physical: (base - better(StatKind::Str, StatKind::Con)).max(1),
            evasion: (base - better(StatKind::Dex, StatKind::Int)).max(1),
            mental: (base - better(StatKind::Wis, StatKind::Cha)).max(1),
            luck: base.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_use_best_modifier_of_pair() {
        // str 14 (+1), dex 18 (+2), con 7 (-1), int 10, wis 10, cha 3 (-2)
        let stats = StatBlock::from_bases([14, 18, 7, 10, 10, 3]);
        let saves = Saves::compute(3, &stats);
        assert_eq!(saves.physical, 12);
        assert_eq!(saves.evasion, 11);
        assert_eq!(saves.mental, 13);
        assert_eq!(saves.luck, 13);
    }

    #[test]
    fn saves_never_drop_below_one() {
        let stats = StatBlock::from_bases([18; 6]);
        let saves = Saves::compute(20, &stats);
        assert_eq!(saves, Saves { physical: 1, evasion: 1, mental: 1, luck: 1 });
    }
}
