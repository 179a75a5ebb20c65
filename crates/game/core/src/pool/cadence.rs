use crate::refresh::RefreshCadence;

/// Boundary at which a pool or consumption counter refills.
///
/// Ordering for refresh inclusion is `commit < scene < day`. `rest` and
/// `user` pools are only refilled by hand.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Cadence {
    Commit,
    Scene,
    #[default]
    Day,
    Rest,
    User,
}

impl Cadence {
    /// Position in the refresh ladder, `None` for cadences that never
    /// refill automatically.
    pub const fn rank(self) -> Option<u8> {
        match self {
            Self::Commit => Some(0),
            Self::Scene => Some(1),
            Self::Day => Some(2),
            Self::Rest | Self::User => None,
        }
    }

    /// Returns true if a refresh at `refresh` refills this cadence.
    pub fn included_by(self, refresh: RefreshCadence) -> bool {
        self.rank().is_some_and(|rank| rank <= refresh.rank())
    }
}

/// How long a commitment holds its effort.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommitDuration {
    /// Held until released by hand.
    Commit,
    Scene,
    Day,
}

impl CommitDuration {
    /// Release table:
    ///
    /// | duration | scene refresh | day refresh |
    /// |----------|---------------|-------------|
    /// | commit   | kept          | kept        |
    /// | scene    | released      | released    |
    /// | day      | kept          | released    |
    pub const fn released_by(self, refresh: RefreshCadence) -> bool {
        match self {
            Self::Commit => false,
            Self::Scene => true,
            Self::Day => matches!(refresh, RefreshCadence::Day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_refresh_includes_everything_scene_does() {
        use strum::IntoEnumIterator;
        for cadence in Cadence::iter() {
            if cadence.included_by(RefreshCadence::Scene) {
                assert!(cadence.included_by(RefreshCadence::Day), "{cadence}");
            }
        }
        assert!(Cadence::Day.included_by(RefreshCadence::Day));
        assert!(!Cadence::Day.included_by(RefreshCadence::Scene));
    }

    #[test]
    fn manual_cadences_never_refill() {
        for refresh in [RefreshCadence::Scene, RefreshCadence::Day] {
            assert!(!Cadence::Rest.included_by(refresh));
            assert!(!Cadence::User.included_by(refresh));
            assert!(Cadence::Commit.included_by(refresh));
        }
    }

    #[test]
    fn commit_duration_is_never_released() {
        assert!(!CommitDuration::Commit.released_by(RefreshCadence::Scene));
        assert!(!CommitDuration::Commit.released_by(RefreshCadence::Day));
        assert!(CommitDuration::Scene.released_by(RefreshCadence::Scene));
        assert!(!CommitDuration::Day.released_by(RefreshCadence::Scene));
        assert!(CommitDuration::Day.released_by(RefreshCadence::Day));
    }
}
