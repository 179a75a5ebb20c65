/// Where a skill comes from. Psychic skills feed `@skills.psychic.highest`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum SkillSource {
    #[default]
    General,
    Psychic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillData {
    /// `-1` means untrained.
    pub rank: i32,
    pub source: SkillSource,
}

impl SkillData {
    pub const UNTRAINED: i32 = -1;

    pub const fn new(rank: i32, source: SkillSource) -> Self {
        Self { rank, source }
    }

    pub const fn is_psychic(&self) -> bool {
        matches!(self.source, SkillSource::Psychic)
    }
}

impl Default for SkillData {
    fn default() -> Self {
        Self::new(Self::UNTRAINED, SkillSource::General)
    }
}
