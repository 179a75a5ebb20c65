use crate::pool::PoolGrant;

/// Class feature, focus or edge. Only its pool grants matter to the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeatureData {
    /// Focus level (0 for features without levels).
    pub level: u32,
    pub pools_granted: Vec<PoolGrant>,
}

impl FeatureData {
    pub fn new(pools_granted: Vec<PoolGrant>) -> Self {
        Self {
            level: 0,
            pools_granted,
        }
    }

    pub fn grants_pools(&self) -> bool {
        !self.pools_granted.is_empty()
    }
}
