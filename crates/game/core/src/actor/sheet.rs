use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::ActorRecord;
use crate::config::EngineConfig;
use crate::pool::DerivedPools;
use crate::stats::{Saves, StatKind, StatValues};

/// Everything computed from an actor record. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedSheet {
    pub stats: BTreeMap<StatKind, StatValues>,
    pub saves: Saves,
    pub strain_max: u32,
    pub pools: DerivedPools,
}

impl DerivedSheet {
    pub fn compute(actor: &ActorRecord, config: &EngineConfig) -> Self {
        let stats = StatKind::iter()
            .map(|kind| (kind, actor.stats.values(kind)))
            .collect();

        Self {
            stats,
            saves: Saves::compute(actor.level, &actor.stats),
            strain_max: actor.system_strain.max(&actor.stats),
            pools: actor.derive_pools(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorKind;
    use crate::item::{FeatureData, Item};
    use crate::pool::{Cadence, PoolGrant, PoolKey, ResourceName};
    use crate::stats::StatBlock;

    #[test]
    fn sheet_combines_stats_saves_and_pools() {
        let mut actor = ActorRecord::new("kai", "Kai", ActorKind::Character);
        actor.level = 2;
        actor.stats = StatBlock::from_bases([10, 10, 14, 10, 10, 15]);
        actor.items = vec![Item::feature(
            "psychic",
            "Psychic Training",
            FeatureData::new(vec![
                PoolGrant::new(ResourceName::Effort, "Psychic", Cadence::Scene)
                    .with_formula("1 + @stats.cha.mod + @level"),
            ]),
        )];

        let sheet = actor.derive(&EngineConfig::default());
        assert_eq!(sheet.stats[&StatKind::Cha].modifier, 1);
        assert_eq!(sheet.strain_max, 14);
        assert_eq!(sheet.saves.physical, 13);
        let pool = sheet
            .pools
            .get(&PoolKey::new(ResourceName::Effort, "Psychic"))
            .unwrap();
        assert_eq!((pool.value, pool.max), (4, 4));
        assert_eq!(pool.committed, Some(0));
    }
}
