use std::collections::HashSet;

use super::ActorRecord;
use crate::error::{EngineError, ErrorSeverity};
use crate::item::{ItemData, ItemId, PowerData, SkillData};
use crate::pool::PoolKey;

/// Structural problems found in an actor record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid actor id '{0}'")]
    InvalidActorId(String),

    #[error("actor level must be at least 1")]
    LevelTooLow,

    #[error("health {value} exceeds max {max}")]
    HealthOverMax { value: u32, max: u32 },

    #[error("system strain {value} exceeds max {max}")]
    StrainOverMax { value: u32, max: u32 },

    #[error("pool {key} value {value} exceeds max {max}")]
    PoolOverMax { key: PoolKey, value: u32, max: u32 },

    #[error("item id '{0}' is empty")]
    EmptyItemId(ItemId),

    #[error("duplicate item id '{0}'")]
    DuplicateItem(ItemId),

    #[error("skill {item} has rank {rank}, minimum is -1")]
    SkillRankTooLow { item: ItemId, rank: i32 },

    #[error("power {item} has level {level}, expected 1-9")]
    PowerLevelOutOfRange { item: ItemId, level: u32 },

    #[error("power {item} consumption {slot} has {value} uses of {max}")]
    UsesOverMax {
        item: ItemId,
        slot: usize,
        value: u32,
        max: u32,
    },
}

impl EngineError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ValidationError::*;
        match self {
            InvalidActorId(_) => "ACTOR_INVALID_ID",
            LevelTooLow => "ACTOR_LEVEL_TOO_LOW",
            HealthOverMax { .. } => "ACTOR_HEALTH_OVER_MAX",
            StrainOverMax { .. } => "ACTOR_STRAIN_OVER_MAX",
            PoolOverMax { .. } => "ACTOR_POOL_OVER_MAX",
            EmptyItemId(_) => "ITEM_EMPTY_ID",
            DuplicateItem(_) => "ITEM_DUPLICATE",
            SkillRankTooLow { .. } => "SKILL_RANK_TOO_LOW",
            PowerLevelOutOfRange { .. } => "POWER_LEVEL_OUT_OF_RANGE",
            UsesOverMax { .. } => "POWER_USES_OVER_MAX",
        }
    }
}

pub(super) fn validate_actor(actor: &ActorRecord) -> Result<(), ValidationError> {
    if !actor.id.is_valid() {
        return Err(ValidationError::InvalidActorId(actor.id.0.clone()));
    }
    if actor.level == 0 {
        return Err(ValidationError::LevelTooLow);
    }

    let health = actor.health;
    if health.value > health.max {
        return Err(ValidationError::HealthOverMax {
            value: health.value,
            max: health.max,
        });
    }

    let strain_max = actor.system_strain.max(&actor.stats);
    if actor.system_strain.value > strain_max {
        return Err(ValidationError::StrainOverMax {
            value: actor.system_strain.value,
            max: strain_max,
        });
    }

    for (key, pool) in &actor.pools {
        if let Some(value) = pool.value
            && value > pool.max
        {
            return Err(ValidationError::PoolOverMax {
                key: key.clone(),
                value,
                max: pool.max,
            });
        }
    }

    let mut seen = HashSet::new();
    for item in &actor.items {
        if item.id.as_str().is_empty() {
            return Err(ValidationError::EmptyItemId(item.id.clone()));
        }
        if !seen.insert(&item.id) {
            return Err(ValidationError::DuplicateItem(item.id.clone()));
        }

        match &item.data {
            ItemData::Skill(skill) => validate_skill(&item.id, skill)?,
            ItemData::Power(power) => validate_power(&item.id, power)?,
            ItemData::Feature(_) | ItemData::Gear => {}
        }
    }

    Ok(())
}

fn validate_skill(id: &ItemId, skill: &SkillData) -> Result<(), ValidationError> {
    if skill.rank < SkillData::UNTRAINED {
        return Err(ValidationError::SkillRankTooLow {
            item: id.clone(),
            rank: skill.rank,
        });
    }
    Ok(())
}

fn validate_power(id: &ItemId, power: &PowerData) -> Result<(), ValidationError> {
    if !(PowerData::MIN_LEVEL..=PowerData::MAX_LEVEL).contains(&power.level) {
        return Err(ValidationError::PowerLevelOutOfRange {
            item: id.clone(),
            level: power.level,
        });
    }

    for (slot, consumption) in power.consumptions.iter().enumerate() {
        if let Some((value, max)) = consumption.uses_counter()
            && value > max
        {
            return Err(ValidationError::UsesOverMax {
                item: id.clone(),
                slot,
                value,
                max,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorKind;
    use crate::item::{Consumption, Item, PowerSubType, SkillSource};
    use crate::pool::{Cadence, PersistedPool, ResourceName};
    use crate::stats::Meter;

    fn base() -> ActorRecord {
        let mut actor = ActorRecord::new("vex-01", "Vex", ActorKind::Character);
        actor.health = Meter::new(5, 8);
        actor
    }

    #[test]
    fn well_formed_actor_passes() {
        let mut actor = base();
        actor.items = vec![
            Item::skill("s", "Shoot", SkillData::default()),
            Item::power("p", "Ward", PowerData::new(PowerSubType::Spell)),
        ];
        assert_eq!(actor.validate(), Ok(()));
    }

    #[test]
    fn rejects_ids_that_cannot_name_files() {
        let mut actor = base();
        actor.id = "../etc".into();
        assert!(matches!(
            actor.validate(),
            Err(ValidationError::InvalidActorId(_))
        ));
    }

    #[test]
    fn rejects_health_over_max() {
        let mut actor = base();
        actor.health = Meter::new(9, 8);
        assert_eq!(
            actor.validate(),
            Err(ValidationError::HealthOverMax { value: 9, max: 8 })
        );
    }

    #[test]
    fn rejects_duplicate_items() {
        let mut actor = base();
        actor.items = vec![
            Item::skill("s", "Shoot", SkillData::default()),
            Item::skill("s", "Stab", SkillData::default()),
        ];
        assert_eq!(
            actor.validate(),
            Err(ValidationError::DuplicateItem("s".into()))
        );
    }

    #[test]
    fn rejects_out_of_range_skill_and_power() {
        let mut actor = base();
        actor.items = vec![Item::skill("s", "Shoot", SkillData::new(-2, SkillSource::General))];
        assert!(matches!(
            actor.validate(),
            Err(ValidationError::SkillRankTooLow { rank: -2, .. })
        ));

        let mut power = PowerData::new(PowerSubType::Psychic);
        power.level = 10;
        actor.items = vec![Item::power("p", "Overload", power)];
        assert_eq!(
            actor.validate().map_err(|e| e.error_code()),
            Err("POWER_LEVEL_OUT_OF_RANGE")
        );
    }

    #[test]
    fn rejects_uses_and_pools_over_max() {
        let mut actor = base();
        let mut power = PowerData::new(PowerSubType::Mutation);
        power.consumptions = vec![Consumption::uses(4, 3, Cadence::Day)];
        actor.items = vec![Item::power("p", "Regrowth", power)];
        assert!(matches!(
            actor.validate(),
            Err(ValidationError::UsesOverMax { slot: 0, .. })
        ));

        let mut actor = base();
        actor.pools.insert(
            PoolKey::new(ResourceName::Effort, "Psychic"),
            PersistedPool {
                value: Some(3),
                max: 2,
                ..PersistedPool::default()
            },
        );
        assert!(matches!(
            actor.validate(),
            Err(ValidationError::PoolOverMax { value: 3, max: 2, .. })
        ));
    }
}
