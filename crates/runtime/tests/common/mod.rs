#![allow(dead_code)]

use std::collections::BTreeMap;

use swnr_core::{
    ActorKind, ActorRecord, Cadence, CommitDuration, Commitment, Consumption, FeatureData, Item,
    Meter, PersistedPool, PoolGrant, PoolKey, PowerData, PowerSubType, ResourceName,
    TempModifiers,
};

pub fn effort_key() -> PoolKey {
    PoolKey::new(ResourceName::Effort, "Psychic")
}

/// Level 3 psychic with 4 scene effort, 1 available, 2 committed for the
/// scene, and a prepared spell with a spent prep use.
pub fn psychic(id: &str) -> ActorRecord {
    let mut actor = ActorRecord::new(id, "Mira", ActorKind::Character);
    actor.level = 3;
    actor.health = Meter::new(5, 14);
    actor.system_strain.value = 1;

    let mut spell = PowerData::new(PowerSubType::Spell);
    spell.prepared = true;
    spell.consumptions = vec![Consumption::uses(0, 1, Cadence::User).spent_on_prep()];

    actor.items = vec![
        Item::feature(
            "psychic-training",
            "Psychic Training",
            FeatureData::new(vec![
                PoolGrant::new(ResourceName::Effort, "Psychic", Cadence::Scene).with_formula("4"),
            ]),
        ),
        Item::power("telekinesis", "Telekinesis", PowerData::new(PowerSubType::Psychic)),
        Item::power("ward", "Ward", spell),
    ];

    actor.pools.insert(
        effort_key(),
        PersistedPool {
            value: Some(1),
            max: 4,
            cadence: Cadence::Scene,
            temp: TempModifiers::default(),
        },
    );

    let mut commitments = BTreeMap::new();
    commitments.insert(
        effort_key(),
        vec![Commitment::new(
            "telekinesis",
            "Telekinesis",
            2,
            CommitDuration::Scene,
        )],
    );
    actor.effort_commitments = commitments;
    actor
}

pub fn npc(id: &str) -> ActorRecord {
    let mut actor = ActorRecord::new(id, "Thug", ActorKind::Npc);
    actor.health = Meter::new(1, 6);
    actor
}

pub fn faction(id: &str) -> ActorRecord {
    ActorRecord::new(id, "Red Hand", ActorKind::Faction)
}
