use std::collections::BTreeSet;

use super::{
    ActorUpdate, ConsumptionRefresh, ItemChange, MeterChange, PoolRefresh, RefreshCadence,
    RefreshOptions, RefreshSummary, ReleasedEffort, UnpreparedPower,
};
use crate::actor::{ActorKind, ActorRecord};
use crate::config::EngineConfig;
use crate::pool::state::clamp_u32;
use crate::pool::{DerivedPools, PoolKey, max_with_temp, partition_released, total_committed};

/// Result of planning a refresh: the batch to commit and its report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshPlan {
    pub update: ActorUpdate,
    pub summary: RefreshSummary,
}

/// Plans a refresh of `actor` at `cadence`.
///
/// The actor is not modified. Applying `update` to the record yields the
/// refreshed state.
pub fn plan_refresh(
    actor: &ActorRecord,
    cadence: RefreshCadence,
    options: RefreshOptions,
    config: &EngineConfig,
) -> RefreshPlan {
    let mut summary = RefreshSummary::new(actor, cadence);
    let mut update = ActorUpdate::default();

    restore_meters(actor, cadence, options, config, &mut update, &mut summary);

    let tracks = actor.tracks_commitments(config);
    let mut pools = actor.derive_pools(config);

    let committed_before: BTreeSet<PoolKey> = pools
        .iter()
        .filter(|(_, pool)| pool.has_commitments())
        .map(|(key, _)| key.clone())
        .collect();

    if tracks {
        release_commitments(actor, cadence, &mut pools, &mut update, &mut summary);
    }

    refill_pools(cadence, tracks, &committed_before, &mut pools, &mut summary);

    for (key, pool) in pools.iter() {
        let persisted = pool.persisted();
        if actor.pools.get(key) != Some(&persisted) {
            update.pools.insert(key.clone(), persisted);
        }
    }

    refill_items(actor, cadence, &mut update, &mut summary);

    tracing::debug!(
        "Planned {} refresh for {}: {}",
        cadence,
        actor.id,
        update
    );

    RefreshPlan { update, summary }
}

fn restore_meters(
    actor: &ActorRecord,
    cadence: RefreshCadence,
    options: RefreshOptions,
    config: &EngineConfig,
    update: &mut ActorUpdate,
    summary: &mut RefreshSummary,
) {
    if cadence != RefreshCadence::Day {
        return;
    }

    match actor.kind {
        ActorKind::Character => {
            let hp = if options.frail {
                actor.health.value
            } else {
                actor.health.restore(actor.level)
            };
            let strain = actor
                .system_strain
                .recover(config.strain_recovery_per_day);

            summary.health = Some(MeterChange {
                before: actor.health.value,
                after: hp,
            });
            summary.system_strain = Some(MeterChange {
                before: actor.system_strain.value,
                after: strain,
            });
            if hp != actor.health.value {
                update.health = Some(hp);
            }
            if strain != actor.system_strain.value {
                update.system_strain = Some(strain);
            }
        }
        ActorKind::Npc if config.npc_full_heal_on_day => {
            summary.health = Some(MeterChange {
                before: actor.health.value,
                after: actor.health.max,
            });
            if !actor.health.is_full() {
                update.health = Some(actor.health.max);
            }
        }
        _ => {}
    }
}

fn release_commitments(
    actor: &ActorRecord,
    cadence: RefreshCadence,
    pools: &mut DerivedPools,
    update: &mut ActorUpdate,
    summary: &mut RefreshSummary,
) {
    for (key, commitments) in &actor.effort_commitments {
        let (released, retained) = partition_released(commitments, cadence);
        if released.is_empty() {
            continue;
        }

        summary
            .effort_released
            .extend(released.into_iter().map(|c| ReleasedEffort {
                key: key.clone(),
                power_id: c.power_id,
                power_name: c.power_name,
                amount: c.amount,
            }));

        if let Some(pool) = pools.get_mut(key) {
            pool.committed = Some(total_committed(&retained));
            pool.commitments = Some(retained.clone());
        }
        update.commitments.insert(key.clone(), retained);
    }
}

fn refill_pools(
    cadence: RefreshCadence,
    tracks: bool,
    committed_before: &BTreeSet<PoolKey>,
    pools: &mut DerivedPools,
    summary: &mut RefreshSummary,
) {
    for (key, pool) in pools.iter_mut() {
        let old_value = pool.value;
        let old_temp = pool.temp;

        let refilled = pool.cadence.included_by(cadence);
        if refilled {
            pool.value = pool.max;
        }

        let new_temp = old_temp.after_refresh(cadence);
        let temp_reset = new_temp != old_temp;
        if temp_reset {
            let new_max = max_with_temp(pool.base_max, &new_temp);
            let committed = pool.committed_amount();
            pool.value = if committed > 0 {
                new_max.saturating_sub(committed)
            } else if refilled {
                new_max
            } else {
                let delta = new_temp.sum() - old_temp.sum();
                clamp_u32(i64::from(pool.value) + delta).min(new_max)
            };
            pool.max = new_max;
            pool.temp = new_temp;
        }

        // Pools that carried or still carry commitments sit at max minus
        // what remains committed.
        if tracks && (committed_before.contains(key) || pool.has_commitments()) {
            pool.value = pool.max.saturating_sub(pool.committed_amount());
        }

        if pool.value != old_value || temp_reset {
            summary.pools.push(PoolRefresh {
                key: key.clone(),
                old_value,
                new_value: pool.value,
                max: pool.max,
                cadence: pool.cadence,
                temp_reset,
            });
        }
    }
}

fn refill_items(
    actor: &ActorRecord,
    cadence: RefreshCadence,
    update: &mut ActorUpdate,
    summary: &mut RefreshSummary,
) {
    for (item, power) in actor.powers() {
        let mut change = ItemChange::new(item.id.clone());

        for (slot, consumption) in power.consumptions.iter().enumerate() {
            let (Some((value, max)), Some(refill)) = (consumption.uses_counter(), consumption.cadence)
            else {
                continue;
            };
            if refill.included_by(cadence) && value < max {
                change.uses.push((slot, max));
                summary.consumption_refreshes.push(ConsumptionRefresh {
                    item_id: item.id.clone(),
                    item_name: item.name.clone(),
                    slot,
                    old_value: value,
                    new_value: max,
                    cadence: refill,
                });
            }
        }

        if cadence == RefreshCadence::Day && power.prepared {
            change.prepared = Some(false);
            for (slot, consumption) in power.consumptions.iter().enumerate() {
                if !consumption.spend_on_prep || change.sets_uses(slot) {
                    continue;
                }
                if let Some((value, max)) = consumption.uses_counter()
                    && value < max
                {
                    change.uses.push((slot, max));
                }
            }
            summary.unprepared_powers.push(UnpreparedPower {
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                had_resource_cost: power.has_consumption(),
            });
        }

        if !change.is_empty() {
            update.items.push(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Consumption, FeatureData, Item, PowerData, PowerSubType};
    use crate::pool::{
        Cadence, CommitDuration, Commitment, PersistedPool, PoolGrant, ResourceName,
        TempModifiers,
    };
    use crate::stats::Meter;

    fn effort_key() -> PoolKey {
        PoolKey::new(ResourceName::Effort, "Psychic")
    }

    fn grant(cadence: Cadence, formula: &str) -> Item {
        Item::feature(
            format!("grant-{cadence}"),
            "Psychic Training",
            FeatureData::new(vec![
                PoolGrant::new(ResourceName::Effort, "Psychic", cadence).with_formula(formula),
            ]),
        )
    }

    fn character() -> ActorRecord {
        let mut actor = ActorRecord::new("mira", "Mira", ActorKind::Character);
        actor.level = 3;
        actor.health = Meter::new(4, 12);
        actor.system_strain.value = 2;
        actor
    }

    fn persisted(value: u32, max: u32, cadence: Cadence) -> PersistedPool {
        PersistedPool {
            value: Some(value),
            max,
            cadence,
            temp: TempModifiers::default(),
        }
    }

    fn refreshed(actor: &ActorRecord, cadence: RefreshCadence) -> (ActorRecord, RefreshSummary) {
        let config = EngineConfig::default();
        let plan = plan_refresh(actor, cadence, RefreshOptions::default(), &config);
        let mut next = actor.clone();
        plan.update.apply(&mut next).unwrap();
        (next, plan.summary)
    }

    #[test]
    fn scene_commitment_released_restores_full_effort() {
        let mut actor = character();
        actor.items = vec![grant(Cadence::Scene, "4")];
        actor.pools.insert(effort_key(), persisted(1, 4, Cadence::Scene));
        actor.effort_commitments.insert(
            effort_key(),
            vec![Commitment::new("tk", "Telekinesis", 2, CommitDuration::Scene)],
        );

        let (next, summary) = refreshed(&actor, RefreshCadence::Scene);

        assert_eq!(summary.effort_released.len(), 1);
        assert_eq!(summary.effort_released[0].amount, 2);
        assert!(!next.effort_commitments.contains_key(&effort_key()));
        let pool = next.derive_pools(&EngineConfig::default());
        let pool = pool.get(&effort_key()).unwrap();
        assert_eq!(pool.committed, Some(0));
        assert_eq!((pool.value, pool.max), (4, 4));
    }

    #[test]
    fn commit_duration_survives_repeated_refreshes() {
        let mut actor = character();
        actor.items = vec![grant(Cadence::Scene, "3")];
        actor.effort_commitments.insert(
            effort_key(),
            vec![Commitment::new("aura", "Aura", 1, CommitDuration::Commit)],
        );

        let mut current = actor;
        for cadence in [
            RefreshCadence::Scene,
            RefreshCadence::Day,
            RefreshCadence::Day,
            RefreshCadence::Scene,
        ] {
            let (next, summary) = refreshed(&current, cadence);
            assert!(summary.effort_released.is_empty());
            assert_eq!(next.effort_commitments[&effort_key()].len(), 1);
            let pools = next.derive_pools(&EngineConfig::default());
            let pool = pools.get(&effort_key()).unwrap();
            assert_eq!(pool.value, pool.max - pool.committed_amount());
            current = next;
        }
    }

    #[test]
    fn retained_commitment_holds_value_below_max() {
        let mut actor = character();
        actor.items = vec![grant(Cadence::Scene, "4")];
        actor.pools.insert(effort_key(), persisted(0, 4, Cadence::Scene));
        actor.effort_commitments.insert(
            effort_key(),
            vec![
                Commitment::new("ward", "Ward", 1, CommitDuration::Day),
                Commitment::new("tk", "Telekinesis", 2, CommitDuration::Scene),
            ],
        );

        let (next, summary) = refreshed(&actor, RefreshCadence::Scene);
        assert_eq!(summary.effort_released.len(), 1);
        assert_eq!(next.effort_commitments[&effort_key()].len(), 1);
        assert_eq!(next.pools[&effort_key()].value, Some(3));
    }

    #[test]
    fn day_refresh_covers_scene_refresh() {
        let mut actor = character();
        actor.items = vec![
            grant(Cadence::Scene, "2"),
            Item::feature(
                "slots",
                "Spellcasting",
                FeatureData::new(vec![
                    PoolGrant::new(ResourceName::Slots, "Lv1", Cadence::Day).with_formula("3"),
                    PoolGrant::new(ResourceName::Points, "Rest", Cadence::Rest).with_formula("2"),
                ]),
            ),
        ];
        actor.pools.insert(effort_key(), persisted(0, 2, Cadence::Scene));
        let slots = PoolKey::new(ResourceName::Slots, "Lv1");
        let rest = PoolKey::new(ResourceName::Points, "Rest");
        actor.pools.insert(slots.clone(), persisted(1, 3, Cadence::Day));
        actor.pools.insert(rest.clone(), persisted(0, 2, Cadence::Rest));

        let (_, scene) = refreshed(&actor, RefreshCadence::Scene);
        let (after_day, day) = refreshed(&actor, RefreshCadence::Day);

        let scene_keys: BTreeSet<_> = scene.pools.iter().map(|p| p.key.clone()).collect();
        let day_keys: BTreeSet<_> = day.pools.iter().map(|p| p.key.clone()).collect();
        assert!(scene_keys.is_subset(&day_keys));
        assert!(day_keys.contains(&slots));
        assert!(!scene_keys.contains(&slots));
        assert_eq!(after_day.pools[&rest].value, Some(0));
    }

    #[test]
    fn day_refresh_heals_character_and_eases_strain() {
        let actor = character();
        let (next, summary) = refreshed(&actor, RefreshCadence::Day);
        assert_eq!(next.health.value, 7);
        assert_eq!(next.system_strain.value, 1);
        assert_eq!(summary.health, Some(MeterChange { before: 4, after: 7 }));
    }

    #[test]
    fn frail_rest_skips_healing() {
        let actor = character();
        let options = RefreshOptions {
            frail: true,
            dry_run: false,
        };
        let plan = plan_refresh(&actor, RefreshCadence::Day, options, &EngineConfig::default());
        assert_eq!(plan.update.health, None);
        assert_eq!(plan.update.system_strain, Some(1));
    }

    #[test]
    fn scene_refresh_leaves_meters_alone() {
        let plan = plan_refresh(
            &character(),
            RefreshCadence::Scene,
            RefreshOptions::default(),
            &EngineConfig::default(),
        );
        assert!(plan.summary.health.is_none());
        assert!(plan.update.is_empty());
    }

    #[test]
    fn npc_heals_to_full_on_day() {
        let mut npc = ActorRecord::new("grunt", "Grunt", ActorKind::Npc);
        npc.health = Meter::new(1, 9);
        let (next, _) = refreshed(&npc, RefreshCadence::Day);
        assert_eq!(next.health.value, 9);
    }

    #[test]
    fn day_uses_refill_on_day_refresh() {
        let mut power = PowerData::new(PowerSubType::Mutation);
        power.consumptions = vec![Consumption::uses(1, 3, Cadence::Day)];
        let mut actor = character();
        actor.items = vec![Item::power("regrowth", "Regrowth", power)];

        let (_, scene) = refreshed(&actor, RefreshCadence::Scene);
        assert_eq!(scene.consumption_uses_refreshed(), 0);

        let (next, day) = refreshed(&actor, RefreshCadence::Day);
        assert_eq!(day.consumption_uses_refreshed(), 1);
        assert_eq!(
            day.consumption_refreshes[0],
            ConsumptionRefresh {
                item_id: "regrowth".into(),
                item_name: "Regrowth".into(),
                slot: 0,
                old_value: 1,
                new_value: 3,
                cadence: Cadence::Day,
            }
        );
        let power = next.items[0].as_power().unwrap();
        assert_eq!(power.consumptions[0].uses_counter(), Some((3, 3)));
    }

    #[test]
    fn day_refresh_unprepares_and_restores_prep_uses() {
        let mut power = PowerData::new(PowerSubType::Spell);
        power.prepared = true;
        power.consumptions = vec![Consumption::uses(0, 1, Cadence::User).spent_on_prep()];
        let mut actor = character();
        actor.items = vec![Item::power("bolt", "Bolt", power)];

        let (_, scene) = refreshed(&actor, RefreshCadence::Scene);
        assert_eq!(scene.prepared_powers_unprepared(), 0);

        let (next, day) = refreshed(&actor, RefreshCadence::Day);
        assert_eq!(day.prepared_powers_unprepared(), 1);
        assert!(day.unprepared_powers[0].had_resource_cost);
        let power = next.items[0].as_power().unwrap();
        assert!(!power.prepared);
        assert_eq!(power.consumptions[0].uses_counter(), Some((1, 1)));
    }

    #[test]
    fn temp_reset_shifts_value_by_delta() {
        let mut actor = character();
        actor.items = vec![grant(Cadence::Day, "3")];
        actor.pools.insert(
            effort_key(),
            PersistedPool {
                value: Some(4),
                max: 5,
                cadence: Cadence::Day,
                temp: TempModifiers {
                    commit: 0,
                    scene: 2,
                    day: 0,
                },
            },
        );

        let (next, summary) = refreshed(&actor, RefreshCadence::Scene);
        let pool = next.pools[&effort_key()];
        assert_eq!(pool.temp.scene, 0);
        assert_eq!(pool.max, 3);
        assert_eq!(pool.value, Some(2));
        assert!(summary.pools[0].temp_reset);
    }

    #[test]
    fn refresh_keeps_values_in_bounds() {
        let mut actor = character();
        actor.items = vec![grant(Cadence::User, "2")];
        actor.pools.insert(
            effort_key(),
            PersistedPool {
                value: Some(0),
                max: 0,
                cadence: Cadence::User,
                temp: TempModifiers {
                    commit: 0,
                    scene: -1,
                    day: -3,
                },
            },
        );
        for cadence in [RefreshCadence::Scene, RefreshCadence::Day] {
            let (next, _) = refreshed(&actor, cadence);
            let pools = next.derive_pools(&EngineConfig::default());
            for (_, pool) in pools.iter() {
                assert!(pool.value <= pool.max);
            }
        }
    }

    #[test]
    fn second_refresh_is_a_no_op() {
        let mut actor = character();
        actor.items = vec![grant(Cadence::Scene, "3")];
        let (next, _) = refreshed(&actor, RefreshCadence::Scene);
        let plan = plan_refresh(
            &next,
            RefreshCadence::Scene,
            RefreshOptions::default(),
            &EngineConfig::default(),
        );
        assert!(plan.update.is_empty());
        assert_eq!(plan.summary.pools_refreshed(), 0);
    }
}
