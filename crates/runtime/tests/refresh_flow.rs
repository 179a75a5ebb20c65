mod common;

use std::sync::Arc;

use swnr_core::{
    ActorId, ActorRecord, ErrorSeverity, PoolOverride, RefreshCadence, RefreshError,
    RefreshOptions, TempModifiers,
};
use swnr_runtime::{
    ActorRepository, CommitmentEvent, Event, InMemoryActorRepo, RefreshEvent, RepositoryError,
    Runtime, RuntimeError, RuntimeHandle, Topic,
};

use common::{effort_key, faction, npc, psychic};

async fn start(actors: Vec<ActorRecord>) -> (Runtime, RuntimeHandle, Arc<InMemoryActorRepo>) {
    let repo = Arc::new(InMemoryActorRepo::with_actors(actors));
    let runtime = Runtime::builder()
        .repository(repo.clone())
        .build()
        .await
        .expect("runtime should build");
    let handle = runtime.handle();
    (runtime, handle, repo)
}

#[tokio::test]
async fn scene_refresh_releases_commitment_and_commits() {
    let (_runtime, handle, repo) = start(vec![psychic("mira")]).await;
    let mut events = handle.subscribe(Topic::Refresh);

    let summary = handle
        .refresh_actor("mira", RefreshCadence::Scene, RefreshOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.effort_released_total(), 2);
    assert_eq!(summary.pools_refreshed(), 1);
    assert_eq!(summary.prepared_powers_unprepared(), 0);

    let stored = repo.load(&"mira".into()).unwrap().unwrap();
    assert_eq!(stored.revision, 1);
    assert!(stored.effort_commitments.is_empty());
    assert_eq!(stored.pools[&effort_key()].value, Some(4));

    match events.recv().await.unwrap() {
        Event::Refresh(RefreshEvent::ActorRefreshed { revision, .. }) => {
            assert_eq!(revision, Some(1))
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn day_refresh_heals_and_unprepares() {
    let (_runtime, handle, _repo) = start(vec![psychic("mira")]).await;

    let summary = handle
        .refresh_actor("mira", RefreshCadence::Day, RefreshOptions::default())
        .await
        .unwrap();
    assert_eq!(summary.prepared_powers_unprepared(), 1);

    let actor = handle.actor("mira").await.unwrap();
    assert_eq!(actor.health.value, 8);
    assert_eq!(actor.system_strain.value, 0);
    let ward = actor.item(&"ward".into()).and_then(|i| i.as_power()).unwrap();
    assert!(!ward.prepared);
    assert_eq!(ward.consumptions[0].uses_counter(), Some((1, 1)));
}

#[tokio::test]
async fn invalid_cadence_fails_before_touching_state() {
    let (_runtime, handle, repo) = start(vec![psychic("mira")]).await;

    let err = handle
        .refresh_actor_named("mira", "week", RefreshOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Refresh(RefreshError::InvalidCadence(_))
    ));
    assert_eq!(err.severity(), ErrorSeverity::Validation);
    assert_eq!(repo.load(&"mira".into()).unwrap().unwrap().revision, 0);
}

#[tokio::test]
async fn dry_run_reports_without_committing() {
    let (_runtime, handle, repo) = start(vec![psychic("mira")]).await;
    let before = repo.load(&"mira".into()).unwrap().unwrap();

    let summary = handle
        .refresh_actor_named(
            "mira",
            "Day",
            RefreshOptions {
                frail: false,
                dry_run: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(summary.effort_released_total(), 2);
    assert_eq!(repo.load(&"mira".into()).unwrap().unwrap(), before);
}

#[tokio::test]
async fn missing_actor_is_an_error() {
    let (_runtime, handle, _repo) = start(Vec::new()).await;
    let err = handle
        .refresh_actor("nobody", RefreshCadence::Scene, RefreshOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::ActorNotFound(_)));
}

#[tokio::test]
async fn batch_skips_factions_by_default() {
    let (_runtime, handle, repo) =
        start(vec![psychic("mira"), npc("thug"), faction("red-hand")]).await;

    let report = handle
        .refresh_many(None, RefreshCadence::Day, RefreshOptions::default())
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.actors_refreshed(), 2);
    assert_eq!(report.effort_released(), 2);
    assert_eq!(repo.load(&"thug".into()).unwrap().unwrap().health.value, 6);
    assert_eq!(repo.load(&"red-hand".into()).unwrap().unwrap().revision, 0);
}

#[tokio::test]
async fn explicit_batch_reports_missing_actors_and_continues() {
    let (_runtime, handle, _repo) = start(vec![psychic("mira"), faction("red-hand")]).await;
    let mut events = handle.subscribe(Topic::Refresh);

    let report = handle
        .refresh_many(
            Some(vec!["ghost".into(), "mira".into(), "red-hand".into()]),
            RefreshCadence::Scene,
            RefreshOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(report.actors_refreshed(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].actor_id, ActorId::from("ghost"));

    let mut saw_failure = false;
    let mut saw_completion = false;
    while let Ok(event) = events.try_recv() {
        match event {
            Event::Refresh(RefreshEvent::ActorFailed { .. }) => saw_failure = true,
            Event::Refresh(RefreshEvent::BatchCompleted { refreshed, failed, .. }) => {
                assert_eq!((refreshed, failed), (2, 1));
                saw_completion = true;
            }
            _ => {}
        }
    }
    assert!(saw_failure && saw_completion);
}

#[tokio::test]
async fn repeated_ids_in_a_batch_refresh_once() {
    let (_runtime, handle, repo) = start(vec![npc("thug"), psychic("mira")]).await;

    let report = handle
        .refresh_many(
            Some(vec!["thug".into(), "mira".into(), "thug".into()]),
            RefreshCadence::Day,
            RefreshOptions::default(),
        )
        .await
        .unwrap();

    assert!(report.is_success(), "{:?}", report.failures);
    let refreshed: Vec<_> = report.refreshed.iter().map(|s| s.actor_id.clone()).collect();
    assert_eq!(refreshed, vec![ActorId::from("thug"), ActorId::from("mira")]);
    assert_eq!(repo.load(&"thug".into()).unwrap().unwrap().revision, 1);
}

#[tokio::test]
async fn override_sets_temps_and_clamps_value() {
    let (_runtime, handle, repo) = start(vec![psychic("mira")]).await;
    let mut events = handle.subscribe(Topic::Refresh);

    let pool = handle
        .override_pool(
            "mira",
            effort_key(),
            PoolOverride {
                value: Some(99),
                temp: Some(TempModifiers {
                    commit: 1,
                    ..TempModifiers::default()
                }),
            },
        )
        .await
        .unwrap();
    assert_eq!((pool.value, pool.max), (5, 5));

    let stored = repo.load(&"mira".into()).unwrap().unwrap();
    assert_eq!(stored.revision, 1);
    assert_eq!(stored.pools[&effort_key()].temp.commit, 1);

    match events.recv().await.unwrap() {
        Event::Refresh(RefreshEvent::PoolOverridden { pool, .. }) => assert_eq!(pool.value, 5),
        other => panic!("unexpected event {other:?}"),
    }

    let err = handle
        .override_pool(
            "mira",
            "Slots:Lv9".parse().unwrap(),
            PoolOverride {
                value: Some(1),
                temp: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Refresh(RefreshError::UnknownPool(_))
    ));
}

/// Repository whose loads fail for one id.
struct FlakyRepo {
    inner: InMemoryActorRepo,
    broken: ActorId,
}

impl ActorRepository for FlakyRepo {
    fn load(&self, id: &ActorId) -> swnr_runtime::repository::Result<Option<ActorRecord>> {
        if id == &self.broken {
            return Err(RepositoryError::Serialization("truncated record".into()));
        }
        self.inner.load(id)
    }

    fn list_ids(&self) -> swnr_runtime::repository::Result<Vec<ActorId>> {
        self.inner.list_ids()
    }

    fn save(&self, record: &ActorRecord) -> swnr_runtime::repository::Result<()> {
        self.inner.save(record)
    }

    fn commit(
        &self,
        expected_revision: u64,
        record: &ActorRecord,
    ) -> swnr_runtime::repository::Result<u64> {
        self.inner.commit(expected_revision, record)
    }

    fn delete(&self, id: &ActorId) -> swnr_runtime::repository::Result<()> {
        self.inner.delete(id)
    }
}

#[tokio::test]
async fn one_broken_record_does_not_abort_the_batch() {
    let repo = Arc::new(FlakyRepo {
        inner: InMemoryActorRepo::with_actors([psychic("mira"), npc("broken"), npc("thug")]),
        broken: "broken".into(),
    });
    let runtime = Runtime::builder().repository(repo).build().await.unwrap();
    let handle = runtime.handle();

    let report = handle
        .refresh_many(None, RefreshCadence::Scene, RefreshOptions::default())
        .await
        .unwrap();

    assert_eq!(report.actors_refreshed(), 2);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].error.contains("truncated record"));
}

#[tokio::test]
async fn concurrent_refreshes_of_one_actor_are_serialized() {
    let (_runtime, handle, repo) = start(vec![psychic("mira")]).await;

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let handle = handle.clone();
            let cadence = if i % 2 == 0 {
                RefreshCadence::Scene
            } else {
                RefreshCadence::Day
            };
            tokio::spawn(async move {
                handle
                    .refresh_actor("mira", cadence, RefreshOptions::default())
                    .await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stored = repo.load(&"mira".into()).unwrap().unwrap();
    assert!(stored.effort_commitments.is_empty());
    let pools = handle.derive_pools("mira").await.unwrap();
    let pool = pools.get(&effort_key()).unwrap();
    assert!(pool.value <= pool.max);
    assert_eq!(pool.value, pool.max - pool.committed_amount());
}

#[tokio::test]
async fn manual_release_publishes_commitment_event() {
    let (_runtime, handle, _repo) = start(vec![psychic("mira")]).await;
    let mut events = handle.subscribe(Topic::Commitment);

    let released = handle
        .release_commitment("mira", effort_key(), "telekinesis")
        .await
        .unwrap();
    assert_eq!(released.len(), 1);

    let pools = handle.derive_pools("mira").await.unwrap();
    assert_eq!(pools.get(&effort_key()).unwrap().value, 3);

    match events.recv().await.unwrap() {
        Event::Commitment(CommitmentEvent::Released { released, .. }) => {
            assert_eq!(released[0].amount, 2)
        }
        other => panic!("unexpected event {other:?}"),
    }

    let err = handle
        .release_commitment("mira", effort_key(), "telekinesis")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Refresh(RefreshError::NoCommitment { .. })
    ));
}

#[tokio::test]
async fn status_lists_depleted_pools_and_refill_clears_them() {
    let (_runtime, handle, _repo) = start(vec![psychic("mira"), faction("red-hand")]).await;

    let status = handle.refresh_status().await.unwrap();
    assert_eq!(status.total(), 1);

    let refill = handle.refill_pools("mira", vec![effort_key()]).await.unwrap();
    assert!(refill.unknown.is_empty());
    // The scene commitment still holds 2 of 4.
    assert_eq!(refill.pools[0].new_value, 2);
}

#[tokio::test]
async fn saving_an_invalid_actor_is_rejected() {
    let (_runtime, handle, _repo) = start(Vec::new()).await;
    let mut actor = npc("thug");
    actor.level = 0;

    let err = handle.save_actor(actor).await.unwrap_err();
    assert!(matches!(err, RuntimeError::InvalidActor(_)));
    assert!(handle.list_actors().await.unwrap().is_empty());
}

#[tokio::test]
async fn building_without_repository_fails() {
    assert!(matches!(
        Runtime::builder().build().await,
        Err(RuntimeError::MissingRepository)
    ));
}
