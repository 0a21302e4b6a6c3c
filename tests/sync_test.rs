// ABOUTME: Integration tests for the sync orchestrator and ingestion merger
// ABOUTME: Covers idempotence, set identity, cooldown gating, partial passes, and single-flight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{
    create_sync_service, create_test_database, exercise_json, rewind_last_sync, set_json,
    workout_json, ScriptedSource,
};
use liftlog::errors::ErrorCode;
use liftlog::models::WorkoutFilter;
use liftlog::sync::SyncOutcome;
use serde_json::{json, Value};
use std::sync::Arc;

fn two_pages() -> Vec<Vec<Value>> {
    vec![
        vec![
            workout_json(
                "w-1",
                "Push",
                "2024-03-01T10:00:00Z",
                vec![exercise_json(
                    "Bench Press",
                    "BENCH",
                    vec![set_json(100.0, 5), set_json(100.0, 5), set_json(90.0, 8)],
                )],
            ),
            workout_json(
                "w-2",
                "Pull",
                "2024-03-03T10:00:00Z",
                vec![exercise_json("Row", "ROW", vec![set_json(80.0, 10)])],
            ),
        ],
        vec![workout_json(
            "w-3",
            "Legs",
            "2024-03-05T10:00:00Z",
            vec![exercise_json("Squat", "SQUAT", vec![set_json(140.0, 5), set_json(150.0, 3)])],
        )],
    ]
}

#[tokio::test]
async fn test_full_pass_walks_every_page() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(two_pages());
    let service = create_sync_service(&db, &source);

    let report = service.force_sync().await.unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.workouts_merged, 3);
    assert_eq!(report.sets_inserted, 6);
    assert_eq!(source.fetch_count(), 2);
    assert_eq!(db.workout_count().await.unwrap(), 3);
    assert_eq!(db.set_count().await.unwrap(), 6);
}

#[tokio::test]
async fn test_repeated_pass_is_idempotent() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(two_pages());
    let service = create_sync_service(&db, &source);

    service.force_sync().await.unwrap();
    let first = db.get_workout("w-1").await.unwrap();

    let report = service.force_sync().await.unwrap();
    let second = db.get_workout("w-1").await.unwrap();

    assert_eq!(report.sets_inserted, 0);
    assert_eq!(report.sets_dropped, 6);
    assert_eq!(db.workout_count().await.unwrap(), 3);
    assert_eq!(db.set_count().await.unwrap(), 6);
    assert_eq!(first.workout, second.workout);
    assert_eq!(first.sets, second.sets);
}

#[tokio::test]
async fn test_set_identity_is_unique() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(two_pages());
    let service = create_sync_service(&db, &source);
    service.force_sync().await.unwrap();
    service.force_sync().await.unwrap();

    let duplicates: i64 = sqlx::query_scalar(
        r"
        SELECT COUNT(*) FROM (
            SELECT workout_id,
                IFNULL(exercise_template_id, 'title:' || lower(trim(exercise_title))),
                set_index,
                COUNT(*) AS n
            FROM exercise_sets
            GROUP BY 1, 2, 3
            HAVING n > 1
        )
        ",
    )
    .fetch_one(db.pool())
    .await
    .unwrap();
    assert_eq!(duplicates, 0);

    let detail = db.get_workout("w-1").await.unwrap();
    let indexes: Vec<i64> = detail.sets.iter().map(|set| set.set_index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_resync_updates_workout_but_keeps_existing_sets() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(two_pages());
    let service = create_sync_service(&db, &source);
    service.force_sync().await.unwrap();

    let mut pages = two_pages();
    pages[0][0] = workout_json(
        "w-1",
        "Push (edited)",
        "2024-03-01T10:00:00Z",
        vec![exercise_json(
            "Bench Press",
            "BENCH",
            vec![
                set_json(105.0, 5),
                set_json(100.0, 5),
                set_json(90.0, 8),
                set_json(80.0, 12),
            ],
        )],
    );
    source.set_pages(pages);

    let report = service.force_sync().await.unwrap();
    let detail = db.get_workout("w-1").await.unwrap();

    assert_eq!(detail.workout.title, "Push (edited)");
    assert_eq!(report.sets_inserted, 1);
    assert_eq!(detail.sets.len(), 4);
    // Existing set rows are not overwritten by a re-sync
    assert_eq!(detail.sets[0].weight_kg, Some(100.0));
    assert_eq!(detail.sets[3].weight_kg, Some(80.0));
}

#[tokio::test]
async fn test_resync_preserves_ignored_flag() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(two_pages());
    let service = create_sync_service(&db, &source);
    service.force_sync().await.unwrap();

    common::mark_ignored(&db, "w-2").await.unwrap();
    service.force_sync().await.unwrap();

    assert!(db.get_workout("w-2").await.unwrap().workout.ignored);
    let visible = db.list_workouts(&WorkoutFilter::default()).await.unwrap();
    assert!(visible.iter().all(|workout| workout.id != "w-2"));
}

#[tokio::test]
async fn test_cooldown_gates_lazy_sync() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(two_pages());
    let service = create_sync_service(&db, &source);

    let first = service.ensure_synced().await.unwrap();
    assert!(matches!(first, SyncOutcome::Completed(_)));
    assert_eq!(source.fetch_count(), 2);

    let second = service.ensure_synced().await.unwrap();
    assert!(matches!(second, SyncOutcome::Skipped { last_sync_ts: Some(_) }));
    assert_eq!(source.fetch_count(), 2);

    rewind_last_sync(&db, Duration::seconds(301)).await.unwrap();
    let third = service.ensure_synced().await.unwrap();
    assert!(matches!(third, SyncOutcome::Completed(_)));
    assert_eq!(source.fetch_count(), 4);
}

#[tokio::test]
async fn test_force_sync_ignores_cooldown_and_does_not_stamp() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(two_pages());
    let service = create_sync_service(&db, &source);

    service.force_sync().await.unwrap();
    assert!(db
        .get_or_create_sync_state()
        .await
        .unwrap()
        .last_sync_ts
        .is_none());

    service.ensure_synced().await.unwrap();
    service.force_sync().await.unwrap();
    assert_eq!(source.fetch_count(), 6);
}

#[tokio::test]
async fn test_failed_page_keeps_earlier_pages_and_skips_stamp() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(two_pages());
    source.fail_on(Some(2));
    let service = create_sync_service(&db, &source);

    let error = service.ensure_synced().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);

    // Page one committed before page two failed
    assert_eq!(db.workout_count().await.unwrap(), 2);
    assert!(db
        .get_or_create_sync_state()
        .await
        .unwrap()
        .last_sync_ts
        .is_none());

    source.fail_on(None);
    let outcome = service.ensure_synced().await.unwrap();
    assert!(matches!(outcome, SyncOutcome::Completed(_)));
    assert_eq!(db.workout_count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_single_page_source_fetches_once() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(vec![vec![workout_json(
        "solo",
        "Only",
        "2024-01-01T08:00:00Z",
        vec![],
    )]]);
    let service = create_sync_service(&db, &source);

    let report = service.force_sync().await.unwrap();
    assert_eq!(report.pages, 1);
    assert_eq!(source.fetch_count(), 1);
}

fn three_pages() -> Vec<Vec<Value>> {
    (1..=3)
        .map(|n| {
            vec![workout_json(
                &format!("p-{n}"),
                "Paged",
                &format!("2024-04-0{n}T08:00:00Z"),
                vec![],
            )]
        })
        .collect()
}

#[tokio::test]
async fn test_shrinking_page_count_stops_early() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(three_pages());
    source.report_page_count(1, 3);
    source.report_page_count(2, 2);
    let service = create_sync_service(&db, &source);

    let report = service.force_sync().await.unwrap();
    assert_eq!(report.pages, 2);
    assert_eq!(source.fetch_count(), 2);
    assert_eq!(db.workout_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_growing_page_count_is_followed() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(three_pages());
    source.report_page_count(1, 2);
    source.report_page_count(2, 3);
    let service = create_sync_service(&db, &source);

    let report = service.force_sync().await.unwrap();
    assert_eq!(report.pages, 3);
    assert_eq!(source.fetch_count(), 3);
    assert_eq!(db.workout_count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_templateless_exercises_keep_their_sets() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(vec![vec![workout_json(
        "w-free",
        "Finisher",
        "2024-03-07T10:00:00Z",
        vec![
            json!({"title": "Dips", "sets": [set_json(20.0, 10)]}),
            json!({"title": "Farmer Carry", "sets": [set_json(40.0, 1)]}),
        ],
    )]]);
    let service = create_sync_service(&db, &source);

    let report = service.force_sync().await.unwrap();
    assert_eq!(report.sets_inserted, 2);
    assert_eq!(report.sets_dropped, 0);

    let detail = db.get_workout("w-free").await.unwrap();
    let mut titles: Vec<&str> = detail
        .sets
        .iter()
        .map(|set| set.exercise_title.as_str())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["Dips", "Farmer Carry"]);

    let again = service.force_sync().await.unwrap();
    assert_eq!(again.sets_inserted, 0);
    assert_eq!(again.sets_dropped, 2);
    assert_eq!(db.get_workout("w-free").await.unwrap().sets.len(), 2);
}

#[tokio::test]
async fn test_records_without_identity_are_skipped() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(vec![vec![
        json!({"title": "ghost", "exercises": []}),
        workout_json("real", "Real", "2024-01-02T08:00:00Z", vec![]),
    ]]);
    let service = create_sync_service(&db, &source);

    let report = service.force_sync().await.unwrap();
    assert_eq!(report.workouts_skipped, 1);
    assert_eq!(report.workouts_merged, 1);
    assert_eq!(db.workout_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_empty_source_completes() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(vec![]);
    let service = create_sync_service(&db, &source);

    let outcome = service.ensure_synced().await.unwrap();
    assert!(matches!(outcome, SyncOutcome::Completed(report) if report.pages == 1));
    assert!(db
        .get_or_create_sync_state()
        .await
        .unwrap()
        .last_sync_ts
        .is_some());
}

#[tokio::test]
async fn test_concurrent_lazy_syncs_fetch_once() {
    let db = create_test_database().await.unwrap();
    let source = ScriptedSource::new(two_pages());
    let service = Arc::new(create_sync_service(&db, &source));

    let (a, b) = tokio::join!(service.ensure_synced(), service.ensure_synced());
    let outcomes = [a.unwrap(), b.unwrap()];

    let completed = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, SyncOutcome::Completed(_)))
        .count();
    assert_eq!(completed, 1);
    assert_eq!(source.fetch_count(), 2);
}
