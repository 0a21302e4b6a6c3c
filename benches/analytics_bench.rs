// ABOUTME: Criterion benchmarks for the training analytics engines and the normalizer
// ABOUTME: Measures records, progress, muscle tally, and year rollup over synthetic set rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the analytics engines.
//!
//! Rows are synthetic but shaped like real gym logs: three exercises per
//! session, five sets each, a session every other day.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use liftlog::dates::DateRange;
use liftlog_intelligence::{
    build_progress, compute_records, summarize_year, tally_muscles, DashboardSetRow,
    DashboardWorkoutRow, ProgressSetRow, RecordCandidate, RecordMetric, WorkoutMuscleRow,
};
use liftlog_providers::normalize_workout;
use serde_json::{json, Value};

const TEMPLATES: [(&str, &str, &str); 6] = [
    ("BENCH", "Bench Press", "petto"),
    ("SQUAT", "Squat", "quadricipiti"),
    ("DEAD", "Deadlift", "schiena"),
    ("OHP", "Overhead Press", "spalle"),
    ("CURL", "Curl", "bicipiti"),
    ("PUSHDOWN", "Pushdown", "tricipiti"),
];

fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 1, 3, 18, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn generate_candidates(workouts: usize) -> Vec<RecordCandidate> {
    let start = base_date();
    let mut rows = Vec::with_capacity(workouts * 15);
    for w in 0..workouts {
        let date = start + Duration::days((w * 2) as i64);
        for (offset, (template, title, _)) in TEMPLATES.iter().enumerate().skip(w % 2).step_by(2) {
            for set_index in 1..=5_i64 {
                rows.push(RecordCandidate {
                    workout_id: format!("w-{w}"),
                    workout_title: "Session".to_owned(),
                    workout_date: Some(date),
                    exercise_title: (*title).to_owned(),
                    exercise_template_id: Some((*template).to_owned()),
                    set_index,
                    reps: Some(3 + ((w + set_index as usize + offset) % 10) as i64),
                    weight_kg: 40.0 + ((w * 7 + offset * 13) % 120) as f64 + set_index as f64 * 2.5,
                });
            }
        }
    }
    rows
}

fn bench_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("records");

    for workouts in [50_usize, 500, 2000] {
        let candidates = generate_candidates(workouts);
        group.throughput(Throughput::Elements(candidates.len() as u64));
        for metric in [
            RecordMetric::MaxWeight,
            RecordMetric::E1rm,
            RecordMetric::MaxWeightAtReps(5),
        ] {
            group.bench_with_input(
                BenchmarkId::new(metric.as_str(), workouts),
                &candidates,
                |b, candidates| b.iter(|| compute_records(black_box(candidates), metric)),
            );
        }
    }

    group.finish();
}

fn bench_progress(c: &mut Criterion) {
    let mut group = c.benchmark_group("progress");

    for workouts in [50_usize, 500, 2000] {
        let rows: Vec<ProgressSetRow> = generate_candidates(workouts)
            .into_iter()
            .filter(|row| row.exercise_template_id.as_deref() == Some("BENCH"))
            .filter_map(|row| {
                Some(ProgressSetRow {
                    workout_date: row.workout_date?,
                    workout_id: row.workout_id,
                    exercise_title: row.exercise_title,
                    set_index: row.set_index,
                    reps: row.reps,
                    weight_kg: Some(row.weight_kg),
                })
            })
            .collect();
        let Ok(range) = DateRange::parse("2022-01-01", "2033-12-31") else {
            return;
        };

        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::new("build_progress", workouts), &rows, |b, rows| {
            b.iter(|| build_progress("BENCH", None, range, black_box(rows)));
        });
    }

    group.finish();
}

fn bench_muscle_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("muscles");

    for workouts in [50_usize, 500, 2000] {
        let rows: Vec<WorkoutMuscleRow> = (0..workouts)
            .flat_map(|w| {
                TEMPLATES
                    .iter()
                    .skip(w % 3)
                    .map(move |(_, _, muscle)| WorkoutMuscleRow {
                        workout_id: format!("w-{w}"),
                        muscle: (*muscle).to_owned(),
                    })
            })
            .collect();

        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::new("tally_muscles", workouts), &rows, |b, rows| {
            b.iter(|| tally_muscles(black_box(rows)));
        });
    }

    group.finish();
}

fn bench_year_rollup(c: &mut Criterion) {
    let candidates = generate_candidates(180);
    let workouts: Vec<DashboardWorkoutRow> = candidates
        .iter()
        .filter(|row| row.set_index == 1)
        .filter_map(|row| {
            Some(DashboardWorkoutRow {
                workout_id: row.workout_id.clone(),
                date: row.workout_date?,
            })
        })
        .collect();
    let sets: Vec<DashboardSetRow> = candidates
        .iter()
        .filter_map(|row| {
            Some(DashboardSetRow {
                workout_date: row.workout_date?,
                exercise_title: row.exercise_title.clone(),
                exercise_template_id: row.exercise_template_id.clone(),
                weight_kg: Some(row.weight_kg),
                reps: row.reps,
            })
        })
        .collect();

    c.bench_function("summarize_year", |b| {
        b.iter(|| summarize_year(2022, black_box(&workouts), black_box(&sets), 12));
    });
}

fn sample_workout(index: usize) -> Value {
    json!({
        "id": format!("bench-{index}"),
        "title": "Upper",
        "start_time": "2024-03-01T10:00:00Z",
        "end_time": "2024-03-01T11:10:00Z",
        "exercises": TEMPLATES.iter().map(|(template, title, _)| json!({
            "title": title,
            "exercise_template_id": template,
            "sets": [
                {"reps": 8, "weight_kg": 60.0, "type": "warmup"},
                {"reps": "6", "weight_kg": "80.5", "type": "normal"},
                {"reps": 5, "weight_kg": 85, "type": "normal"}
            ]
        })).collect::<Vec<_>>()
    })
}

fn bench_normalizer(c: &mut Criterion) {
    let records: Vec<Value> = (0..10).map(sample_workout).collect();
    c.bench_function("normalize_page", |b| {
        b.iter(|| {
            black_box(&records)
                .iter()
                .filter_map(normalize_workout)
                .count()
        });
    });
}

criterion_group!(
    benches,
    bench_records,
    bench_progress,
    bench_muscle_tally,
    bench_year_rollup,
    bench_normalizer
);
criterion_main!(benches);
