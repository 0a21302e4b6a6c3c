// ABOUTME: Muscle-group coverage counted once per workout and bucketed into a six-axis radar
// ABOUTME: Compares a date range against the equal-length range immediately before it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::dates::DateRange;
use crate::models::normalize_label;

/// Fixed radar axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadarBucket {
    /// Pectorals
    Chest,
    /// Lats, traps, spinal erectors
    Back,
    /// Deltoids
    Shoulders,
    /// Biceps, triceps, forearms
    Arms,
    /// Abdominals and obliques
    Core,
    /// Quads, hamstrings, glutes, calves
    Legs,
}

/// Normalized muscle name to radar bucket; names absent here have no bucket
const BUCKET_TABLE: &[(&str, RadarBucket)] = &[
    ("petto", RadarBucket::Chest),
    ("chest", RadarBucket::Chest),
    ("pectorals", RadarBucket::Chest),
    ("schiena", RadarBucket::Back),
    ("back", RadarBucket::Back),
    ("lats", RadarBucket::Back),
    ("upper back", RadarBucket::Back),
    ("lower back", RadarBucket::Back),
    ("traps", RadarBucket::Back),
    ("spalle", RadarBucket::Shoulders),
    ("shoulders", RadarBucket::Shoulders),
    ("deltoids", RadarBucket::Shoulders),
    ("addome", RadarBucket::Core),
    ("core", RadarBucket::Core),
    ("abdominals", RadarBucket::Core),
    ("abs", RadarBucket::Core),
    ("obliques", RadarBucket::Core),
    ("bicipiti", RadarBucket::Arms),
    ("tricipiti", RadarBucket::Arms),
    ("avambracci", RadarBucket::Arms),
    ("biceps", RadarBucket::Arms),
    ("triceps", RadarBucket::Arms),
    ("forearms", RadarBucket::Arms),
    ("quadricipiti", RadarBucket::Legs),
    ("femorali", RadarBucket::Legs),
    ("glutei", RadarBucket::Legs),
    ("polpacci", RadarBucket::Legs),
    ("quadriceps", RadarBucket::Legs),
    ("hamstrings", RadarBucket::Legs),
    ("glutes", RadarBucket::Legs),
    ("calves", RadarBucket::Legs),
    ("adductors", RadarBucket::Legs),
    ("abductors", RadarBucket::Legs),
];

impl RadarBucket {
    /// Bucket for a muscle name, matched case-insensitively after trimming
    #[must_use]
    pub fn for_muscle(muscle: &str) -> Option<Self> {
        let name = normalize_label(muscle)?;
        BUCKET_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, bucket)| *bucket)
    }
}

/// Workouts per radar axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarTally {
    /// Chest workouts
    pub chest: u32,
    /// Back workouts
    pub back: u32,
    /// Shoulder workouts
    pub shoulders: u32,
    /// Arm workouts
    pub arms: u32,
    /// Core workouts
    pub core: u32,
    /// Leg workouts
    pub legs: u32,
}

impl RadarTally {
    fn bump(&mut self, bucket: RadarBucket) {
        let slot = match bucket {
            RadarBucket::Chest => &mut self.chest,
            RadarBucket::Back => &mut self.back,
            RadarBucket::Shoulders => &mut self.shoulders,
            RadarBucket::Arms => &mut self.arms,
            RadarBucket::Core => &mut self.core,
            RadarBucket::Legs => &mut self.legs,
        };
        *slot += 1;
    }

    /// Count on one axis
    #[must_use]
    pub const fn get(&self, bucket: RadarBucket) -> u32 {
        match bucket {
            RadarBucket::Chest => self.chest,
            RadarBucket::Back => self.back,
            RadarBucket::Shoulders => self.shoulders,
            RadarBucket::Arms => self.arms,
            RadarBucket::Core => self.core,
            RadarBucket::Legs => self.legs,
        }
    }
}

/// One (workout, trained muscle) pair from a non-ignored workout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutMuscleRow {
    /// Workout id
    pub workout_id: String,
    /// Muscle name as stored in the catalog
    pub muscle: String,
}

/// Muscle coverage over one range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuscleTally {
    /// Workouts that trained each muscle, including muscles without a bucket
    pub muscle_counts: BTreeMap<String, u32>,
    /// Workouts per radar axis
    pub radar: RadarTally,
    /// Workouts that trained at least one catalogued muscle
    pub workouts_count: u32,
}

/// A pair of values for the requested and the preceding range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison<T> {
    /// Requested range
    pub current: T,
    /// Equal-length range immediately before it
    pub previous: T,
}

/// Before/after muscle coverage summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleSummary {
    /// Requested range
    pub range: DateRange,
    /// Preceding range of equal length
    pub previous_range: DateRange,
    /// Flat counts for the requested range
    pub muscle_counts: BTreeMap<String, u32>,
    /// Radar tallies for both ranges
    pub radar: Comparison<RadarTally>,
    /// Workout counts for both ranges
    pub workouts: Comparison<u32>,
}

impl MuscleSummary {
    /// Combine the tallies of a range and its preceding range
    #[must_use]
    pub fn new(range: DateRange, current: MuscleTally, previous: &MuscleTally) -> Self {
        Self {
            range,
            previous_range: range.preceding(),
            radar: Comparison {
                current: current.radar,
                previous: previous.radar,
            },
            workouts: Comparison {
                current: current.workouts_count,
                previous: previous.workouts_count,
            },
            muscle_counts: current.muscle_counts,
        }
    }
}

/// Count each muscle, and each radar axis, at most once per workout
#[must_use]
pub fn tally_muscles(rows: &[WorkoutMuscleRow]) -> MuscleTally {
    let mut per_workout: HashMap<&str, BTreeSet<String>> = HashMap::new();
    for row in rows {
        if let Some(muscle) = normalize_label(&row.muscle) {
            per_workout
                .entry(row.workout_id.as_str())
                .or_default()
                .insert(muscle);
        }
    }

    let mut tally = MuscleTally {
        workouts_count: u32::try_from(per_workout.len()).unwrap_or(u32::MAX),
        ..MuscleTally::default()
    };
    for muscles in per_workout.values() {
        let mut buckets = BTreeSet::new();
        for muscle in muscles {
            *tally.muscle_counts.entry(muscle.clone()).or_insert(0) += 1;
            buckets.extend(RadarBucket::for_muscle(muscle));
        }
        for bucket in buckets {
            tally.radar.bump(bucket);
        }
    }
    tally
}
