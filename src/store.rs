use crate::errors::{StorageError, StoreError, StoreResult};
use crate::models::{
    FitnessExercise, HealthData, JournalEntry, MealEntry, MoodEntry, SleepEntry, WaterEntry,
    WeightEntry, WorkoutEntry,
};
use crate::storage::{Slot, SlotStorage};
use crate::validation;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

/// Single owner of every tracked entry and goal.
///
/// Each mutator validates its input, updates memory, then writes the touched
/// slot through to storage before returning. A rejected input leaves both
/// memory and storage unchanged. Removing or updating an unknown id is a
/// silent no-op.
pub struct HealthStore<S> {
    storage: S,
    data: HealthData,
}

impl<S: SlotStorage> HealthStore<S> {
    /// Reads every slot; missing or malformed slots fall back to their defaults.
    /// A slot that does not parse is set aside first, so the default written
    /// over it later never destroys the original bytes.
    pub fn load(mut storage: S) -> Self {
        let defaults = HealthData::default();
        let mut data = HealthData {
            mood_entries: load_slot(&mut storage, Slot::MoodEntries).unwrap_or_default(),
            water_entries: load_slot(&mut storage, Slot::WaterEntries).unwrap_or_default(),
            water_goal: load_goal(&mut storage, Slot::WaterGoal).unwrap_or(defaults.water_goal),
            meal_entries: load_slot(&mut storage, Slot::MealEntries).unwrap_or_default(),
            sleep_entries: load_slot(&mut storage, Slot::SleepEntries).unwrap_or_default(),
            sleep_goal: load_goal(&mut storage, Slot::SleepGoal).unwrap_or(defaults.sleep_goal),
            weight_entries: load_slot(&mut storage, Slot::WeightEntries).unwrap_or_default(),
            workout_entries: load_slot(&mut storage, Slot::WorkoutEntries).unwrap_or_default(),
            fitness_exercises: load_slot(&mut storage, Slot::FitnessExercises).unwrap_or_default(),
            journal_entries: load_slot(&mut storage, Slot::JournalEntries).unwrap_or_default(),
        };

        keep_last_per_date(&mut data.mood_entries, |e| e.date, Slot::MoodEntries);
        keep_last_per_date(&mut data.water_entries, |e| e.date, Slot::WaterEntries);
        keep_last_per_date(&mut data.sleep_entries, |e| e.date, Slot::SleepEntries);
        keep_last_per_date(&mut data.weight_entries, |e| e.date, Slot::WeightEntries);

        info!(
            moods = data.mood_entries.len(),
            meals = data.meal_entries.len(),
            sleep = data.sleep_entries.len(),
            weights = data.weight_entries.len(),
            "health store ready"
        );
        Self { storage, data }
    }

    pub fn data(&self) -> &HealthData {
        &self.data
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn mood_for(&self, date: NaiveDate) -> Option<&MoodEntry> {
        self.data.mood_entries.iter().find(|e| e.date == date)
    }

    pub fn water_cups(&self, date: NaiveDate) -> u32 {
        self.data
            .water_entries
            .iter()
            .find(|e| e.date == date)
            .map_or(0, |e| e.cups)
    }

    pub fn sleep_for(&self, date: NaiveDate) -> Option<&SleepEntry> {
        self.data.sleep_entries.iter().find(|e| e.date == date)
    }

    pub fn weight_for(&self, date: NaiveDate) -> Option<&WeightEntry> {
        self.data.weight_entries.iter().find(|e| e.date == date)
    }

    pub fn add_mood_entry(&mut self, entry: MoodEntry) -> StoreResult<()> {
        info!(date = %entry.date, mood = entry.mood.as_str(), "mood recorded");
        replace_for_date(&mut self.data.mood_entries, entry, |e| e.date);
        self.persist(Slot::MoodEntries)
    }

    /// Adds one cup for `date` and returns the new count.
    pub fn add_water_cup(&mut self, date: NaiveDate) -> StoreResult<u32> {
        let cups = match self.data.water_entries.iter_mut().find(|e| e.date == date) {
            Some(entry) => {
                entry.cups = entry.cups.saturating_add(1);
                entry.cups
            }
            None => {
                self.data.water_entries.push(WaterEntry { date, cups: 1 });
                1
            }
        };
        info!(%date, cups, "water cup added");
        self.persist(Slot::WaterEntries)?;
        Ok(cups)
    }

    pub fn reset_water_cups(&mut self, date: NaiveDate) -> StoreResult<()> {
        if !remove_where(&mut self.data.water_entries, |e| e.date == date) {
            debug!(%date, "no water entry to reset");
            return Ok(());
        }
        info!(%date, "water cups reset");
        self.persist(Slot::WaterEntries)
    }

    pub fn set_water_goal(&mut self, goal: u32) -> StoreResult<()> {
        validation::goal("water goal", goal)?;
        self.data.water_goal = goal;
        info!(goal, "water goal updated");
        self.persist(Slot::WaterGoal)
    }

    pub fn set_sleep_goal(&mut self, goal: u32) -> StoreResult<()> {
        validation::goal("sleep goal", goal)?;
        self.data.sleep_goal = goal;
        info!(goal, "sleep goal updated");
        self.persist(Slot::SleepGoal)
    }

    pub fn add_meal_entry(&mut self, entry: MealEntry) -> StoreResult<()> {
        validation::fresh_id(&entry.id, self.data.meal_entries.iter().map(|e| e.id.as_str()))?;
        validation::meal(&entry)?;
        info!(id = %entry.id, date = %entry.date, calories = entry.calories, "meal logged");
        self.data.meal_entries.push(entry);
        self.persist(Slot::MealEntries)
    }

    pub fn remove_meal_entry(&mut self, id: &str) -> StoreResult<()> {
        if !remove_where(&mut self.data.meal_entries, |e| e.id == id) {
            debug!(id, "no meal to remove");
            return Ok(());
        }
        info!(id, "meal removed");
        self.persist(Slot::MealEntries)
    }

    pub fn add_sleep_entry(&mut self, entry: SleepEntry) -> StoreResult<()> {
        validation::sleep(&entry)?;
        info!(date = %entry.date, hours = entry.hours_slept, "sleep recorded");
        replace_for_date(&mut self.data.sleep_entries, entry, |e| e.date);
        self.persist(Slot::SleepEntries)
    }

    pub fn add_weight_entry(&mut self, entry: WeightEntry) -> StoreResult<()> {
        validation::weight(&entry)?;
        info!(date = %entry.date, weight = entry.weight, "weight recorded");
        replace_for_date(&mut self.data.weight_entries, entry, |e| e.date);
        self.persist(Slot::WeightEntries)
    }

    pub fn add_workout_entry(&mut self, entry: WorkoutEntry) -> StoreResult<()> {
        validation::fresh_id(&entry.id, self.data.workout_entries.iter().map(|e| e.id.as_str()))?;
        validation::workout(&entry)?;
        info!(id = %entry.id, date = %entry.date, "workout added");
        self.data.workout_entries.push(entry);
        self.persist(Slot::WorkoutEntries)
    }

    pub fn update_workout_entry(&mut self, id: &str, completed: bool) -> StoreResult<()> {
        let Some(entry) = self.data.workout_entries.iter_mut().find(|e| e.id == id) else {
            debug!(id, "no workout to update");
            return Ok(());
        };
        entry.completed = completed;
        info!(id, completed, "workout updated");
        self.persist(Slot::WorkoutEntries)
    }

    pub fn add_fitness_exercise(&mut self, entry: FitnessExercise) -> StoreResult<()> {
        validation::fresh_id(&entry.id, self.data.fitness_exercises.iter().map(|e| e.id.as_str()))?;
        validation::fitness_exercise(&entry)?;
        info!(id = %entry.id, name = %entry.name, "exercise added");
        self.data.fitness_exercises.push(entry);
        self.persist(Slot::FitnessExercises)
    }

    /// Replaces the exercise holding `entry.id` in place. An unknown id is a
    /// no-op whatever the record holds.
    pub fn update_fitness_exercise(&mut self, entry: FitnessExercise) -> StoreResult<()> {
        let Some(index) = self.data.fitness_exercises.iter().position(|e| e.id == entry.id) else {
            debug!(id = %entry.id, "no exercise to update");
            return Ok(());
        };
        validation::fitness_exercise(&entry)?;
        info!(id = %entry.id, completed = entry.completed, "exercise updated");
        self.data.fitness_exercises[index] = entry;
        self.persist(Slot::FitnessExercises)
    }

    pub fn remove_fitness_exercise(&mut self, id: &str) -> StoreResult<()> {
        if !remove_where(&mut self.data.fitness_exercises, |e| e.id == id) {
            debug!(id, "no exercise to remove");
            return Ok(());
        }
        info!(id, "exercise removed");
        self.persist(Slot::FitnessExercises)
    }

    pub fn add_journal_entry(&mut self, mut entry: JournalEntry) -> StoreResult<()> {
        validation::fresh_id(&entry.id, self.data.journal_entries.iter().map(|e| e.id.as_str()))?;
        validation::journal(&entry)?;
        entry.title = entry.title.trim().to_string();
        entry.content = entry.content.trim().to_string();
        entry.tags = normalize_tags(entry.tags);
        info!(id = %entry.id, date = %entry.date, "journal entry saved");
        self.data.journal_entries.push(entry);
        self.persist(Slot::JournalEntries)
    }

    pub fn remove_journal_entry(&mut self, id: &str) -> StoreResult<()> {
        if !remove_where(&mut self.data.journal_entries, |e| e.id == id) {
            debug!(id, "no journal entry to remove");
            return Ok(());
        }
        info!(id, "journal entry removed");
        self.persist(Slot::JournalEntries)
    }

    /// Rewrites every slot. Attempts all of them and reports the first failure.
    pub fn flush(&mut self) -> StoreResult<()> {
        let mut first_err = None;
        for slot in Slot::ALL {
            if let Err(err) = self.persist(slot) {
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => {
                info!("health store flushed");
                Ok(())
            }
        }
    }

    fn persist(&mut self, slot: Slot) -> StoreResult<()> {
        let data = &self.data;
        let payload = match slot {
            Slot::MoodEntries => serde_json::to_string(&data.mood_entries),
            Slot::WaterEntries => serde_json::to_string(&data.water_entries),
            Slot::WaterGoal => serde_json::to_string(&data.water_goal),
            Slot::MealEntries => serde_json::to_string(&data.meal_entries),
            Slot::SleepEntries => serde_json::to_string(&data.sleep_entries),
            Slot::SleepGoal => serde_json::to_string(&data.sleep_goal),
            Slot::WeightEntries => serde_json::to_string(&data.weight_entries),
            Slot::WorkoutEntries => serde_json::to_string(&data.workout_entries),
            Slot::FitnessExercises => serde_json::to_string(&data.fitness_exercises),
            Slot::JournalEntries => serde_json::to_string(&data.journal_entries),
        };
        let result = payload
            .map_err(|source| StorageError::Serialization {
                slot: slot.key().to_string(),
                source,
            })
            .and_then(|payload| self.storage.write(slot.key(), &payload));

        result.map_err(|err| {
            error!(slot = slot.key(), error = %err, "failed to persist slot");
            StoreError::Storage(err)
        })
    }
}

fn load_slot<S: SlotStorage, T: DeserializeOwned>(storage: &mut S, slot: Slot) -> Option<T> {
    match storage.read(slot.key()) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(slot = slot.key(), error = %err, "malformed slot, setting it aside and using default");
                if let Err(err) = storage.set_aside(slot.key()) {
                    error!(slot = slot.key(), error = %err, "failed to set aside malformed slot");
                }
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(slot = slot.key(), error = %err, "unreadable slot, using default");
            None
        }
    }
}

fn load_goal<S: SlotStorage>(storage: &mut S, slot: Slot) -> Option<u32> {
    let goal: u32 = load_slot(storage, slot)?;
    if validation::goal(slot.key(), goal).is_err() {
        warn!(slot = slot.key(), goal, "non-positive goal, using default");
        return None;
    }
    Some(goal)
}

/// Drops earlier duplicates so each date keeps only its most recent record.
fn keep_last_per_date<T>(entries: &mut Vec<T>, date: impl Fn(&T) -> NaiveDate, slot: Slot) {
    let before = entries.len();
    let mut seen = std::collections::HashSet::new();
    let mut kept: Vec<T> = Vec::with_capacity(before);
    for entry in entries.drain(..).rev() {
        if seen.insert(date(&entry)) {
            kept.push(entry);
        }
    }
    kept.reverse();
    if kept.len() != before {
        warn!(slot = slot.key(), dropped = before - kept.len(), "duplicate dates in slot");
    }
    *entries = kept;
}

fn replace_for_date<T>(entries: &mut Vec<T>, entry: T, date: impl Fn(&T) -> NaiveDate) {
    let key = date(&entry);
    entries.retain(|e| date(e) != key);
    entries.push(entry);
}

/// Returns whether anything was removed.
fn remove_where<T>(entries: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = entries.len();
    entries.retain(|e| !matches(e));
    entries.len() != before
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}
