use crate::errors::StorageError;
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

/// Named durable locations, one per collection or goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    MoodEntries,
    WaterEntries,
    WaterGoal,
    MealEntries,
    SleepEntries,
    SleepGoal,
    WeightEntries,
    WorkoutEntries,
    FitnessExercises,
    JournalEntries,
}

impl Slot {
    pub const ALL: [Slot; 10] = [
        Slot::MoodEntries,
        Slot::WaterEntries,
        Slot::WaterGoal,
        Slot::MealEntries,
        Slot::SleepEntries,
        Slot::SleepGoal,
        Slot::WeightEntries,
        Slot::WorkoutEntries,
        Slot::FitnessExercises,
        Slot::JournalEntries,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Slot::MoodEntries => "healthApp.moodEntries",
            Slot::WaterEntries => "healthApp.waterEntries",
            Slot::WaterGoal => "healthApp.waterGoal",
            Slot::MealEntries => "healthApp.mealEntries",
            Slot::SleepEntries => "healthApp.sleepEntries",
            Slot::SleepGoal => "healthApp.sleepGoal",
            Slot::WeightEntries => "healthApp.weightEntries",
            Slot::WorkoutEntries => "healthApp.workoutEntries",
            Slot::FitnessExercises => "healthApp.fitnessExercises",
            Slot::JournalEntries => "healthApp.journalEntries",
        }
    }
}

/// Durable named slots, each holding the serialized form of one collection or goal.
pub trait SlotStorage {
    /// `Ok(None)` when the slot has never been written.
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Moves a slot's unreadable contents out of the way so the next write
    /// does not destroy them.
    fn set_aside(&mut self, slot: &str) -> Result<(), StorageError>;
}

/// One `<slot>.json` file per slot inside a data directory.
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            slot: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl SlotStorage for FileSlots {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                slot: slot.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| StorageError::Io {
            slot: slot.to_string(),
            source,
        };
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }

    /// Renames `<slot>.json` to `<slot>.json.corrupt`, replacing any earlier one.
    fn set_aside(&mut self, slot: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot);
        fs::rename(&path, path.with_extension("json.corrupt")).map_err(|source| {
            StorageError::Io {
                slot: slot.to_string(),
                source,
            }
        })
    }
}

/// Slots held in memory only; lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    slots: HashMap<String, String>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, slot: &str, value: &str) -> Self {
        self.slots.insert(slot.to_string(), value.to_string());
        self
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }
}

impl SlotStorage for MemorySlots {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn set_aside(&mut self, slot: &str) -> Result<(), StorageError> {
        if let Some(value) = self.slots.remove(slot) {
            self.slots.insert(format!("{slot}.corrupt"), value);
        }
        Ok(())
    }
}
