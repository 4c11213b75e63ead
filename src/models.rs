use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::errors::UnknownMood;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Neutral,
    Calm,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Sad, Mood::Angry, Mood::Neutral, Mood::Calm];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Neutral => "neutral",
            Mood::Calm => "calm",
        }
    }
}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == label)
            .ok_or_else(|| UnknownMood(label.to_string()))
    }
}

/// Journal entries accept every tracker mood plus `anxious`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JournalMood {
    Happy,
    Sad,
    Angry,
    #[default]
    Neutral,
    Calm,
    Anxious,
}

impl JournalMood {
    pub fn as_str(self) -> &'static str {
        match self {
            JournalMood::Happy => "happy",
            JournalMood::Sad => "sad",
            JournalMood::Angry => "angry",
            JournalMood::Neutral => "neutral",
            JournalMood::Calm => "calm",
            JournalMood::Anxious => "anxious",
        }
    }
}

impl FromStr for JournalMood {
    type Err = UnknownMood;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "anxious" => Ok(JournalMood::Anxious),
            other => other.parse::<Mood>().map(JournalMood::from),
        }
    }
}

impl From<Mood> for JournalMood {
    fn from(mood: Mood) -> Self {
        match mood {
            Mood::Happy => JournalMood::Happy,
            Mood::Sad => JournalMood::Sad,
            Mood::Angry => JournalMood::Angry,
            Mood::Neutral => JournalMood::Neutral,
            Mood::Calm => JournalMood::Calm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterEntry {
    pub date: NaiveDate,
    pub cups: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub calories: u32,
    pub meal_type: MealType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    pub date: NaiveDate,
    pub hours_slept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<SleepQuality>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub date: NaiveDate,
    /// Kilograms.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub name: String,
    pub duration: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: String,
    pub date: NaiveDate,
    pub completed: bool,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessExercise {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    /// Minutes.
    pub duration: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub mood: JournalMood,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub const DEFAULT_WATER_GOAL: u32 = 8;
pub const DEFAULT_SLEEP_GOAL: u32 = 8;

/// Every collection and goal the store owns, as handed to readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub mood_entries: Vec<MoodEntry>,
    pub water_entries: Vec<WaterEntry>,
    pub water_goal: u32,
    pub meal_entries: Vec<MealEntry>,
    pub sleep_entries: Vec<SleepEntry>,
    pub sleep_goal: u32,
    pub weight_entries: Vec<WeightEntry>,
    pub workout_entries: Vec<WorkoutEntry>,
    pub fitness_exercises: Vec<FitnessExercise>,
    pub journal_entries: Vec<JournalEntry>,
}

impl Default for HealthData {
    fn default() -> Self {
        Self {
            mood_entries: Vec::new(),
            water_entries: Vec::new(),
            water_goal: DEFAULT_WATER_GOAL,
            meal_entries: Vec::new(),
            sleep_entries: Vec::new(),
            sleep_goal: DEFAULT_SLEEP_GOAL,
            weight_entries: Vec::new(),
            workout_entries: Vec::new(),
            fitness_exercises: Vec::new(),
            journal_entries: Vec::new(),
        }
    }
}

/// Caller-side id for meals, exercises, workouts and journal entries.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub goal: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMealRequest {
    pub id: Option<String>,
    pub date: NaiveDate,
    pub name: String,
    pub calories: u32,
    pub meal_type: MealType,
}

#[derive(Debug, Deserialize)]
pub struct NewExerciseRequest {
    pub id: Option<String>,
    pub date: NaiveDate,
    pub name: String,
    pub duration: u32,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewWorkoutRequest {
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

#[derive(Debug, Deserialize)]
pub struct CompletedRequest {
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewJournalRequest {
    pub id: Option<String>,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood: JournalMood,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsQuery {
    pub days: Option<usize>,
    pub goal_weight: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterResponse {
    pub date: NaiveDate,
    pub cups: u32,
    pub goal: u32,
    pub goal_reached: bool,
    /// Set only on the cup that lands exactly on the goal.
    pub just_reached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub mood: Option<MoodEntry>,
    pub mood_emoji: Option<String>,
    pub water_cups: u32,
    pub water_goal: u32,
    pub calories: u64,
    pub latest_sleep: Option<SleepEntry>,
    pub latest_weight: Option<WeightEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSummary {
    pub today_hours: f64,
    pub average_hours: f64,
    pub nights_logged: usize,
    pub goal: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightSummary {
    pub latest: f64,
    pub start: f64,
    pub change: f64,
    pub goal_difference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealGroup {
    pub meal_type: MealType,
    pub meals: Vec<MealEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDay {
    pub date: NaiveDate,
    pub total_calories: u64,
    pub groups: Vec<MealGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    pub water: Vec<DailyPoint>,
    pub calories: Vec<DailyPoint>,
    pub sleep: Vec<DailyPoint>,
    pub weight: Vec<DailyPoint>,
    pub sleep_summary: SleepSummary,
    pub weight_summary: WeightSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_entry_uses_camel_case_fields() {
        let meal = MealEntry {
            id: "m1".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            name: "Oats".into(),
            calories: 300,
            meal_type: MealType::Breakfast,
        };
        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["mealType"], "breakfast");
        assert_eq!(json["date"], "2024-01-01");
    }

    #[test]
    fn unknown_mood_is_rejected_at_parse() {
        let parsed: Result<MoodEntry, _> =
            serde_json::from_str(r#"{"date":"2024-01-01","mood":"anxious"}"#);
        assert!(parsed.is_err());

        let journal: JournalMood = serde_json::from_str(r#""anxious""#).unwrap();
        assert_eq!(journal, JournalMood::Anxious);
    }

    #[test]
    fn mood_labels_parse_both_ways() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>(), Ok(mood));
        }
        assert_eq!("anxious".parse::<Mood>(), Err(UnknownMood("anxious".into())));
        assert_eq!("anxious".parse::<JournalMood>(), Ok(JournalMood::Anxious));
        assert_eq!("calm".parse::<JournalMood>(), Ok(JournalMood::Calm));
        assert_eq!(JournalMood::Anxious.as_str(), "anxious");
        assert!("Happy".parse::<JournalMood>().is_err());
    }

    #[test]
    fn malformed_date_is_rejected_at_parse() {
        let parsed: Result<WaterEntry, _> = serde_json::from_str(r#"{"date":"2024-1-1x","cups":2}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(generate_id(), generate_id());
    }
}
