use crate::errors::ValidationError;
use crate::models::{FitnessExercise, JournalEntry, MealEntry, SleepEntry, WeightEntry, WorkoutEntry};

fn non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(())
}

fn positive_int(field: &'static str, value: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::NotPositive { field, value: 0.0 });
    }
    Ok(())
}

fn positive_real(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

/// Rejects a blank id or one already held by `existing`.
pub fn fresh_id<'a>(
    id: &str,
    mut existing: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    non_blank("id", id)?;
    if existing.any(|other| other == id) {
        return Err(ValidationError::DuplicateId(id.to_string()));
    }
    Ok(())
}

pub fn goal(field: &'static str, value: u32) -> Result<(), ValidationError> {
    positive_int(field, value)
}

pub fn meal(entry: &MealEntry) -> Result<(), ValidationError> {
    non_blank("meal name", &entry.name)?;
    positive_int("calories", entry.calories)
}

pub fn sleep(entry: &SleepEntry) -> Result<(), ValidationError> {
    positive_real("hours slept", entry.hours_slept)
}

pub fn weight(entry: &WeightEntry) -> Result<(), ValidationError> {
    positive_real("weight", entry.weight)
}

pub fn fitness_exercise(entry: &FitnessExercise) -> Result<(), ValidationError> {
    non_blank("exercise name", &entry.name)?;
    positive_int("duration", entry.duration)
}

pub fn workout(entry: &WorkoutEntry) -> Result<(), ValidationError> {
    for exercise in &entry.exercises {
        non_blank("exercise name", &exercise.name)?;
        positive_int("duration", exercise.duration)?;
    }
    Ok(())
}

pub fn journal(entry: &JournalEntry) -> Result<(), ValidationError> {
    non_blank("title", &entry.title)?;
    non_blank("content", &entry.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn meal_requires_name_and_calories() {
        let mut entry = MealEntry {
            id: "a".into(),
            date: day(),
            name: "   ".into(),
            calories: 200,
            meal_type: MealType::Lunch,
        };
        assert_eq!(meal(&entry), Err(ValidationError::Blank("meal name")));

        entry.name = "Soup".into();
        entry.calories = 0;
        assert!(matches!(
            meal(&entry),
            Err(ValidationError::NotPositive { field: "calories", .. })
        ));

        entry.calories = 1;
        assert!(meal(&entry).is_ok());
    }

    #[test]
    fn sleep_rejects_nan_and_zero() {
        let mut entry = SleepEntry {
            date: day(),
            hours_slept: f64::NAN,
            quality: None,
        };
        assert!(sleep(&entry).is_err());
        entry.hours_slept = 0.0;
        assert!(sleep(&entry).is_err());
        entry.hours_slept = 7.5;
        assert!(sleep(&entry).is_ok());
    }

    #[test]
    fn fresh_id_detects_duplicates() {
        let ids = ["x", "y"];
        assert!(fresh_id("z", ids.iter().copied()).is_ok());
        assert_eq!(
            fresh_id("y", ids.iter().copied()),
            Err(ValidationError::DuplicateId("y".into()))
        );
        assert_eq!(fresh_id("", ids.iter().copied()), Err(ValidationError::Blank("id")));
    }
}
