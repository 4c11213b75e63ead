use crate::display::mood_emoji;
use crate::models::{
    DailyPoint, DashboardSummary, HealthData, MealDay, MealEntry, MealGroup, MealType,
    SleepEntry, SleepSummary, TrendsResponse, WeightEntry, WeightSummary,
};
use chrono::{Duration, Local, NaiveDate};

pub const DEFAULT_TREND_DAYS: usize = 7;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `n` consecutive days ending at today, oldest first.
pub fn get_last_n_days(n: usize) -> Vec<NaiveDate> {
    last_n_days_at(today(), n)
}

pub fn last_n_days_at(today: NaiveDate, n: usize) -> Vec<NaiveDate> {
    (0..n)
        .rev()
        .map(|offset| today - Duration::days(offset as i64))
        .collect()
}

pub fn calculate_daily_calories(meals: &[MealEntry], date: NaiveDate) -> u64 {
    meals
        .iter()
        .filter(|meal| meal.date == date)
        .map(|meal| u64::from(meal.calories))
        .sum()
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn calculate_average(numbers: &[f64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    numbers.iter().sum::<f64>() / numbers.len() as f64
}

/// `0.0` when either input is zero or NaN.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if weight_kg == 0.0 || height_cm == 0.0 || weight_kg.is_nan() || height_cm.is_nan() {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// The goal stays reached for every cup past it.
pub fn water_goal_reached(cups: u32, goal: u32) -> bool {
    cups >= goal
}

/// True only for the cup that lands exactly on the goal, when the page celebrates.
pub fn water_goal_just_reached(cups: u32, goal: u32) -> bool {
    cups == goal
}

/// One point per date; days with nothing logged read as `0.0`.
pub fn daily_series(dates: &[NaiveDate], value: impl Fn(NaiveDate) -> f64) -> Vec<DailyPoint> {
    dates
        .iter()
        .map(|&date| DailyPoint {
            date,
            value: value(date),
        })
        .collect()
}

pub fn water_series(data: &HealthData, dates: &[NaiveDate]) -> Vec<DailyPoint> {
    daily_series(dates, |date| {
        data.water_entries
            .iter()
            .find(|e| e.date == date)
            .map_or(0.0, |e| f64::from(e.cups))
    })
}

pub fn calorie_series(data: &HealthData, dates: &[NaiveDate]) -> Vec<DailyPoint> {
    daily_series(dates, |date| calculate_daily_calories(&data.meal_entries, date) as f64)
}

pub fn sleep_series(data: &HealthData, dates: &[NaiveDate]) -> Vec<DailyPoint> {
    daily_series(dates, |date| {
        data.sleep_entries
            .iter()
            .find(|e| e.date == date)
            .map_or(0.0, |e| e.hours_slept)
    })
}

pub fn weight_series(data: &HealthData, dates: &[NaiveDate]) -> Vec<DailyPoint> {
    daily_series(dates, |date| {
        data.weight_entries
            .iter()
            .find(|e| e.date == date)
            .map_or(0.0, |e| e.weight)
    })
}

/// Most recent entry by date, whatever order it was inserted in.
fn latest_by_date<T: Clone>(entries: &[T], date: impl Fn(&T) -> NaiveDate) -> Option<T> {
    entries.iter().max_by_key(|e| date(e)).cloned()
}

pub fn latest_sleep(entries: &[SleepEntry]) -> Option<SleepEntry> {
    latest_by_date(entries, |e| e.date)
}

pub fn latest_weight(entries: &[WeightEntry]) -> Option<WeightEntry> {
    latest_by_date(entries, |e| e.date)
}

pub fn build_dashboard(data: &HealthData) -> DashboardSummary {
    build_dashboard_at(today(), data)
}

pub fn build_dashboard_at(today: NaiveDate, data: &HealthData) -> DashboardSummary {
    let mood = data.mood_entries.iter().find(|e| e.date == today).cloned();
    let water_cups = data
        .water_entries
        .iter()
        .find(|e| e.date == today)
        .map_or(0, |e| e.cups);

    DashboardSummary {
        date: today,
        mood_emoji: mood.as_ref().map(|e| mood_emoji(e.mood).to_string()),
        mood,
        water_cups,
        water_goal: data.water_goal,
        calories: calculate_daily_calories(&data.meal_entries, today),
        latest_sleep: latest_sleep(&data.sleep_entries),
        latest_weight: latest_weight(&data.weight_entries),
    }
}

pub fn sleep_summary_at(today: NaiveDate, data: &HealthData) -> SleepSummary {
    let window = last_n_days_at(today, DEFAULT_TREND_DAYS);
    let logged: Vec<f64> = data
        .sleep_entries
        .iter()
        .filter(|e| window.contains(&e.date))
        .map(|e| e.hours_slept)
        .collect();
    let today_hours = data
        .sleep_entries
        .iter()
        .find(|e| e.date == today)
        .map_or(0.0, |e| e.hours_slept);

    SleepSummary {
        today_hours,
        average_hours: calculate_average(&logged),
        nights_logged: logged.len(),
        goal: data.sleep_goal,
    }
}

/// Start and latest are taken in date order; `0.0` throughout when nothing is logged.
pub fn weight_summary(entries: &[WeightEntry], goal_weight: Option<f64>) -> WeightSummary {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);
    let start = sorted.first().map_or(0.0, |e| e.weight);
    let latest = sorted.last().map_or(0.0, |e| e.weight);

    WeightSummary {
        latest,
        start,
        change: if start != 0.0 { latest - start } else { 0.0 },
        goal_difference: match goal_weight {
            Some(goal) if latest != 0.0 => Some(goal - latest),
            _ => None,
        },
    }
}

pub fn meals_for_date(meals: &[MealEntry], date: NaiveDate) -> MealDay {
    let groups = MealType::ALL
        .iter()
        .map(|&meal_type| MealGroup {
            meal_type,
            meals: meals
                .iter()
                .filter(|m| m.date == date && m.meal_type == meal_type)
                .cloned()
                .collect(),
        })
        .collect();

    MealDay {
        date,
        total_calories: calculate_daily_calories(meals, date),
        groups,
    }
}

pub fn build_trends(data: &HealthData, days: usize, goal_weight: Option<f64>) -> TrendsResponse {
    build_trends_at(today(), data, days, goal_weight)
}

pub fn build_trends_at(
    today: NaiveDate,
    data: &HealthData,
    days: usize,
    goal_weight: Option<f64>,
) -> TrendsResponse {
    let dates = last_n_days_at(today, days);
    TrendsResponse {
        water: water_series(data, &dates),
        calories: calorie_series(data, &dates),
        sleep: sleep_series(data, &dates),
        weight: weight_series(data, &dates),
        sleep_summary: sleep_summary_at(today, data),
        weight_summary: weight_summary(&data.weight_entries, goal_weight),
    }
}
