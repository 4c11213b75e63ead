use crate::errors::AppError;
use crate::models::{
    CompletedRequest, DashboardSummary, FitnessExercise, GoalRequest, HealthData, JournalEntry,
    MealDay, MealEntry, MoodEntry, NewExerciseRequest, NewJournalRequest, NewMealRequest,
    NewWorkoutRequest, SleepEntry, TrendsQuery, TrendsResponse, WaterResponse, WeightEntry,
    WorkoutEntry, generate_id,
};
use crate::state::AppState;
use crate::stats::{
    DEFAULT_TREND_DAYS, build_dashboard, build_trends, meals_for_date, water_goal_just_reached,
    water_goal_reached,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;

const MAX_TREND_DAYS: usize = 366;

pub async fn get_snapshot(State(state): State<AppState>) -> Json<HealthData> {
    let store = state.store.lock().await;
    Json(store.data().clone())
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    let store = state.store.lock().await;
    Json(build_dashboard(store.data()))
}

pub async fn get_trends(
    State(state): State<AppState>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<TrendsResponse>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_TREND_DAYS);
    if days == 0 || days > MAX_TREND_DAYS {
        return Err(AppError::bad_request(format!(
            "days must be between 1 and {MAX_TREND_DAYS}"
        )));
    }
    let store = state.store.lock().await;
    Ok(Json(build_trends(store.data(), days, query.goal_weight)))
}

pub async fn add_mood(
    State(state): State<AppState>,
    Json(entry): Json<MoodEntry>,
) -> Result<Json<MoodEntry>, AppError> {
    let saved = entry.clone();
    state.mutate(move |store| store.add_mood_entry(saved)).await?;
    Ok(Json(entry))
}

pub async fn get_water(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Json<WaterResponse> {
    let store = state.store.lock().await;
    Json(water_response(date, store.water_cups(date), store.data().water_goal, false))
}

pub async fn add_water_cup(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<WaterResponse>, AppError> {
    let (cups, goal) = state
        .mutate(move |store| {
            let cups = store.add_water_cup(date)?;
            Ok((cups, store.data().water_goal))
        })
        .await?;
    Ok(Json(water_response(date, cups, goal, water_goal_just_reached(cups, goal))))
}

pub async fn reset_water(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<WaterResponse>, AppError> {
    let goal = state
        .mutate(move |store| {
            store.reset_water_cups(date)?;
            Ok(store.data().water_goal)
        })
        .await?;
    Ok(Json(water_response(date, 0, goal, false)))
}

pub async fn set_water_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Result<StatusCode, AppError> {
    state.mutate(move |store| store.set_water_goal(payload.goal)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_sleep_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Result<StatusCode, AppError> {
    state.mutate(move |store| store.set_sleep_goal(payload.goal)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_meal(
    State(state): State<AppState>,
    Json(payload): Json<NewMealRequest>,
) -> Result<(StatusCode, Json<MealEntry>), AppError> {
    let entry = MealEntry {
        id: payload.id.unwrap_or_else(generate_id),
        date: payload.date,
        name: payload.name.trim().to_string(),
        calories: payload.calories,
        meal_type: payload.meal_type,
    };
    let saved = entry.clone();
    state.mutate(move |store| store.add_meal_entry(saved)).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_meal_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Json<MealDay> {
    let store = state.store.lock().await;
    Json(meals_for_date(&store.data().meal_entries, date))
}

pub async fn remove_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.mutate(move |store| store.remove_meal_entry(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_sleep(
    State(state): State<AppState>,
    Json(entry): Json<SleepEntry>,
) -> Result<Json<SleepEntry>, AppError> {
    let saved = entry.clone();
    state.mutate(move |store| store.add_sleep_entry(saved)).await?;
    Ok(Json(entry))
}

pub async fn add_weight(
    State(state): State<AppState>,
    Json(entry): Json<WeightEntry>,
) -> Result<Json<WeightEntry>, AppError> {
    let saved = entry.clone();
    state.mutate(move |store| store.add_weight_entry(saved)).await?;
    Ok(Json(entry))
}

pub async fn add_workout(
    State(state): State<AppState>,
    Json(payload): Json<NewWorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutEntry>), AppError> {
    let entry = WorkoutEntry {
        id: payload.id.unwrap_or_else(generate_id),
        date: payload.date,
        completed: payload.completed,
        exercises: payload.exercises,
    };
    let saved = entry.clone();
    state.mutate(move |store| store.add_workout_entry(saved)).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CompletedRequest>,
) -> Result<StatusCode, AppError> {
    state
        .mutate(move |store| store.update_workout_entry(&id, payload.completed))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_exercise(
    State(state): State<AppState>,
    Json(payload): Json<NewExerciseRequest>,
) -> Result<(StatusCode, Json<FitnessExercise>), AppError> {
    let entry = FitnessExercise {
        id: payload.id.unwrap_or_else(generate_id),
        date: payload.date,
        name: payload.name.trim().to_string(),
        duration: payload.duration,
        completed: payload.completed,
    };
    let saved = entry.clone();
    state.mutate(move |store| store.add_fitness_exercise(saved)).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut entry): Json<FitnessExercise>,
) -> Result<StatusCode, AppError> {
    entry.id = id;
    state.mutate(move |store| store.update_fitness_exercise(entry)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.mutate(move |store| store.remove_fitness_exercise(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_journal(
    State(state): State<AppState>,
    Json(payload): Json<NewJournalRequest>,
) -> Result<StatusCode, AppError> {
    let entry = JournalEntry {
        id: payload.id.unwrap_or_else(generate_id),
        date: payload.date,
        title: payload.title,
        content: payload.content,
        mood: payload.mood,
        tags: payload.tags,
    };
    state.mutate(move |store| store.add_journal_entry(entry)).await?;
    Ok(StatusCode::CREATED)
}

pub async fn remove_journal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.mutate(move |store| store.remove_journal_entry(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn water_response(date: NaiveDate, cups: u32, goal: u32, just_reached: bool) -> WaterResponse {
    WaterResponse {
        date,
        cups,
        goal,
        goal_reached: water_goal_reached(cups, goal),
        just_reached,
    }
}
