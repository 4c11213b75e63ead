use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/snapshot", get(handlers::get_snapshot))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/trends", get(handlers::get_trends))
        .route("/api/mood", post(handlers::add_mood))
        .route(
            "/api/water/:date",
            get(handlers::get_water).delete(handlers::reset_water),
        )
        .route("/api/water/:date/cup", post(handlers::add_water_cup))
        .route("/api/goals/water", put(handlers::set_water_goal))
        .route("/api/goals/sleep", put(handlers::set_sleep_goal))
        .route("/api/meals", post(handlers::add_meal))
        .route("/api/meal-days/:date", get(handlers::get_meal_day))
        .route("/api/meals/:id", delete(handlers::remove_meal))
        .route("/api/sleep", post(handlers::add_sleep))
        .route("/api/weight", post(handlers::add_weight))
        .route("/api/workouts", post(handlers::add_workout))
        .route("/api/workouts/:id", patch(handlers::update_workout))
        .route("/api/exercises", post(handlers::add_exercise))
        .route(
            "/api/exercises/:id",
            put(handlers::update_exercise).delete(handlers::remove_exercise),
        )
        .route("/api/journal", post(handlers::add_journal))
        .route("/api/journal/:id", delete(handlers::remove_journal))
        .with_state(state)
}
