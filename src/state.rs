use crate::errors::{AppError, StoreResult};
use crate::storage::FileSlots;
use crate::store::HealthStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<HealthStore<FileSlots>>>,
}

impl AppState {
    pub fn new(store: HealthStore<FileSlots>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs a mutator on the blocking pool. Mutators write through to disk
    /// with std fs, which must stay off the async workers.
    pub async fn mutate<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&mut HealthStore<FileSlots>) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || f(&mut store.blocking_lock()))
            .await
            .map_err(AppError::internal)?;
        Ok(result?)
    }

    /// Final write of every slot, also off the async workers.
    pub async fn flush(&self) -> Result<(), AppError> {
        self.mutate(|store| store.flush()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealEntry, MealType};
    use axum::http::StatusCode;
    use chrono::NaiveDate;

    fn unique_dir() -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("health_tracker_state_{}_{}", std::process::id(), nanos));
        path
    }

    #[tokio::test]
    async fn mutate_writes_through_and_maps_rejections() {
        let dir = unique_dir();
        let state = AppState::new(HealthStore::load(FileSlots::open(&dir).unwrap()));
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let cups = state.mutate(move |store| store.add_water_cup(date)).await.unwrap();
        assert_eq!(cups, 1);
        assert!(dir.join("healthApp.waterEntries.json").exists());

        let rejected = state
            .mutate(move |store| {
                store.add_meal_entry(MealEntry {
                    id: "m1".into(),
                    date,
                    name: "Soup".into(),
                    calories: 0,
                    meal_type: MealType::Lunch,
                })
            })
            .await
            .unwrap_err();
        assert_eq!(rejected.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(state.store.lock().await.data().meal_entries.is_empty());

        state.flush().await.unwrap();
        assert!(dir.join("healthApp.sleepGoal.json").exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
