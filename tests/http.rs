use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WaterResponse {
    date: String,
    cups: u32,
    goal: u32,
    goal_reached: bool,
    just_reached: bool,
}

#[derive(Debug, Deserialize)]
struct MoodEntry {
    date: String,
    mood: String,
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MealEntry {
    id: String,
    date: String,
    calories: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    mood_entries: Vec<MoodEntry>,
    meal_entries: Vec<MealEntry>,
    water_goal: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealDay {
    total_calories: u64,
}

struct TestServer {
    base_url: String,
    data_dir: PathBuf,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("health_tracker_http_{}_{}", std::process::id(), nanos));
    path
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/dashboard")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_dir = unique_data_dir();
    let child = Command::new(env!("CARGO_BIN_EXE_health_tracker"))
        .env("PORT", port.to_string())
        .env("HEALTH_DATA_DIR", &data_dir)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        data_dir,
        child,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    #[cfg(unix)]
    cleanup::register(server.child.id());
    *guard = Some(Arc::clone(&server));
    server
}

async fn snapshot(client: &Client, base_url: &str) -> Snapshot {
    client
        .get(format!("{base_url}/api/snapshot"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_water_cups_accumulate_and_reset() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let url = format!("{}/api/water/2030-01-01", server.base_url);

    let mut last = None;
    for _ in 0..3 {
        let water: WaterResponse = client
            .post(format!("{url}/cup"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        last = Some(water);
    }
    let last = last.unwrap();
    assert_eq!(last.date, "2030-01-01");
    assert_eq!(last.cups, 3);
    assert!(!last.goal_reached);
    assert!(!last.just_reached);

    let reset: WaterResponse = client.delete(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(reset.cups, 0);

    let again: WaterResponse = client
        .post(format!("{url}/cup"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(again.cups, 1);
    assert_eq!(again.goal, snapshot(&client, &server.base_url).await.water_goal);

    let slot = std::fs::read_to_string(server.data_dir.join("healthApp.waterEntries.json"))
        .expect("water slot written through");
    assert!(slot.contains("2030-01-01"));
}

#[tokio::test]
async fn http_mood_for_same_date_replaces() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for (mood, note) in [("happy", None), ("calm", Some("after a walk"))] {
        let response = client
            .post(format!("{}/api/mood", server.base_url))
            .json(&serde_json::json!({ "date": "2030-02-01", "mood": mood, "note": note }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let data = snapshot(&client, &server.base_url).await;
    let moods: Vec<_> = data
        .mood_entries
        .iter()
        .filter(|e| e.date == "2030-02-01")
        .collect();
    assert_eq!(moods.len(), 1);
    assert_eq!(moods[0].mood, "calm");
    assert_eq!(moods[0].note.as_deref(), Some("after a walk"));

    let unknown = client
        .post(format!("{}/api/mood", server.base_url))
        .json(&serde_json::json!({ "date": "2030-02-01", "mood": "bored" }))
        .send()
        .await
        .unwrap();
    assert!(unknown.status().is_client_error());
}

#[tokio::test]
async fn http_meals_validate_and_remove() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let meals_url = format!("{}/api/meals", server.base_url);

    let rejected = client
        .post(&meals_url)
        .json(&serde_json::json!({
            "date": "2030-03-01", "name": "Toast", "calories": 0, "mealType": "breakfast"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let mut ids = Vec::new();
    for calories in [300, 150] {
        let created: MealEntry = client
            .post(&meals_url)
            .json(&serde_json::json!({
                "date": "2030-03-01", "name": "Toast", "calories": calories, "mealType": "breakfast"
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(created.calories, calories);
        ids.push(created.id);
    }

    let day: MealDay = client
        .get(format!("{}/api/meal-days/2030-03-01", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(day.total_calories, 450);

    let before = snapshot(&client, &server.base_url).await.meal_entries.len();
    let missing = client
        .delete(format!("{meals_url}/nonexistent"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NO_CONTENT);
    assert_eq!(snapshot(&client, &server.base_url).await.meal_entries.len(), before);

    client
        .delete(format!("{meals_url}/{}", ids[0]))
        .send()
        .await
        .unwrap();
    let after = snapshot(&client, &server.base_url).await;
    assert_eq!(after.meal_entries.len(), before - 1);
    assert!(after.meal_entries.iter().all(|m| m.id != ids[0]));
    assert!(after.meal_entries.iter().any(|m| m.date == "2030-03-01"));
}

#[tokio::test]
async fn http_goal_must_be_positive() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let url = format!("{}/api/goals/water", server.base_url);

    let rejected = client
        .put(&url)
        .json(&serde_json::json!({ "goal": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let accepted = client
        .put(&url)
        .json(&serde_json::json!({ "goal": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(accepted.status(), StatusCode::NO_CONTENT);
    assert_eq!(snapshot(&client, &server.base_url).await.water_goal, 10);
}

async fn add_cup(client: &Client, base_url: &str, date: &str) -> WaterResponse {
    client
        .post(format!("{base_url}/api/water/{date}/cup"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[cfg(unix)]
#[tokio::test]
async fn http_sigterm_flushes_every_slot() {
    let _guard = TEST_LOCK.lock().await;
    let mut server = spawn_server().await;
    let client = Client::new();

    let accepted = client
        .put(format!("{}/api/goals/water", server.base_url))
        .json(&serde_json::json!({ "goal": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(accepted.status(), StatusCode::NO_CONTENT);

    let first = add_cup(&client, &server.base_url, "2030-04-01").await;
    let second = add_cup(&client, &server.base_url, "2030-04-01").await;
    let third = add_cup(&client, &server.base_url, "2030-04-01").await;
    assert!(!first.goal_reached && !first.just_reached);
    assert!(second.goal_reached && second.just_reached);
    assert!(third.goal_reached && !third.just_reached);

    let sleep_goal = server.data_dir.join("healthApp.sleepGoal.json");
    assert!(!sleep_goal.exists());

    unsafe {
        libc::kill(server.child.id() as i32, libc::SIGTERM);
    }
    let deadline = Instant::now() + Duration::from_secs(5);
    let status = loop {
        if let Some(status) = server.child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() > deadline {
            panic!("server ignored SIGTERM");
        }
        sleep(Duration::from_millis(50)).await;
    };
    assert!(status.success());
    assert_eq!(std::fs::read_to_string(sleep_goal).unwrap(), "8");
}
