//! HTTP handlers.
//!
//! Every handler holds the tracker lock for its whole read-modify-write, so
//! concurrent check-ins of the same habit are applied one after the other.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use chrono::{DateTime, Utc};
use habits_core::{CoreError, HabitStatus, Tracker};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::views::{self, Alert};

/// State shared across handlers.
pub struct AppState {
    pub tracker: Mutex<Tracker>,
    clock: fn() -> DateTime<Utc>,
}

impl AppState {
    pub fn new(tracker: Tracker) -> Self {
        Self::with_clock(tracker, Utc::now)
    }

    /// State whose notion of "now" comes from `clock`.
    pub fn with_clock(tracker: Tracker, clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            tracker: Mutex::new(tracker),
            clock,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

pub type SharedState = Arc<AppState>;

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(home).post(delete))
        .route("/perform", axum::routing::post(perform))
        .route("/habit", get(new_habit).post(create))
        .route("/health", get(health))
        .with_state(state)
}

/// Core failure rendered as a page.
pub struct AppError(CoreError);

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::AlreadyExists(_) | CoreError::Streak(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let alert = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
            Alert::error(views::GENERIC_ALERT)
        } else {
            tracing::warn!(error = %self.0, "request rejected");
            Alert::error(self.0.to_string())
        };
        (status, Html(views::error(&alert))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub delete: String,
}

#[derive(Debug, Deserialize)]
pub struct PerformForm {
    pub perform: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    pub name: String,
}

fn statuses(tracker: &Tracker, now: DateTime<Utc>) -> Result<Vec<HabitStatus>, CoreError> {
    Ok(tracker
        .list_all()?
        .iter()
        .map(|habit| tracker.status(habit, now))
        .collect())
}

pub async fn home(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let tracker = state.tracker.lock().await;
    let statuses = statuses(&tracker, state.now())?;
    Ok(Html(views::home(&statuses, None)))
}

pub async fn delete(
    State(state): State<SharedState>,
    Form(form): Form<DeleteForm>,
) -> Result<Html<String>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.delete(&form.delete)?;
    let statuses = statuses(&tracker, state.now())?;
    let alert = Alert::success(format!("Stopped tracking '{}'.", form.delete.trim()));
    Ok(Html(views::home(&statuses, Some(&alert))))
}

pub async fn perform(
    State(state): State<SharedState>,
    Form(form): Form<PerformForm>,
) -> Result<Html<String>, AppError> {
    let mut tracker = state.tracker.lock().await;
    // Only habits listed on the home page can be performed from the web.
    tracker.get(&form.perform)?;
    let check_in = tracker.check_in(&form.perform, state.now())?;
    Ok(Html(views::perform(&Alert::neutral(check_in.message))))
}

pub async fn new_habit() -> Html<String> {
    Html(views::new_habit(None))
}

pub async fn create(State(state): State<SharedState>, Form(form): Form<CreateForm>) -> Response {
    let mut tracker = state.tracker.lock().await;
    match tracker.create(&form.name, state.now()) {
        Ok(habit) => Html(views::new_habit(Some(&Alert::success(format!(
            "You successfully created a {} Habit",
            habit.name
        )))))
        .into_response(),
        Err(CoreError::AlreadyExists(_)) => (
            StatusCode::CONFLICT,
            Html(views::new_habit(Some(&Alert::error("Habit already exists")))),
        )
            .into_response(),
        Err(err @ CoreError::Validation(_)) => (
            StatusCode::BAD_REQUEST,
            Html(views::new_habit(Some(&Alert::error(err.to_string())))),
        )
            .into_response(),
        Err(err) => AppError(err).into_response(),
    }
}

pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use chrono::TimeZone;
    use habits_core::{Habit, MemoryStore, StreakEngine};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 10, 15, 17, 8, 0).unwrap()
    }

    fn state(habits: Vec<Habit>) -> SharedState {
        let tracker = Tracker::new(
            Box::new(MemoryStore::with_habits(habits)),
            StreakEngine::new(),
        );
        Arc::new(AppState::with_clock(tracker, fixed_now))
    }

    fn yesterday(name: &str, streak: u32) -> Habit {
        Habit {
            name: name.into(),
            last_performed: Utc.with_ymd_and_hms(2021, 10, 14, 15, 9, 0).unwrap(),
            streak,
            done: false,
        }
    }

    async fn body(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn home_lists_habits() {
        let state = state(vec![yesterday("Go", 4)]);
        let response = home(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.contains("Go"));
    }

    #[tokio::test]
    async fn create_then_duplicate() {
        let state = state(vec![]);
        let response = create(
            State(state.clone()),
            Form(CreateForm {
                name: "piano".into(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response)
            .await
            .contains("You successfully created a piano Habit"));

        let response = create(
            State(state.clone()),
            Form(CreateForm {
                name: "piano".into(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(body(response).await.contains("Habit already exists"));

        let stored = state.tracker.lock().await.get("piano").unwrap();
        assert_eq!(stored.streak, 1);
        assert_eq!(stored.last_performed, fixed_now());
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let response = create(
            State(state(vec![])),
            Form(CreateForm { name: "  ".into() }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn perform_reports_engine_message() {
        let state = state(vec![yesterday("docker", 16)]);
        let response = perform(
            State(state.clone()),
            Form(PerformForm {
                perform: "docker".into(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body(response).await;
        assert!(page.contains("17-day streak"), "{page}");
        assert!(page.contains("solid blue"));
        assert_eq!(state.tracker.lock().await.get("docker").unwrap().streak, 17);
    }

    #[tokio::test]
    async fn perform_unknown_habit_is_404_and_creates_nothing() {
        let state = state(vec![]);
        let response = perform(
            State(state.clone()),
            Form(PerformForm {
                perform: "ghost".into(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(state.tracker.lock().await.list_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_and_rerenders_home() {
        let state = state(vec![yesterday("code", 4), yesterday("Go", 2)]);
        let response = delete(
            State(state.clone()),
            Form(DeleteForm {
                delete: "code".into(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body(response).await;
        assert!(page.contains("Stopped tracking &#39;code&#39;."));
        assert!(page.contains("Go"));
        assert_eq!(state.tracker.lock().await.list_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_performs_are_serialized() {
        let state = state(vec![yesterday("Go", 4)]);
        let mut handles = Vec::new();
        for _ in 0..8 {
            let state = state.clone();
            handles.push(tokio::spawn(async move {
                perform(
                    State(state),
                    Form(PerformForm {
                        perform: "Go".into(),
                    }),
                )
                .await
                .into_response()
                .status()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::OK);
        }
        // One increment for the new day, the rest are same-day check-ins.
        assert_eq!(state.tracker.lock().await.get("Go").unwrap().streak, 5);
    }

    #[tokio::test]
    async fn router_builds() {
        let _router = create_router(state(vec![]));
        assert_eq!(health().await, "ok");
    }
}
