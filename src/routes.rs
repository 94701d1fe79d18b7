use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth;
use crate::handlers;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/auth/signin", post(handlers::auth::sign_in))
        .route("/api/auth/signup", post(handlers::auth::sign_up));

    let protected_routes = Router::new()
        .route(
            "/api/me",
            get(handlers::auth::me).put(handlers::auth::update_me),
        )
        .route("/api/auth/signout", post(handlers::auth::sign_out))
        // Habits
        .route(
            "/api/habits",
            get(handlers::habits::list_habits).post(handlers::habits::create_habit),
        )
        .route("/api/habits/:id", get(handlers::habits::get_habit))
        .route("/api/habits/:id/checkin", post(handlers::habits::check_in))
        .route("/api/habits/:id/streak", get(handlers::habits::get_streak))
        // Moods
        .route(
            "/api/moods",
            get(handlers::moods::list_moods).post(handlers::moods::log_mood),
        )
        // Pet & postcards
        .route("/api/pet", get(handlers::pet::get_pet))
        .route("/api/pet/postcards", get(handlers::pet::list_postcards))
        .route("/api/pet/postcards/:id", get(handlers::pet::get_postcard))
        // Chat
        .route(
            "/api/chat",
            get(handlers::chat::get_chat).post(handlers::chat::send_message),
        )
        // Community
        .route(
            "/api/community/stories",
            get(handlers::community::list_stories).post(handlers::community::create_story),
        )
        .route(
            "/api/community/stories/:id/like",
            post(handlers::community::like_story),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn signed_in_app() -> Router {
        let app = router(AppState::new(Config::default()));
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            Some(json!({"email": "ada@example.com", "password": "pw", "username": "ada"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        app
    }

    async fn create_habit(app: &Router, title: &str) -> String {
        let (status, habit) = send(app, Method::POST, "/api/habits", Some(json!({"title": title}))).await;
        assert_eq!(status, StatusCode::OK);
        habit["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = router(AppState::new(Config::default()));
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_protected_routes_require_session() {
        let app = router(AppState::new(Config::default()));
        let (status, body) = send(&app, Method::GET, "/api/habits", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], 401);
    }

    #[tokio::test]
    async fn test_sign_in_then_out() {
        let app = router(AppState::new(Config::default()));
        let (status, me) = send(
            &app,
            Method::POST,
            "/api/auth/signin",
            Some(json!({"email": "ada@example.com", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["username"], "ada@example.com");
        assert_eq!(me["streak_count"], 0);

        let (status, _) = send(&app, Method::GET, "/api/me", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::POST, "/api/auth/signout", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/api/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_sign_in_validates_email() {
        let app = router(AppState::new(Config::default()));
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/signin",
            Some(json!({"email": "nope", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_blank_habit_title_rejected() {
        let app = signed_in_app().await;
        let (status, _) = send(&app, Method::POST, "/api/habits", Some(json!({"title": "   "}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_check_in_today_then_again() {
        let app = signed_in_app().await;
        let id = create_habit(&app, "Read").await;
        let uri = format!("/api/habits/{}/checkin", id);

        let (status, report) = send(&app, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["status"], "recorded");
        assert_eq!(report["streak_count"], 1);
        assert_eq!(report["habit"]["is_completed"], true);

        let (status, report) = send(&app, Method::POST, &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["status"], "already_checked_in");
        assert_eq!(report["habit"]["completion_dates"].as_array().unwrap().len(), 1);

        let (_, habits) = send(&app, Method::GET, "/api/habits", None).await;
        assert_eq!(habits[0]["completed_today"], true);
        assert_eq!(habits[0]["current_streak"], 1);
    }

    #[tokio::test]
    async fn test_future_check_in_rejected() {
        let app = signed_in_app().await;
        let id = create_habit(&app, "Read").await;
        let tomorrow = chrono::Utc::now().date_naive() + chrono::Duration::days(1);

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/habits/{}/checkin", id),
            Some(json!({"date": tomorrow})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["message"].as_str().unwrap().contains("future"));
    }

    #[tokio::test]
    async fn test_unparseable_check_in_date_rejected() {
        let app = signed_in_app().await;
        let id = create_habit(&app, "Read").await;
        let uri = format!("/api/habits/{}/checkin", id);

        let (status, body) = send(&app, Method::POST, &uri, Some(json!({"date": "2026-13-45"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);

        let truncated = Request::builder()
            .method(Method::POST)
            .uri(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"date":"yesterday"#))
            .unwrap();
        let response = app.clone().oneshot(truncated).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let (_, habit) = send(&app, Method::GET, &format!("/api/habits/{}", id), None).await;
        assert!(habit["completion_dates"].as_array().unwrap().is_empty());
        assert_eq!(habit["is_completed"], false);
        let (_, me) = send(&app, Method::GET, "/api/me", None).await;
        assert_eq!(me["streak_count"], 0);
    }

    #[tokio::test]
    async fn test_backfilled_habit_not_completed_today() {
        let app = signed_in_app().await;
        let id = create_habit(&app, "Read").await;
        let yesterday = chrono::Utc::now().date_naive() - chrono::Duration::days(1);

        let (status, report) = send(
            &app,
            Method::POST,
            &format!("/api/habits/{}/checkin", id),
            Some(json!({"date": yesterday})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["habit"]["is_completed"], false);

        let (_, habit) = send(&app, Method::GET, &format!("/api/habits/{}", id), None).await;
        assert_eq!(habit["is_completed"], false);
        assert_eq!(habit["completion_dates"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_habit_is_not_found() {
        let app = signed_in_app().await;
        let uri = format!("/api/habits/{}/streak", uuid::Uuid::new_v4());
        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_five_day_streak_delivers_earth_postcards() {
        let app = signed_in_app().await;
        let id = create_habit(&app, "Walk").await;
        let uri = format!("/api/habits/{}/checkin", id);
        let today = chrono::Utc::now().date_naive();

        for offset in (0..5).rev() {
            let date = today - chrono::Duration::days(offset);
            let (status, _) = send(&app, Method::POST, &uri, Some(json!({"date": date}))).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, pet) = send(&app, Method::GET, "/api/pet", None).await;
        assert_eq!(pet["current_planet"], "moon");
        assert_eq!(pet["next_unlock_at"], 7);

        let (_, inbox) = send(&app, Method::GET, "/api/pet/postcards", None).await;
        let inbox = inbox.as_array().unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0]["unlock_requirement"], 5);

        let card_uri = format!("/api/pet/postcards/{}", inbox[1]["id"].as_str().unwrap());
        let (status, card) = send(&app, Method::GET, &card_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card["planet"], "earth");

        let (_, me) = send(&app, Method::GET, "/api/me", None).await;
        assert_eq!(me["streak_count"], 5);
        assert_eq!(me["postcards_count"], 2);
    }

    #[tokio::test]
    async fn test_moods_newest_first() {
        let app = signed_in_app().await;
        let (status, mood) = send(
            &app,
            Method::POST,
            "/api/moods",
            Some(json!({"emoji": "calm", "date": "2026-01-01T08:00:00Z"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mood["glyph"], "😌");

        send(&app, Method::POST, "/api/moods", Some(json!({"emoji": "happy", "note": "sunny"}))).await;

        let (_, moods) = send(&app, Method::GET, "/api/moods", None).await;
        assert_eq!(moods[0]["emoji"], "happy");
        assert_eq!(moods[1]["emoji"], "calm");

        let (status, _) = send(&app, Method::POST, "/api/moods", Some(json!({"emoji": "bored"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_chat_suggestions_disappear_after_first_message() {
        let app = signed_in_app().await;
        let (_, history) = send(&app, Method::GET, "/api/chat", None).await;
        assert_eq!(history["messages"].as_array().unwrap().len(), 1);
        assert_eq!(history["suggestions"].as_array().unwrap().len(), 5);

        let (status, exchange) = send(
            &app,
            Method::POST,
            "/api/chat",
            Some(json!({"content": "Tell me about your journey"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(exchange["reply"]["is_from_pet"], true);
        assert!(exchange["reply"]["content"].as_str().unwrap().contains("Earth"));

        let (_, history) = send(&app, Method::GET, "/api/chat", None).await;
        assert_eq!(history["messages"].as_array().unwrap().len(), 3);
        assert!(history["suggestions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_community_post_and_like() {
        let app = signed_in_app().await;
        let (status, story) = send(
            &app,
            Method::POST,
            "/api/community/stories",
            Some(json!({"content": "Ten days of reading!", "tags": ["growth"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(story["username"], "ada");

        let (_, growth) = send(&app, Method::GET, "/api/community/stories?tag=growth", None).await;
        assert_eq!(growth.as_array().unwrap().len(), 3);
        assert_eq!(growth[0]["id"], story["id"]);

        let like_uri = format!("/api/community/stories/{}/like", story["id"].as_str().unwrap());
        let (_, liked) = send(&app, Method::POST, &like_uri, None).await;
        assert_eq!(liked["likes"], 1);
        assert_eq!(liked["liked"], true);
    }

    #[tokio::test]
    async fn test_rename_user() {
        let app = signed_in_app().await;
        let (status, me) = send(&app, Method::PUT, "/api/me", Some(json!({"username": "Ada L"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["username"], "Ada L");

        let (status, _) = send(&app, Method::PUT, "/api/me", Some(json!({"username": ""}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
