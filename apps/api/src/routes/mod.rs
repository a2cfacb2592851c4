pub mod catalog;
pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::forms::{handlers as forms, FormItem};
use crate::models::resume::{
    Achievement, Certification, Education, Hackathon, Internship, Language, Project, Skill,
};
use crate::pricing::handlers as pricing;
use crate::session::handlers as sessions;
use crate::state::AppState;

const SESSION: &str = "/api/v1/sessions/:sid";

/// Mounts the list-form endpoints for one section under `/forms/<section>`.
fn section_routes<T: FormItem>(router: Router<AppState>) -> Router<AppState> {
    let base = format!("{SESSION}/forms/{}", T::SECTION.as_str());
    router
        .route(&base, get(forms::handle_get_form::<T>))
        .route(&format!("{base}/buffer"), put(forms::handle_set_buffer::<T>))
        .route(
            &format!("{base}/suggestion"),
            post(forms::handle_apply_suggestion::<T>),
        )
        .route(
            &format!("{base}/edit/:item_id"),
            post(forms::handle_begin_edit::<T>),
        )
        .route(&format!("{base}/cancel"), post(forms::handle_cancel::<T>))
        .route(&format!("{base}/save"), post(forms::handle_save_item::<T>))
        .route(
            &format!("{base}/items/:item_id"),
            delete(forms::handle_delete_item::<T>),
        )
        .route(
            &format!("{base}/continue"),
            post(forms::handle_save_and_continue::<T>),
        )
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_handler))
        // Static catalogs
        .route("/api/v1/pricing", get(pricing::handle_get_pricing))
        .route(
            "/api/v1/catalog/suggestions",
            get(catalog::handle_get_suggestions),
        )
        .route(
            "/api/v1/catalog/skills/:category",
            get(catalog::handle_skill_suggestions),
        )
        .route(
            "/api/v1/catalog/languages/:language/certifications",
            get(catalog::handle_language_certifications),
        )
        // Sessions and wizard
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(SESSION, delete(sessions::handle_delete_session))
        .route(
            &format!("{SESSION}/resume"),
            get(sessions::handle_get_resume),
        )
        .route(
            &format!("{SESSION}/wizard"),
            get(sessions::handle_get_progress),
        )
        .route(
            &format!("{SESSION}/wizard/step"),
            put(sessions::handle_set_step),
        )
        .route(
            &format!("{SESSION}/job-role"),
            put(sessions::handle_set_job_role),
        )
        .route(
            &format!("{SESSION}/roadmap"),
            put(sessions::handle_set_roadmap),
        )
        .route(
            &format!("{SESSION}/toasts"),
            get(sessions::handle_drain_toasts),
        )
        // Personal info
        .route(
            &format!("{SESSION}/personal-info"),
            get(forms::handle_get_personal_info).put(forms::handle_set_personal_info),
        )
        .route(
            &format!("{SESSION}/personal-info/continue"),
            post(forms::handle_personal_info_continue),
        )
        // Checkout
        .route(
            &format!("{SESSION}/checkout"),
            post(pricing::handle_checkout),
        );

    let router = section_routes::<Education>(router);
    let router = section_routes::<Skill>(router);
    let router = section_routes::<Project>(router);
    let router = section_routes::<Certification>(router);
    let router = section_routes::<Hackathon>(router);
    let router = section_routes::<Internship>(router);
    let router = section_routes::<Achievement>(router);
    let router = section_routes::<Language>(router);

    router.with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::errors::AppError;
    use crate::pricing::catalog::CatalogItem;
    use crate::pricing::payment::{PaymentDetails, PaymentReceipt};
    use crate::pricing::PaymentProcessor;

    fn app() -> Router {
        let config = Config {
            payment_delay_ms: 50,
            ..Config::default()
        };
        build_router(AppState::new(config))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let uri = format!("/api/v1/sessions/{}/resume", uuid::Uuid::new_v4());
        let (status, body) = send(&app(), "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_skill_lifecycle_over_http() {
        let app = app();
        let sid = new_session(&app).await;
        let base = format!("/api/v1/sessions/{sid}/forms/skills");

        let (status, body) = send(
            &app,
            "POST",
            &format!("{base}/save"),
            Some(json!({"name": "Go", "level": "Advanced", "category": "Technical"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["item_id"].as_str().unwrap().to_string();
        assert_eq!(body["form"]["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["form"]["groups"][0]["category"], "Technical");
        assert_eq!(body["form"]["groups"][0]["items"].as_array().unwrap().len(), 1);

        let (status, body) = send(&app, "POST", &format!("{base}/edit/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"]["state"], "editing");
        assert_eq!(body["buffer"]["name"], "Go");

        let (_, body) = send(
            &app,
            "POST",
            &format!("{base}/save"),
            Some(json!({"name": "Go", "level": "Expert", "category": "Technical"})),
        )
        .await;
        assert_eq!(body["item_id"], id.as_str());
        assert_eq!(body["form"]["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["form"]["items"][0]["level"], "Expert");
        assert_eq!(body["form"]["mode"]["state"], "idle");

        let (status, body) = send(&app, "DELETE", &format!("{base}/items/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"], true);
        assert!(body["form"]["items"].as_array().unwrap().is_empty());
        assert!(body["form"]["groups"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_save_returns_400_and_error_toast() {
        let app = app();
        let sid = new_session(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{sid}/forms/achievements/save"),
            Some(json!({"title": "", "description": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, toasts) = send(&app, "GET", &format!("/api/v1/sessions/{sid}/toasts"), None).await;
        assert_eq!(toasts.as_array().unwrap().len(), 1);
        assert_eq!(toasts[0]["kind"], "error");

        let (_, toasts) = send(&app, "GET", &format!("/api/v1/sessions/{sid}/toasts"), None).await;
        assert!(toasts.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_language_over_http() {
        let app = app();
        let sid = new_session(&app).await;
        let save = format!("/api/v1/sessions/{sid}/forms/languages/save");

        let (status, _) = send(&app, "POST", &save, Some(json!({"name": "English"}))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "POST", &save, Some(json!({"name": "ENGLISH"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_continue_pushes_to_store_and_advances() {
        let app = app();
        let sid = new_session(&app).await;
        let base = format!("/api/v1/sessions/{sid}/forms/projects");

        send(
            &app,
            "POST",
            &format!("{base}/save"),
            Some(json!({"title": "Resume API", "description": "Axum service"})),
        )
        .await;

        let (_, resume) = send(&app, "GET", &format!("/api/v1/sessions/{sid}/resume"), None).await;
        assert!(resume["resume"]["projects"].as_array().unwrap().is_empty());

        let (status, outcome) = send(&app, "POST", &format!("{base}/continue"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["completed_step"], 3);
        assert_eq!(outcome["current_step"], 1);

        let (_, resume) = send(&app, "GET", &format!("/api/v1/sessions/{sid}/resume"), None).await;
        assert_eq!(resume["resume"]["projects"].as_array().unwrap().len(), 1);

        let (_, progress) = send(&app, "GET", &format!("/api/v1/sessions/{sid}/wizard"), None).await;
        assert_eq!(progress["completed_steps"], json!([3]));
        assert_eq!(progress["current_step"], 1);
    }

    #[tokio::test]
    async fn test_personal_info_flow() {
        let app = app();
        let sid = new_session(&app).await;
        let base = format!("/api/v1/sessions/{sid}/personal-info");

        send(
            &app,
            "PUT",
            &base,
            Some(json!({"full_name": "Jane Doe", "email": "not-an-email"})),
        )
        .await;
        let (status, _) = send(&app, "POST", &format!("{base}/continue"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        send(
            &app,
            "PUT",
            &base,
            Some(json!({"full_name": "Jane Doe", "email": "jane@example.com"})),
        )
        .await;
        let (status, outcome) = send(&app, "POST", &format!("{base}/continue"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["current_step"], 1);

        let (_, view) = send(&app, "GET", &base, None).await;
        assert_eq!(view["saved"]["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_pricing_catalog() {
        let (status, body) = send(&app(), "GET", "/api/v1/pricing", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["templates"].as_array().unwrap().len(), 3);
        assert_eq!(body["bundle"]["id"], "bundle-complete");
    }

    #[tokio::test]
    async fn test_checkout_unlocks_and_sets_premium() {
        let app = app();
        let sid = new_session(&app).await;
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{sid}/checkout"),
            Some(json!({
                "item_id": "template-executive",
                "payment": {
                    "card_number": "4111111111111111",
                    "expiry": "1228",
                    "cvv": "123",
                    "name": "Jane Doe",
                    "email": "jane@example.com",
                    "billing_address": "1 Main St",
                    "city": "Springfield",
                    "zip": "12345"
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["receipt"]["amount_cents"], 699);
        assert_eq!(body["unlocked"], json!(["template-executive"]));
        assert_eq!(body["is_premium"], true);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_checkout_rejected_while_processing() {
        let app = app();
        let sid = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{sid}/checkout");
        let body = json!({
            "item_id": "feature-cover-letter",
            "payment": {
                "card_number": "4111 1111 1111 1111",
                "expiry": "12/28",
                "cvv": "123",
                "name": "Jane Doe",
                "email": "jane@example.com",
                "billing_address": "1 Main St",
                "city": "Springfield",
                "zip": "12345"
            }
        });

        let first = {
            let app = app.clone();
            let uri = uri.clone();
            let body = body.clone();
            tokio::spawn(async move { send(&app, "POST", &uri, Some(body)).await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let (status, err) = send(&app, "POST", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(err["error"]["code"], "CONFLICT");

        let (status, done) = first.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(done["status"], "succeeded");
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_finishes_after_client_disconnects() {
        let app = app();
        let sid = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{sid}/checkout");
        let body = json!({
            "item_id": "feature-cover-letter",
            "payment": {
                "card_number": "4111111111111111",
                "expiry": "1228",
                "cvv": "123",
                "name": "Jane Doe",
                "email": "jane@example.com",
                "billing_address": "1 Main St",
                "city": "Springfield",
                "zip": "12345"
            }
        });

        let dropped = {
            let app = app.clone();
            let uri = uri.clone();
            let body = body.clone();
            tokio::spawn(async move { send(&app, "POST", &uri, Some(body)).await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        dropped.abort();
        assert!(dropped.await.unwrap_err().is_cancelled());
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;

        let (_, resume) = send(&app, "GET", &format!("/api/v1/sessions/{sid}/resume"), None).await;
        assert_eq!(resume["unlocked"], json!(["feature-cover-letter"]));
        assert_eq!(resume["resume"]["is_premium"], true);

        let (status, done) = send(&app, "POST", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(done["status"], "succeeded");
    }

    struct DecliningProcessor;

    #[async_trait::async_trait]
    impl PaymentProcessor for DecliningProcessor {
        async fn process(
            &self,
            _details: &PaymentDetails,
            _item: CatalogItem,
        ) -> Result<PaymentReceipt, AppError> {
            Err(AppError::Internal(anyhow::anyhow!("card declined")))
        }
    }

    #[tokio::test]
    async fn test_processor_error_reenables_checkout() {
        let state = AppState {
            payment_processor: std::sync::Arc::new(DecliningProcessor),
            ..AppState::new(Config::default())
        };
        let app = build_router(state);
        let sid = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{sid}/checkout");
        let body = json!({
            "item_id": "template-executive",
            "payment": {
                "card_number": "4111111111111111",
                "expiry": "1228",
                "cvv": "123",
                "name": "Jane Doe",
                "email": "jane@example.com",
                "billing_address": "1 Main St",
                "city": "Springfield",
                "zip": "12345"
            }
        });

        for _ in 0..2 {
            let (status, err) = send(&app, "POST", &uri, Some(body.clone())).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err["error"]["code"], "INTERNAL_ERROR");
        }

        let (_, resume) = send(&app, "GET", &format!("/api/v1/sessions/{sid}/resume"), None).await;
        assert_eq!(resume["resume"]["is_premium"], false);
        let (_, toasts) = send(&app, "GET", &format!("/api/v1/sessions/{sid}/toasts"), None).await;
        assert_eq!(toasts[0]["kind"], "error");
    }

    #[tokio::test]
    async fn test_delete_session() {
        let app = app();
        let sid = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{sid}");

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &format!("{uri}/resume"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_checkout_missing_field_is_rejected() {
        let app = app();
        let sid = new_session(&app).await;
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{sid}/checkout"),
            Some(json!({
                "item_id": "template-executive",
                "payment": { "card_number": "4111111111111111" }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, resume) = send(&app, "GET", &format!("/api/v1/sessions/{sid}/resume"), None).await;
        assert_eq!(resume["resume"]["is_premium"], false);
    }

    #[tokio::test]
    async fn test_checkout_unknown_item() {
        let app = app();
        let sid = new_session(&app).await;
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{sid}/checkout"),
            Some(json!({ "item_id": "template-nope", "payment": {} })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_skill_suggestions_route() {
        let (status, body) = send(&app(), "GET", "/api/v1/catalog/skills/Tools", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["suggestions"]
            .as_array()
            .unwrap()
            .contains(&json!("Docker")));
    }
}
