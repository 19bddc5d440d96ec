// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod api;
pub mod common;
pub mod config;
pub mod console;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod query;
pub mod services;

#[cfg(test)]
pub mod test_support;

use crate::{config::AppState, docs::ApiDoc, middleware::auth::console_guard};

/// Router completo do console (rotas públicas, rotas protegidas e docs).
pub fn app(app_state: AppState) -> Router {
    // Login e cadastro (públicas)
    let auth_routes = Router::new()
        .route("/sign-in", post(handlers::auth::send_code))
        .route("/verify", post(handlers::auth::verify_code))
        .route("/password", post(handlers::auth::password_sign_in))
        .route("/sign-up", post(handlers::auth::sign_up_admin))
        .route("/sign-out", post(handlers::auth::sign_out));

    // Tudo que exige sessão passa pelo gate
    let console_routes = Router::new()
        .route("/shell", get(handlers::shell::shell_view))
        .route("/toasts", get(handlers::shell::drain_toasts))
        .route("/events"
               ,get(handlers::events::list_events)
               .post(handlers::events::create_event)
        )
        .route("/events/{id}"
               ,get(handlers::events::preview_event)
               .put(handlers::events::edit_event)
        )
        .route("/events/{id}/delete"
               ,get(handlers::events::delete_event_prompt)
               .post(handlers::events::delete_event)
        )
        .route("/merchandise"
               ,get(handlers::merchandise::list_merchandise)
               .post(handlers::merchandise::create_merchandise)
        )
        .route("/merchandise/{id}"
               ,get(handlers::merchandise::preview_merchandise)
               .put(handlers::merchandise::edit_merchandise)
        )
        .route("/merchandise/{id}/delete"
               ,get(handlers::merchandise::delete_merchandise_prompt)
               .post(handlers::merchandise::delete_merchandise)
        )
        .route("/memberships"
               ,get(handlers::memberships::list_memberships)
               .post(handlers::memberships::create_membership)
        )
        .route("/memberships/{id}", get(handlers::memberships::preview_membership))
        .route("/memberships/{id}/delete"
               ,get(handlers::memberships::delete_membership_prompt)
               .post(handlers::memberships::delete_membership)
        )
        .route("/memberships/{id}/card.png", get(handlers::documents::membership_card_png))
        .route("/memberships/{id}/card.pdf", get(handlers::documents::membership_card_pdf))
        .route("/memberships/{id}/nfc", post(handlers::documents::write_membership_nfc))
        .route("/orders", get(handlers::orders::list_orders))
        .route("/orders/{id}", get(handlers::orders::order_details))
        .route("/orders/{id}/status"
               ,get(handlers::orders::order_status_prompt)
               .post(handlers::orders::update_order_status)
        )
        .route("/orders/{id}/export", get(handlers::documents::export_order))
        .route("/orders/{id}/print", get(handlers::documents::print_order))
        .route("/staff"
               ,get(handlers::staff::list_staff)
               .post(handlers::staff::sign_up_staff)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            console_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(handlers::shell::health))
        .route("/console/session", get(handlers::shell::session_gate))
        .nest("/console/auth", auth_routes)
        .nest("/console", console_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        config::ConsoleConfig,
        console::teams::TEAMS,
        query::QueryKey,
        services::{NfcService, UnsupportedNfc},
        test_support::in_memory_backend::{InMemoryBackend, ADMIN_EMAIL, VALID_CODE, VALID_TOKEN},
    };

    fn make_test_state(backend: &InMemoryBackend) -> AppState {
        let config = ConsoleConfig {
            cookie_secure: false,
            ..ConsoleConfig::default()
        };
        AppState::with_connector(config, backend.connector(), NfcService::new(Arc::new(UnsupportedNfc)))
    }

    fn get_as(uri: &str, token: &str) -> Request<Body> {
        Request::get(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    fn post_json_as(uri: &str, token: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn it_should_answer_health_check() {
        let response = app(make_test_state(&InMemoryBackend::seeded()))
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn it_should_return_401_without_token() {
        let response = app(make_test_state(&InMemoryBackend::seeded()))
            .oneshot(Request::get("/console/events").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Please sign in to continue.");
    }

    #[tokio::test]
    async fn it_should_reject_unknown_token_and_forget_its_workspace() {
        let state = make_test_state(&InMemoryBackend::seeded());
        let response = app(state.clone())
            .oneshot(
                Request::get("/console/events")
                    .header(header::AUTHORIZATION, "Bearer stale-token")
                    .header(header::ACCEPT_LANGUAGE, "pt-BR")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["message"], "Faça login para continuar.");
        assert!(state.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn it_should_report_gate_state() {
        let router = app(make_test_state(&InMemoryBackend::seeded()));

        let anonymous = router
            .clone()
            .oneshot(Request::get("/console/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(anonymous).await["state"], "unauthenticated");

        let signed_in = router.oneshot(get_as("/console/session", VALID_TOKEN)).await.unwrap();
        let json = json_body(signed_in).await;
        assert_eq!(json["state"], "authenticated");
        assert_eq!(json["user"]["email"], ADMIN_EMAIL);
    }

    #[tokio::test]
    async fn it_should_filter_merchandise_by_search_text() {
        let response = app(make_test_state(&InMemoryBackend::seeded()))
            .oneshot(get_as("/console/merchandise?search=jer", VALID_TOKEN))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let rows = json["table"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Jersey");
    }

    #[tokio::test]
    async fn it_should_paginate_events_with_configured_page_size() {
        let response = app(make_test_state(&InMemoryBackend::seeded()))
            .oneshot(get_as("/console/events?page=2", VALID_TOKEN))
            .await
            .unwrap();

        let json = json_body(response).await;
        assert_eq!(json["table"]["page"], 2);
        assert_eq!(json["table"]["rows"].as_array().unwrap().len(), 2);
        assert_eq!(json["stats"]["totalEvents"], 7);
    }

    #[tokio::test]
    async fn it_should_create_event_and_refetch_the_list() {
        let backend = InMemoryBackend::seeded();
        let router = app(make_test_state(&backend));

        router.clone().oneshot(get_as("/console/events", VALID_TOKEN)).await.unwrap();
        assert_eq!(backend.fetch_count(QueryKey::AllEvents), 1);

        let body = json!({
            "homeTeam": TEAMS[16].name,
            "awayTeam": TEAMS[3].name,
            "date": "15/08/2099",
            "time": "15:00",
            "venue": "Sportpesa Arena",
            "ticketPrice": 300,
            "availableTickets": 100
        });
        let response = router
            .clone()
            .oneshot(post_json_as("/console/events", VALID_TOKEN, body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(backend.fetch_count(QueryKey::AllEvents), 2);
        assert_eq!(backend.events().len(), 8);

        let toasts = json_body(router.oneshot(get_as("/console/toasts", VALID_TOKEN)).await.unwrap()).await;
        assert_eq!(toasts[0]["title"], "Created!");
        assert_eq!(toasts[0]["variant"], "success");
    }

    #[tokio::test]
    async fn it_should_block_invalid_event_form_before_the_backend() {
        let backend = InMemoryBackend::seeded();
        let body = json!({
            "homeTeam": TEAMS[16].name,
            "awayTeam": TEAMS[16].name,
            "date": "15/08/2099",
            "time": "15:00",
            "venue": "Sportpesa Arena",
            "ticketPrice": 300,
            "availableTickets": 100
        });

        let response = app(make_test_state(&backend))
            .oneshot(post_json_as("/console/events", VALID_TOKEN, body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["details"]["awayTeam"][0], "Home and away teams must be different");
        assert!(!backend.calls().iter().any(|c| c.starts_with("create_event")));
    }

    #[tokio::test]
    async fn it_should_edit_event_under_the_path_id() {
        let backend = InMemoryBackend::seeded();
        let router = app(make_test_state(&backend));

        let body = json!({
            "_id": "e999",
            "homeTeam": "Muranga Seal",
            "awayTeam": "Tusker Fc",
            "date": "2031-01-20",
            "time": "16:00",
            "venue": "Kasarani",
            "ticketPrice": 500,
            "availableTickets": 120,
            "totalTickets": 200
        });
        let response = router
            .clone()
            .oneshot(
                Request::put("/console/events/e3")
                    .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Corpo sem _id também é aceito
        let mut without_id = body.clone();
        without_id.as_object_mut().unwrap().remove("_id");
        without_id["venue"] = json!("Nyayo Stadium");
        let response = router
            .oneshot(
                Request::put("/console/events/e3")
                    .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(without_id.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let events = backend.events();
        let edited = events.iter().find(|e| e.id == "e3").unwrap();
        assert_eq!(edited.venue, "Nyayo Stadium");
        assert!(events.iter().all(|e| e.id != "e999" && !e.id.is_empty()));
        assert_eq!(
            backend.calls().iter().filter(|c| c.as_str() == "edit_event:e3").count(),
            2
        );
    }

    #[tokio::test]
    async fn it_should_require_confirmation_before_delete() {
        let backend = InMemoryBackend::seeded();
        let router = app(make_test_state(&backend));

        let prompt = router.clone().oneshot(get_as("/console/merchandise/m1/delete", VALID_TOKEN)).await.unwrap();
        assert_eq!(
            json_body(prompt).await["prompt"],
            "Are you sure you want to delete Cap? This action cannot be undone."
        );

        let unconfirmed = router
            .clone()
            .oneshot(post_json_as("/console/merchandise/m1/delete", VALID_TOKEN, json!({})))
            .await
            .unwrap();
        assert_eq!(unconfirmed.status(), StatusCode::BAD_REQUEST);
        assert!(!backend.calls().iter().any(|c| c.starts_with("delete_merchandise")));

        let confirmed = router
            .oneshot(post_json_as("/console/merchandise/m1/delete", VALID_TOKEN, json!({ "confirm": true })))
            .await
            .unwrap();
        assert_eq!(confirmed.status(), StatusCode::OK);
        assert_eq!(backend.merchandise().len(), 1);
    }

    #[tokio::test]
    async fn it_should_return_404_for_unknown_record() {
        let response = app(make_test_state(&InMemoryBackend::seeded()))
            .oneshot(get_as("/console/events/missing", VALID_TOKEN))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["details"]["id"], "missing");
    }

    #[tokio::test]
    async fn it_should_only_update_status_of_unfulfilled_orders() {
        let backend = InMemoryBackend::seeded();
        let router = app(make_test_state(&backend));

        // o3 está Delivered
        let delivered = router
            .clone()
            .oneshot(post_json_as("/console/orders/o3/status", VALID_TOKEN, json!({ "confirm": true })))
            .await
            .unwrap();
        assert_eq!(delivered.status(), StatusCode::CONFLICT);

        let processing = router
            .oneshot(post_json_as("/console/orders/o1/status", VALID_TOKEN, json!({ "confirm": true })))
            .await
            .unwrap();
        assert_eq!(processing.status(), StatusCode::OK);
        assert!(backend.calls().contains(&"update_order_status:o1".to_string()));
    }

    #[tokio::test]
    async fn it_should_pass_backend_rejections_through() {
        let backend = InMemoryBackend::seeded();
        let router = app(make_test_state(&backend));
        router.clone().oneshot(get_as("/console/staff", VALID_TOKEN)).await.unwrap();

        backend.reject_next(crate::common::error::ApiError::new(409, "Email already registered"));
        let body = json!({
            "firstName": "Paul",
            "lastName": "Kiprop",
            "email": "paul@mseal.co.ke",
            "phoneNumber": "0733000003"
        });
        let response = router.oneshot(post_json_as("/console/staff", VALID_TOKEN, body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["message"], "Email already registered");
    }

    #[tokio::test]
    async fn it_should_sign_in_with_code_and_set_cookie() {
        let backend = InMemoryBackend::seeded();
        let router = app(make_test_state(&backend));

        let sent = router
            .clone()
            .oneshot(
                Request::post("/console/auth/sign-in")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "email": ADMIN_EMAIL }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(sent.status(), StatusCode::OK);
        assert_eq!(json_body(sent).await["step"], "code");

        let verified = router
            .clone()
            .oneshot(
                Request::post("/console/auth/verify")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "email": ADMIN_EMAIL, "code": VALID_CODE }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(verified.status(), StatusCode::OK);
        let cookie = verified
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(cookie.starts_with(&format!("admin_auth={}", VALID_TOKEN)));
        assert!(cookie.contains("HttpOnly"));
        assert_eq!(json_body(verified).await["step"], "success");

        let toasts = router
            .oneshot(
                Request::get("/console/toasts")
                    .header(header::COOKIE, format!("admin_auth={}", VALID_TOKEN))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = json_body(toasts).await;
        assert_eq!(json[0]["title"], "Sign-In Successfully!");
        assert_eq!(json[0]["description"], "Welcome to the main dashboard!");
    }

    #[tokio::test]
    async fn it_should_reject_incomplete_code_locally() {
        let backend = InMemoryBackend::seeded();
        let response = app(make_test_state(&backend))
            .oneshot(
                Request::post("/console/auth/verify")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "email": ADMIN_EMAIL, "code": "123" }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "Please enter all 6 digits");
        assert!(!backend.calls().iter().any(|c| c.starts_with("verify_code")));
    }

    #[tokio::test]
    async fn it_should_sign_out_and_clear_cookie() {
        let backend = InMemoryBackend::seeded();
        let state = make_test_state(&backend);
        let router = app(state.clone());

        router.clone().oneshot(get_as("/console/shell?path=/orders", VALID_TOKEN)).await.unwrap();
        assert_eq!(state.sessions.len().await, 1);

        let response = router
            .oneshot(
                Request::post("/console/auth/sign-out")
                    .header(header::COOKIE, format!("admin_auth={}", VALID_TOKEN))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cookie = response.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap();
        assert!(cookie.starts_with("admin_auth="));
        assert!(backend.calls().contains(&"logout".to_string()));
        assert!(state.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn it_should_sign_out_token_without_local_workspace() {
        let backend = InMemoryBackend::seeded();
        let state = make_test_state(&backend);

        let response = app(state.clone())
            .oneshot(
                Request::post("/console/auth/sign-out")
                    .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(backend.calls(), vec!["logout".to_string()]);
        assert!(state.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn it_should_mark_active_section_in_shell() {
        let response = app(make_test_state(&InMemoryBackend::seeded()))
            .oneshot(get_as("/console/shell?path=/orders/o1", VALID_TOKEN))
            .await
            .unwrap();

        let json = json_body(response).await;
        assert_eq!(json["displayName"], "Ann Mwangi");
        let active: Vec<&str> = json["sections"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|s| s["active"] == true)
            .map(|s| s["href"].as_str().unwrap())
            .collect();
        assert_eq!(active, vec!["/orders"]);
    }

    #[tokio::test]
    async fn it_should_export_membership_card_png() {
        let response = app(make_test_state(&InMemoryBackend::seeded()))
            .oneshot(get_as("/console/memberships/65f1a2b3c4d5/card.png?side=wallet", VALID_TOKEN))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane Wanjiku-wallet-card.png\""
        );
    }

    #[tokio::test]
    async fn it_should_degrade_nfc_without_hardware() {
        let response = app(make_test_state(&InMemoryBackend::seeded()))
            .oneshot(
                Request::post("/console/memberships/65f1a2b3c4d5/nfc")
                    .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let message = json_body(response).await["message"].as_str().unwrap().to_string();
        assert!(message.contains("Web NFC not supported on this device or browser"));
    }

    #[tokio::test]
    async fn it_should_export_order_json() {
        let response = app(make_test_state(&InMemoryBackend::seeded()))
            .oneshot(get_as("/console/orders/o2/export", VALID_TOKEN))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"order-ORD-002.json\""
        );
        assert_eq!(json_body(response).await["orderId"], "ORD-002");
    }

    #[tokio::test]
    async fn it_should_return_503_when_backend_is_offline() {
        let backend = InMemoryBackend::seeded();
        let router = app(make_test_state(&backend));
        router.clone().oneshot(get_as("/console/shell", VALID_TOKEN)).await.unwrap();

        backend.toggle_offline();
        let response = router.oneshot(get_as("/console/orders", VALID_TOKEN)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["message"], "No response received from server");
    }

    #[tokio::test]
    async fn it_should_serve_openapi_document() {
        let response = app(make_test_state(&InMemoryBackend::seeded()))
            .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert!(json["paths"]["/console/events"].is_object());
        assert!(json["components"]["securitySchemes"]["api_jwt"].is_object());
    }
}
