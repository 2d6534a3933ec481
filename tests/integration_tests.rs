use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower::ServiceExt;

use repairdesk::config::AppConfig;
use repairdesk::db;
use repairdesk::handlers;
use repairdesk::services::messaging::MessageChannel;
use repairdesk::services::notification::{Notifier, NotifierConfig};
use repairdesk::state::AppState;

// ── Mock Channels ──

struct MockChannel {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl MessageChannel for MockChannel {
    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

struct FailingChannel;

#[async_trait]
impl MessageChannel for FailingChannel {
    async fn send(&self, _to: &str, _body: &str) -> anyhow::Result<()> {
        anyhow::bail!("channel down")
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        app_name: "RepairDesk".to_string(),
        admin_whatsapp_number: "9876543210".to_string(),
        admin_email: "ops@example.com".to_string(),
        upload_dir: std::env::temp_dir()
            .join(format!("repairdesk-test-{}", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .to_string(),
        whatsapp_access_token: String::new(),
        whatsapp_phone_number_id: String::new(),
    }
}

fn state_with_channel(channel: Box<dyn MessageChannel>) -> Arc<AppState> {
    let config = test_config();
    let conn = db::init_db(":memory:").unwrap();
    let notifier = Notifier::new(
        NotifierConfig {
            admin_whatsapp_number: config.admin_whatsapp_number.clone(),
            admin_email: config.admin_email.clone(),
            app_name: config.app_name.clone(),
        },
        channel,
    );
    Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config,
        notifier,
    })
}

fn test_state() -> (Arc<AppState>, Arc<Mutex<Vec<(String, String)>>>) {
    let sent = Arc::new(Mutex::new(vec![]));
    let state = state_with_channel(Box::new(MockChannel {
        sent: Arc::clone(&sent),
    }));
    (state, sent)
}

fn test_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/api/bookings/phone/:phone_number",
            get(handlers::bookings::get_bookings_by_phone),
        )
        .route("/api/reviews", post(handlers::reviews::create_review))
        .route(
            "/api/reviews/approved",
            get(handlers::reviews::get_approved_reviews),
        )
        .route(
            "/api/reviews/rating",
            get(handlers::reviews::get_average_rating),
        )
        .route("/api/gallery", get(handlers::gallery::get_active_images))
        .route(
            "/api/gallery/upload",
            post(handlers::gallery::upload_image),
        )
        .route(
            "/api/gallery/service/:service_type",
            get(handlers::gallery::get_images_by_service),
        )
        .route("/api/services", get(handlers::catalog::get_service_types))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/admin/bookings", get(handlers::admin::get_bookings))
        .route(
            "/api/admin/bookings/:id",
            get(handlers::admin::get_booking)
                .put(handlers::admin::update_booking)
                .delete(handlers::admin::delete_booking),
        )
        .route(
            "/api/admin/bookings/status/:status",
            get(handlers::admin::get_bookings_by_status),
        )
        .route("/api/admin/reviews", get(handlers::admin::get_reviews))
        .route(
            "/api/admin/reviews/pending",
            get(handlers::admin::get_pending_reviews),
        )
        .route(
            "/api/admin/reviews/:id/approve",
            put(handlers::admin::approve_review),
        )
        .route(
            "/api/admin/reviews/:id/reject",
            put(handlers::admin::reject_review),
        )
        .route(
            "/api/admin/reviews/:id",
            delete(handlers::admin::delete_review),
        )
        .route(
            "/api/admin/gallery/upload",
            post(handlers::admin::upload_gallery_image),
        )
        .route(
            "/api/admin/gallery",
            get(handlers::admin::get_gallery_images),
        )
        .route(
            "/api/admin/gallery/:id",
            put(handlers::admin::update_gallery_image)
                .delete(handlers::admin::delete_gallery_image),
        )
        .route(
            "/api/admin/dashboard/stats",
            get(handlers::admin::dashboard_stats),
        )
        .with_state(state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn response_json(res: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn booking_body(name: &str, phone: &str) -> serde_json::Value {
    serde_json::json!({
        "customerName": name,
        "phoneNumber": phone,
        "repairType": "AC",
        "address": "12 Main St",
        "problemDescription": "not cooling",
    })
}

async fn create_booking(state: &Arc<AppState>, name: &str, phone: &str) -> i64 {
    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request("POST", "/api/bookings", booking_body(name, phone)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["success"], true);
    json["bookingId"].as_i64().unwrap()
}

// ── Booking Submission ──

#[tokio::test]
async fn test_submit_booking_creates_pending_and_alerts_operator() {
    let (state, sent) = test_state();
    let id = create_booking(&state, "Asha", "9876500000").await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request(&format!("/api/bookings/{id}")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["status"], "PENDING");
    assert_eq!(json["customerName"], "Asha");
    assert!(json["createdAt"].is_string());
    assert!(json["confirmedAt"].is_null());

    // Exactly one operator alert, to the normalized admin number.
    let messages = sent.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, "919876543210");
    assert!(messages[0].1.contains("New Booking Request"));
    assert!(messages[0].1.contains("Asha"));
    assert!(messages[0].1.contains("not cooling"));
}

#[tokio::test]
async fn test_submit_booking_missing_required_field_rejected() {
    let (state, sent) = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            serde_json::json!({ "customerName": "Asha", "repairType": "AC" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = response_json(res).await;
    assert_eq!(json["success"], false);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Error creating booking"));

    // Nothing was persisted, so nothing was announced.
    assert_eq!(sent.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_booking_not_found() {
    let (state, _) = test_state();
    let app = test_app(state);

    let res = app.oneshot(get_request("/api/bookings/42")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bookings_by_phone_exact_match() {
    let (state, _) = test_state();
    create_booking(&state, "Asha", "9876500000").await;
    create_booking(&state, "Ravi", "9876511111").await;
    create_booking(&state, "Asha", "9876500000").await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request("/api/bookings/phone/9876500000"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    // No normalization on lookup: the stored string must match exactly.
    let app = test_app(state);
    let res = app
        .oneshot(get_request("/api/bookings/phone/919876500000"))
        .await
        .unwrap();
    let json = response_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

// ── Admin Updates ──

#[tokio::test]
async fn test_admin_update_confirms_and_notifies_customer() {
    let (state, sent) = test_state();
    let id = create_booking(&state, "Asha", "9876500000").await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/bookings/{id}"),
            serde_json::json!({
                "status": "CONFIRMED",
                "serviceDate": "2025-06-15T00:00:00",
                "serviceTime": "10:00 AM",
                "notes": "call before arriving",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Booking updated and customer notified");
    assert_eq!(json["booking"]["status"], "CONFIRMED");
    assert!(json["booking"]["confirmedAt"].is_string());
    assert_eq!(json["booking"]["notes"], "call before arriving");

    // One operator alert from creation plus one customer update.
    let messages = sent.lock().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].0, "919876500000");
    assert!(messages[1].1.contains("Hello Asha"));
    assert!(messages[1].1.contains("CONFIRMED"));
    assert!(messages[1].1.contains("15-06-2025"));
    assert!(messages[1].1.contains("10:00 AM"));
}

#[tokio::test]
async fn test_admin_update_refreshes_confirmed_at_every_time() {
    let (state, _) = test_state();
    let id = create_booking(&state, "Asha", "9876500000").await;

    let update = serde_json::json!({ "status": "CONFIRMED", "serviceTime": "10:00 AM" });

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/bookings/{id}"),
            update.clone(),
        ))
        .await
        .unwrap();
    let first = response_json(res).await["booking"]["confirmedAt"]
        .as_str()
        .unwrap()
        .to_string();

    // Timestamps have second resolution; step past the boundary.
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let app = test_app(state);
    let res = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/bookings/{id}"),
            update,
        ))
        .await
        .unwrap();
    let second = response_json(res).await["booking"]["confirmedAt"]
        .as_str()
        .unwrap()
        .to_string();

    assert_ne!(first, second, "confirmedAt must be restamped on every update");
}

#[tokio::test]
async fn test_admin_update_overwrites_omitted_fields_with_null() {
    let (state, _) = test_state();
    let id = create_booking(&state, "Asha", "9876500000").await;

    let app = test_app(state.clone());
    app.oneshot(json_request(
        "PUT",
        &format!("/api/admin/bookings/{id}"),
        serde_json::json!({ "status": "CONFIRMED", "notes": "first visit" }),
    ))
    .await
    .unwrap();

    // A second update without notes wipes them: no merge semantics.
    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/bookings/{id}"),
            serde_json::json!({ "status": "COMPLETED" }),
        ))
        .await
        .unwrap();
    let json = response_json(res).await;
    assert_eq!(json["booking"]["status"], "COMPLETED");
    assert!(json["booking"]["notes"].is_null());
}

#[tokio::test]
async fn test_admin_update_allows_status_regression() {
    let (state, _) = test_state();
    let id = create_booking(&state, "Asha", "9876500000").await;

    for status in ["COMPLETED", "PENDING", "CANCELLED", "CONFIRMED"] {
        let app = test_app(state.clone());
        let res = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/admin/bookings/{id}"),
                serde_json::json!({ "status": status }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "transition to {status} refused");
        let json = response_json(res).await;
        assert_eq!(json["booking"]["status"], status);
    }
}

#[tokio::test]
async fn test_admin_update_missing_booking() {
    let (state, sent) = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(json_request(
            "PUT",
            "/api/admin/bookings/999",
            serde_json::json!({ "status": "CONFIRMED" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = response_json(res).await;
    assert_eq!(json["success"], false);

    // No booking, no customer notification.
    assert_eq!(sent.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_booking_then_fetch() {
    let (state, _) = test_state();
    let id = create_booking(&state, "Asha", "9876500000").await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/bookings/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["success"], true);

    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request(&format!("/api/bookings/{id}")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Deleting an id that never existed is still a success.
    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/admin/bookings/12345")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_status_listing_and_dashboard_counts() {
    let (state, _) = test_state();
    let first = create_booking(&state, "Asha", "9876500000").await;
    create_booking(&state, "Ravi", "9876511111").await;
    create_booking(&state, "Meena", "9876522222").await;

    let app = test_app(state.clone());
    app.oneshot(json_request(
        "PUT",
        &format!("/api/admin/bookings/{first}"),
        serde_json::json!({ "status": "CONFIRMED" }),
    ))
    .await
    .unwrap();

    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request("/api/admin/bookings/status/PENDING"))
        .await
        .unwrap();
    let json = response_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    // Exact-match semantics: an unknown status is just an empty list.
    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request("/api/admin/bookings/status/pending"))
        .await
        .unwrap();
    let json = response_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 0);

    let app = test_app(state);
    let res = app
        .oneshot(get_request("/api/admin/dashboard/stats"))
        .await
        .unwrap();
    let json = response_json(res).await;
    assert_eq!(json["totalBookings"], 3);
    assert_eq!(json["pendingBookings"], 2);
    assert_eq!(json["completedBookings"], 0);
}

// ── Notification Failure ──

#[tokio::test]
async fn test_channel_failure_never_fails_the_booking() {
    let state = state_with_channel(Box::new(FailingChannel));

    let id = create_booking(&state, "Asha", "9876500000").await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/bookings/{id}"),
            serde_json::json!({ "status": "CONFIRMED" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The write went through even though every send errored.
    let app = test_app(state);
    let res = app
        .oneshot(get_request(&format!("/api/bookings/{id}")))
        .await
        .unwrap();
    let json = response_json(res).await;
    assert_eq!(json["status"], "CONFIRMED");
}

// ── Reviews ──

async fn create_review(state: &Arc<AppState>, name: &str, rating: i32) -> i64 {
    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/reviews",
            serde_json::json!({
                "customerName": name,
                "customerEmail": "c@example.com",
                "customerPhone": "9876500000",
                "reviewText": "great service",
                "rating": rating,
                "serviceType": "AC",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    response_json(res).await["reviewId"].as_i64().unwrap()
}

#[tokio::test]
async fn test_review_requires_approval() {
    let (state, _) = test_state();
    let id = create_review(&state, "Asha", 5).await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request("/api/reviews/approved"))
        .await
        .unwrap();
    let json = response_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 0);

    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request("/api/admin/reviews/pending"))
        .await
        .unwrap();
    let json = response_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], id);
    assert_eq!(json[0]["isApproved"], false);
}

#[tokio::test]
async fn test_review_approve_and_reject() {
    let (state, _) = test_state();
    let id = create_review(&state, "Asha", 5).await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/admin/reviews/{id}/approve"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["review"]["isApproved"], true);
    assert!(json["review"]["approvedAt"].is_string());

    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request("/api/reviews/approved"))
        .await
        .unwrap();
    assert_eq!(response_json(res).await.as_array().unwrap().len(), 1);

    // Rejection pulls it back out of the public listing.
    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/admin/reviews/{id}/reject"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(get_request("/api/reviews/approved"))
        .await
        .unwrap();
    assert_eq!(response_json(res).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_average_rating_excludes_pending_reviews() {
    let (state, _) = test_state();
    let a = create_review(&state, "Asha", 4).await;
    let b = create_review(&state, "Ravi", 5).await;
    create_review(&state, "Troll", 1).await;

    for id in [a, b] {
        let app = test_app(state.clone());
        app.oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/admin/reviews/{id}/approve"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    }

    let app = test_app(state.clone());
    let res = app.oneshot(get_request("/api/reviews/rating")).await.unwrap();
    let json = response_json(res).await;
    assert_eq!(json["averageRating"], 4.5);

    let app = test_app(state);
    let res = app
        .oneshot(get_request("/api/admin/dashboard/stats"))
        .await
        .unwrap();
    let json = response_json(res).await;
    assert_eq!(json["pendingReviews"], 1);
    assert_eq!(json["averageRating"], 4.5);
}

#[tokio::test]
async fn test_review_delete() {
    let (state, _) = test_state();
    let id = create_review(&state, "Asha", 3).await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/reviews/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(get_request("/api/admin/reviews/pending"))
        .await
        .unwrap();
    assert_eq!(response_json(res).await.as_array().unwrap().len(), 0);
}

// ── Auth ──

#[tokio::test]
async fn test_register_and_login() {
    let (state, _) = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            serde_json::json!({
                "email": "admin@example.com",
                "password": "hunter2hunter2",
                "role": "CLIENT_ADMIN",
                "fullName": "Site Admin",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["email"], "admin@example.com");
    // The hash must never leak into responses.
    assert!(json["user"].get("passwordHash").is_none());
    assert!(json["user"].get("password").is_none());

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "email": "admin@example.com", "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["message"], "Login successful");
    assert!(json["user"]["lastLogin"].is_string());

    let app = test_app(state);
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "email": "admin@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = response_json(res).await;
    assert_eq!(json["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (state, _) = test_state();

    let body = serde_json::json!({
        "email": "admin@example.com",
        "password": "hunter2hunter2",
        "role": "DEVELOPER_ADMIN",
        "fullName": "Site Admin",
    });

    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request("POST", "/api/auth/register", body.clone()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(json_request("POST", "/api/auth/register", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = response_json(res).await;
    assert_eq!(json["message"], "Email already registered");
}

// ── Gallery ──

#[tokio::test]
async fn test_gallery_upload_and_listing() {
    let (state, _) = test_state();

    let boundary = "repairdesk-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"serviceType\"\r\n\r\n\
         AC\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"imageType\"\r\n\r\n\
         before\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"description\"\r\n\r\n\
         compressor swap\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"unit.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         fake-jpeg-bytes\r\n\
         --{boundary}--\r\n"
    );

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/gallery/upload")
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["success"], true);
    let image_url = json["image"]["imageUrl"].as_str().unwrap();
    assert!(image_url.starts_with("/uploads/gallery/"));
    assert!(image_url.ends_with("_unit.jpg"));
    assert_eq!(json["image"]["serviceType"], "AC");
    assert_eq!(json["image"]["isActive"], true);

    // The file landed in the configured upload directory.
    let stored_name = image_url.rsplit('/').next().unwrap();
    let on_disk = std::path::Path::new(&state.config.upload_dir).join(stored_name);
    assert_eq!(std::fs::read(on_disk).unwrap(), b"fake-jpeg-bytes");

    let app = test_app(state.clone());
    let res = app.oneshot(get_request("/api/gallery")).await.unwrap();
    assert_eq!(response_json(res).await.as_array().unwrap().len(), 1);

    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request("/api/gallery/service/AC"))
        .await
        .unwrap();
    assert_eq!(response_json(res).await.as_array().unwrap().len(), 1);

    let app = test_app(state);
    let res = app
        .oneshot(get_request("/api/gallery/service/Refrigerator"))
        .await
        .unwrap();
    assert_eq!(response_json(res).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_public_gallery_upload_returns_bare_image() {
    let (state, _) = test_state();

    let boundary = "repairdesk-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"serviceType\"\r\n\r\n\
         Refrigerator\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"door.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         fake-jpeg-bytes\r\n\
         --{boundary}--\r\n"
    );

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/gallery/upload")
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The public route answers with the record itself, no envelope.
    let json = response_json(res).await;
    assert!(json.get("success").is_none());
    assert!(json["imageUrl"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/gallery/"));
    assert_eq!(json["serviceType"], "Refrigerator");

    let app = test_app(state);
    let res = app
        .oneshot(get_request("/api/gallery/service/Refrigerator"))
        .await
        .unwrap();
    assert_eq!(response_json(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_gallery_upload_requires_service_type() {
    let (state, _) = test_state();

    let boundary = "repairdesk-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"unit.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         fake-jpeg-bytes\r\n\
         --{boundary}--\r\n"
    );

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/gallery/upload")
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gallery_logical_and_hard_delete() {
    let (state, _) = test_state();

    let id = {
        let db = state.db.lock().unwrap();
        repairdesk::db::queries::insert_gallery_image(
            &db,
            "/uploads/gallery/x_unit.jpg",
            "AC",
            Some("after"),
            None,
            &chrono::Utc::now().naive_utc(),
        )
        .unwrap()
    };

    // Deactivate: hidden from the public listing, still visible to admins.
    let app = test_app(state.clone());
    let res = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/gallery/{id}"),
            serde_json::json!({ "imageType": "after", "isActive": false }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["image"]["isActive"], false);

    let app = test_app(state.clone());
    let res = app.oneshot(get_request("/api/gallery")).await.unwrap();
    assert_eq!(response_json(res).await.as_array().unwrap().len(), 0);

    let app = test_app(state.clone());
    let res = app.oneshot(get_request("/api/admin/gallery")).await.unwrap();
    assert_eq!(response_json(res).await.as_array().unwrap().len(), 1);

    // Hard delete removes the record entirely.
    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/gallery/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app.oneshot(get_request("/api/admin/gallery")).await.unwrap();
    assert_eq!(response_json(res).await.as_array().unwrap().len(), 0);
}

// ── Service Catalog ──

#[tokio::test]
async fn test_service_types_listed_in_display_order() {
    let (state, _) = test_state();

    {
        let db = state.db.lock().unwrap();
        repairdesk::db::queries::insert_service_type(&db, "Washing Machine", None, None, 2)
            .unwrap();
        repairdesk::db::queries::insert_service_type(&db, "AC", Some("Split and window"), None, 1)
            .unwrap();
    }

    let app = test_app(state);
    let res = app.oneshot(get_request("/api/services")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    let types = json.as_array().unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0]["name"], "AC");
    assert_eq!(types[1]["name"], "Washing Machine");
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let (state, _) = test_state();
    let app = test_app(state);

    let res = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
