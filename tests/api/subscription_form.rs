use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

#[tokio::test]
async fn the_empty_form_is_served() {
    let app = spawn_app().await;

    let response = app.get_subscription_form().await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("Subscribe to our Newsletter"));
    assert!(html.contains(r#"autocomplete="given-name""#));
    assert!(html.contains(r#"autocomplete="family-name""#));
    assert!(html.contains(r#"autocomplete="email""#));
}

#[tokio::test]
async fn a_valid_submission_is_forwarded_and_acknowledged() {
    let app = spawn_app().await;
    Mock::given(path("/api/newsletter/subscribe"))
        .and(method("POST"))
        .and(body_json(json!({
            "firstName": "Ana",
            "lastName": "Lima",
            "email": "ana@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "firstName": "Ana",
            "lastName": "Lima",
            "email": "ana@example.com"
        })))
        .expect(1)
        .mount(&app.subscription_server)
        .await;

    let body = [
        ("first_name", "Ana"),
        ("last_name", "Lima"),
        ("email", "ana@example.com"),
    ];
    let response = app.post_subscription_form(&body).await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<div class="success">Subscribed successfully! Thank you, Ana</div>"#));
    assert!(!html.contains(r#"value="Ana""#));
}

#[tokio::test]
async fn invalid_submissions_never_reach_the_service() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.subscription_server)
        .await;

    let test_cases = vec![
        ("last_name=Lima&email=ana%40example.com", "First name is required"),
        ("first_name=%20&last_name=Lima&email=ana%40example.com", "First name is required"),
        ("first_name=Ana&email=ana%40example.com", "Last name is required"),
        ("first_name=Ana&last_name=Lima&email=ana.example.com", "Valid email is required"),
        ("first_name=Ana&last_name=Lima", "Valid email is required"),
        ("", "First name is required"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = app.post_raw_subscription_form(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The form did not fail with 400 Bad Request when the payload was {invalid_body:?}."
        );
        let html = response.text().await.unwrap();
        assert!(
            html.contains(&format!(r#"<div class="error">{error_message}</div>"#)),
            "Missing {error_message:?} for payload {invalid_body:?}."
        );
    }
}

#[tokio::test]
async fn a_service_rejection_is_shown_with_the_fields_kept() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Email already subscribed"})),
        )
        .expect(1)
        .mount(&app.subscription_server)
        .await;

    let body = [
        ("first_name", "Ana"),
        ("last_name", "Lima"),
        ("email", "ana@example.com"),
    ];
    let response = app.post_subscription_form(&body).await;

    assert_eq!(response.status().as_u16(), 400);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<div class="error">Email already subscribed</div>"#));
    assert!(html.contains(r#"value="Ana""#));
    assert!(html.contains(r#"value="Lima""#));
}

#[tokio::test]
async fn a_service_answering_without_json_is_a_bad_gateway() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&app.subscription_server)
        .await;

    let body = [
        ("first_name", "Ana"),
        ("last_name", "Lima"),
        ("email", "ana@example.com"),
    ];
    let response = app.post_subscription_form(&body).await;

    assert_eq!(response.status().as_u16(), 502);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<div class="error">"#));
    assert!(!html.contains(r#"<div class="success">"#));
}
