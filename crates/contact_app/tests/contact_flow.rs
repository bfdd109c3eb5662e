use std::sync::Once;
use std::time::Duration;

use contact_app::platform::config::AppConfig;
use contact_app::platform::controller::ContactFormController;
use contact_core::{
    Field, FormData, SubmissionState, ACKNOWLEDGMENT, STATUS_REJECTED_FALLBACK, STATUS_SENDING,
    STATUS_SUCCESS, STATUS_TRANSPORT_FAILURE,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SETTLE: Option<Duration> = Some(Duration::from_secs(10));

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(contact_logging::initialize_for_tests);
}

/// Mock server on its own runtime so the controller can block on the test thread.
fn start_server(response: ResponseTemplate) -> (Runtime, MockServer) {
    let runtime = Runtime::new().expect("tokio runtime");
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-email"))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    });
    (runtime, server)
}

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        endpoint: format!("{}/send-email", server.uri()),
        ..AppConfig::default()
    }
}

fn fill(controller: &mut ContactFormController, form: &FormData) {
    for field in Field::ALL {
        controller.edit_field(field, form.get(field));
    }
}

fn alice() -> FormData {
    FormData::new("Alice", "a@x.com", "Hi")
}

#[test]
fn accepted_submission_resets_form_and_reports_success() {
    init_logging();
    let (_runtime, server) = start_server(ResponseTemplate::new(200).set_body_json(json!({})));
    let mut controller = ContactFormController::new(&config_for(&server)).unwrap();

    fill(&mut controller, &alice());
    assert!(controller.submit());
    assert_eq!(controller.view().status, STATUS_SENDING);

    let view = controller.wait_until_settled(SETTLE);

    assert!(view.sent);
    assert_eq!(view.status, STATUS_SUCCESS);
    assert_eq!(view.acknowledgment, Some(ACKNOWLEDGMENT));
    assert_eq!(view.form, FormData::default());
}

#[test]
fn request_body_matches_form_snapshot() {
    init_logging();
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-email"))
            .and(body_json(json!({
                "name": "Alice",
                "email": "a@x.com",
                "message": "Hi",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        server
    });
    let mut controller = ContactFormController::new(&config_for(&server)).unwrap();

    fill(&mut controller, &alice());
    controller.submit();
    // Edits after submit must not leak into the request already sent.
    controller.edit_field(Field::Message, "edited while sending");
    let view = controller.wait_until_settled(SETTLE);

    assert!(view.sent);
    runtime.block_on(server.verify());
}

#[test]
fn rejection_shows_server_message_and_keeps_form() {
    init_logging();
    let (_runtime, server) = start_server(
        ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid email" })),
    );
    let mut controller = ContactFormController::new(&config_for(&server)).unwrap();

    fill(&mut controller, &alice());
    controller.submit();
    let view = controller.wait_until_settled(SETTLE);

    assert!(!view.sent);
    assert_eq!(view.status, "Invalid email");
    assert_eq!(view.form, alice());
}

#[test]
fn server_error_without_message_uses_fallback() {
    init_logging();
    let (_runtime, server) = start_server(ResponseTemplate::new(500).set_body_json(json!({})));
    let mut controller = ContactFormController::new(&config_for(&server)).unwrap();

    fill(&mut controller, &alice());
    controller.submit();
    let view = controller.wait_until_settled(SETTLE);

    assert!(!view.sent);
    assert_eq!(view.status, STATUS_REJECTED_FALLBACK);
    assert_eq!(view.form, alice());
}

#[test]
fn server_error_with_garbage_body_reports_retry_message() {
    init_logging();
    let (_runtime, server) =
        start_server(ResponseTemplate::new(500).set_body_string("Internal Server Error"));
    let mut controller = ContactFormController::new(&config_for(&server)).unwrap();

    fill(&mut controller, &alice());
    controller.submit();
    let view = controller.wait_until_settled(SETTLE);

    assert!(!view.sent);
    assert_eq!(view.status, STATUS_TRANSPORT_FAILURE);
    assert_eq!(view.form, alice());
}

#[test]
fn success_status_with_html_body_is_not_a_success() {
    init_logging();
    let (_runtime, server) =
        start_server(ResponseTemplate::new(200).set_body_string("<html>captive portal</html>"));
    let mut controller = ContactFormController::new(&config_for(&server)).unwrap();

    fill(&mut controller, &alice());
    controller.submit();
    let view = controller.wait_until_settled(SETTLE);

    assert!(!view.sent);
    assert_eq!(view.acknowledgment, None);
    assert_eq!(view.status, STATUS_TRANSPORT_FAILURE);
    assert_eq!(view.form, alice());
}

#[test]
fn hanging_endpoint_times_out_with_retry_message() {
    init_logging();
    let (_runtime, server) = start_server(
        ResponseTemplate::new(200)
            .set_delay(Duration::from_secs(5))
            .set_body_json(json!({})),
    );
    let config = AppConfig {
        request_timeout_ms: 100,
        ..config_for(&server)
    };
    let mut controller = ContactFormController::new(&config).unwrap();

    fill(&mut controller, &alice());
    controller.submit();
    assert_eq!(controller.view().status, STATUS_SENDING);

    let view = controller.wait_until_settled(SETTLE);

    assert!(!view.sent);
    assert!(!view.submitting);
    assert_eq!(view.status, STATUS_TRANSPORT_FAILURE);
    assert_eq!(view.form, alice());
}

#[test]
fn unreachable_endpoint_reports_retry_message() {
    init_logging();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = AppConfig {
        endpoint: format!("http://127.0.0.1:{port}/send-email"),
        ..AppConfig::default()
    };
    let mut controller = ContactFormController::new(&config).unwrap();

    fill(&mut controller, &alice());
    controller.submit();
    let view = controller.wait_until_settled(SETTLE);

    assert!(!view.sent);
    assert_eq!(view.status, STATUS_TRANSPORT_FAILURE);
}

#[test]
fn consecutive_successes_each_reset_the_form() {
    init_logging();
    let (_runtime, server) = start_server(ResponseTemplate::new(200).set_body_json(json!({})));
    let mut controller = ContactFormController::new(&config_for(&server)).unwrap();

    for round in 0..2 {
        fill(
            &mut controller,
            &FormData::new(format!("Alice {round}"), "a@x.com", "Hi"),
        );
        controller.submit();
        let view = controller.wait_until_settled(SETTLE);

        assert!(view.sent, "round {round}");
        assert_eq!(view.status, STATUS_SUCCESS);
        assert_eq!(view.form, FormData::default());
    }
}

#[test]
fn double_submit_sends_a_single_request() {
    init_logging();
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-email"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(200))
                    .set_body_json(json!({})),
            )
            .expect(1)
            .mount(&server)
            .await;
        server
    });
    let mut controller = ContactFormController::new(&config_for(&server)).unwrap();

    fill(&mut controller, &alice());
    assert!(controller.submit());
    assert!(!controller.submit());
    let view = controller.wait_until_settled(SETTLE);

    assert!(view.sent);
    runtime.block_on(server.verify());
}

#[test]
fn close_abandons_in_flight_submission() {
    init_logging();
    let (_runtime, server) = start_server(
        ResponseTemplate::new(200)
            .set_delay(Duration::from_secs(5))
            .set_body_json(json!({})),
    );
    let mut controller = ContactFormController::new(&config_for(&server)).unwrap();

    fill(&mut controller, &alice());
    controller.submit();
    assert!(controller.close());

    assert!(!controller.is_submitting());
    assert_eq!(controller.submission(), &SubmissionState::Idle);

    // The cancelled completion arrives but changes nothing.
    assert_eq!(controller.pump(Duration::from_millis(500)), None);
    assert_eq!(controller.view().form, alice());
    assert!(!controller.view().sent);
}

#[test]
fn acknowledgment_expires_when_configured() {
    init_logging();
    let (_runtime, server) = start_server(ResponseTemplate::new(200).set_body_json(json!({})));
    let config = AppConfig {
        acknowledgment_ms: Some(50),
        ..config_for(&server)
    };
    let mut controller = ContactFormController::new(&config).unwrap();

    fill(&mut controller, &alice());
    controller.submit();
    assert!(controller.wait_until_settled(SETTLE).sent);

    let view = controller
        .pump(Duration::from_secs(5))
        .expect("acknowledgment expiry");

    assert!(!view.sent);
    assert_eq!(view.acknowledgment, None);
    assert_eq!(view.status, STATUS_SUCCESS);
}
