use coachdesk::api::fake::ScriptedTransport;
use coachdesk::api::ApiClient;
use coachdesk::appointments::AppointmentStatus;
use coachdesk::schedule::{Column, PageContent, RecordingNotifier, SchedulePage, ToastKind};
use coachdesk::session::{SessionContext, User};
use coachdesk::store::MemoryStorage;
use coachdesk::Error;
use serde_json::json;
use std::sync::Arc;

const BASE: &str = "http://api.test:8080";

fn trainer() -> User {
    User {
        id: "t1".to_string(),
        username: "coach".to_string(),
        full_name: "Casey Coach".to_string(),
        email: "casey@example.com".to_string(),
        role: "trainer".to_string(),
        phone_number: None,
    }
}

fn trainer_appointments() -> String {
    json!([
        {
            "id": "a1", "client_id": "c1", "trainer_id": "t1",
            "client_name": "Anna Smith", "trainer_name": "Casey Coach",
            "type_": "training", "appointment_date": "2025-03-17",
            "start_time": "09:00", "duration_minutes": 60,
            "status": "scheduled", "location": "Gym A",
            "created_at": "2025-03-01", "updated_at": "2025-03-01"
        },
        {
            "id": "a2", "client_id": "c2", "trainer_id": "t1",
            "client_name": "John Miller", "trainer_name": "Casey Coach",
            "type_": "check-in", "appointment_date": "2025-03-17",
            "start_time": "11:00", "duration_minutes": 30,
            "status": "scheduled", "location": "Online",
            "created_at": "2025-03-01", "updated_at": "2025-03-01"
        }
    ])
    .to_string()
}

async fn trainer_client(transport: Arc<ScriptedTransport>) -> ApiClient {
    let session = SessionContext::new(Arc::new(MemoryStorage::new()));
    session.establish(Some("secret"), Some(&trainer())).await.unwrap();
    ApiClient::new(BASE, transport, session)
}

#[tokio::test]
async fn test_trainer_end_to_end() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(200, trainer_appointments());
    let client = trainer_client(transport.clone()).await;
    let notifier = RecordingNotifier::new();

    let mut page = SchedulePage::mount(&client, &notifier).await.unwrap();
    assert_eq!(
        transport.requests()[0].url,
        format!("{}/api/appointments/trainer/t1", BASE)
    );

    let table = page.table("%Y-%m-%d").unwrap();
    assert_eq!(table.rows.len(), 2);
    assert!(!table.columns.contains(&Column::Trainer));
    assert!(table.columns.contains(&Column::Client));

    page.view.set_status_checked(AppointmentStatus::Scheduled, false);
    let table = page.table("%Y-%m-%d").unwrap();
    assert!(table.rows.is_empty());
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn test_filter_text_narrows_rows() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(200, trainer_appointments());
    let client = trainer_client(transport).await;
    let notifier = RecordingNotifier::new();

    let mut page = SchedulePage::mount(&client, &notifier).await.unwrap();
    page.view.set_filter_text("anna");

    let rows = page.visible_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].client_name, "Anna Smith");
    assert_eq!(rows[0].duration, "60 min");
}

#[tokio::test]
async fn test_mount_without_session_fails() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = ApiClient::new(BASE, transport.clone(), SessionContext::new(Arc::new(MemoryStorage::new())));
    let notifier = RecordingNotifier::new();

    let result = SchedulePage::mount(&client, &notifier).await;
    assert!(matches!(result, Err(Error::UnauthenticatedAccess)));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_failed_fetch_shows_inline_error_and_toast() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(500, "");
    let client = trainer_client(transport).await;
    let notifier = RecordingNotifier::new();

    let page = SchedulePage::mount(&client, &notifier).await.unwrap();
    assert!(matches!(page.content(), PageContent::Failed(_)));
    assert!(page.table("%Y").is_none());
    assert!(page.visible_rows().is_empty());

    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].0, ToastKind::Error);
}

#[tokio::test]
async fn test_status_change_reloads_and_resets_filters() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .respond(200, trainer_appointments())
        .respond(200, r#"{"id":"a1","status":"completed"}"#)
        .respond(200, trainer_appointments());
    let client = trainer_client(transport.clone()).await;
    let notifier = RecordingNotifier::new();

    let mut page = SchedulePage::mount(&client, &notifier).await.unwrap();
    page.view.set_filter_text("nobody");
    assert!(page.visible_rows().is_empty());

    page.set_status("a1", AppointmentStatus::Completed).await.unwrap();

    // Filters are back to defaults after the reload
    assert_eq!(page.view.filter_text, "");
    assert_eq!(page.visible_rows().len(), 2);

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].url, format!("{}/api/appointments/a1", BASE));
    assert_eq!(requests[1].body, Some(json!({ "status": "completed" })));
    assert_eq!(requests[2].url, requests[0].url);

    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].0, ToastKind::Success);
}

#[tokio::test]
async fn test_failed_status_change_keeps_rows() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .respond(200, trainer_appointments())
        .respond(404, "");
    let client = trainer_client(transport.clone()).await;
    let notifier = RecordingNotifier::new();

    let mut page = SchedulePage::mount(&client, &notifier).await.unwrap();
    page.view.set_filter_text("anna");

    let result = page.set_status("missing", AppointmentStatus::Cancelled).await;
    assert!(matches!(result, Err(Error::NetworkFailure { status: Some(404), .. })));

    // No reload: local state is untouched
    assert_eq!(transport.requests().len(), 2);
    assert_eq!(page.view.filter_text, "anna");
    assert_eq!(page.appointments().len(), 2);
    assert_eq!(page.appointments()[0].status, AppointmentStatus::Scheduled);

    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].0, ToastKind::Error);
}

#[tokio::test]
async fn test_status_change_after_unauthorized_mount_sends_nothing() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .respond(401, "")
        .respond(200, r#"{"id":"a1","status":"completed"}"#)
        .respond(200, "[]");
    let client = trainer_client(transport.clone()).await;
    let notifier = RecordingNotifier::new();

    let mut page = SchedulePage::mount(&client, &notifier).await.unwrap();
    assert!(page.error().is_some());

    let result = page.set_status("a1", AppointmentStatus::Completed).await;
    assert!(matches!(result, Err(Error::AuthExpired)));

    // Only the failed fetch went out; no unauthenticated PUT follows it
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].token.as_deref(), Some("secret"));
}

#[tokio::test]
async fn test_status_change_on_failed_page_keeps_error() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(500, "");
    let client = trainer_client(transport.clone()).await;
    let notifier = RecordingNotifier::new();

    let mut page = SchedulePage::mount(&client, &notifier).await.unwrap();
    let result = page.set_status("a1", AppointmentStatus::Cancelled).await;

    assert!(matches!(result, Err(Error::ScheduleUnavailable { .. })));
    assert_eq!(transport.requests().len(), 1);
    assert!(matches!(page.content(), PageContent::Failed(_)));
}

#[tokio::test]
async fn test_admin_sees_both_name_columns() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(200, trainer_appointments());
    let session = SessionContext::new(Arc::new(MemoryStorage::new()));
    let mut admin = trainer();
    admin.role = "admin".to_string();
    session.establish(Some("secret"), Some(&admin)).await.unwrap();
    let client = ApiClient::new(BASE, transport.clone(), session);
    let notifier = RecordingNotifier::new();

    let page = SchedulePage::mount(&client, &notifier).await.unwrap();
    assert_eq!(transport.requests()[0].url, format!("{}/api/appointments", BASE));
    let table = page.table("%Y").unwrap();
    assert!(table.columns.contains(&Column::Client));
    assert!(table.columns.contains(&Column::Trainer));
}
