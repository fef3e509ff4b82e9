use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::{
    BookingFlowService, BOOKING_INCOMPLETE_MESSAGE, NO_AVAILABILITY_NOTICE, NO_PROVIDERS_NOTICE,
};
use shared_api::ApiClient;
use shared_config::AppConfig;

fn flow_for(server: &MockServer) -> BookingFlowService {
    let api = Arc::new(ApiClient::new(&AppConfig::with_api_url(server.uri())));
    BookingFlowService::new(api)
}

fn summary_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "city": "Seattle",
        "rating": 4.7,
        "distanceMinutes": 10
    })
}

fn detail_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "city": "Seattle",
        "description": "Family dentistry in the city center",
        "services": [
            { "id": "svc-clean", "name": "Cleaning", "durationMinutes": 45, "price": 120.0 },
            { "id": "svc-white", "name": "Whitening", "durationMinutes": 60, "price": 250.0 }
        ],
        "staff": [
            { "id": "staff-1", "name": "Dr. Nova", "title": "DDS", "specialties": ["Implants"] }
        ],
        "access": { "address": "11 Main St", "city": "Seattle", "parking": "Garage next door" }
    })
}

fn provider_json(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "title": "DDS" })
}

fn slot_json(start: &str) -> serde_json::Value {
    json!({ "start": start, "end": null, "timezone": "UTC" })
}

async fn mount_happy_path(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/dentistries"))
        .and(query_param("query", "Downtown"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([summary_json("1", "Downtown Dental")])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dentistries/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json("1", "Downtown Dental")))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dentistries/1/providers"))
        .and(query_param("serviceId", "svc-clean"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([provider_json("staff-1", "Dr. Nova")])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/providers/staff-1/availability"))
        .and(query_param("serviceId", "svc-clean"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([slot_json("2024-05-25T10:00:00Z")])),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn walks_the_chain_and_books_with_confirmation_number() {
    let mock_server = MockServer::start().await;
    mount_happy_path(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .and(body_partial_json(json!({
            "serviceId": "svc-clean",
            "providerId": "staff-1",
            "dentistryId": "1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "confirmationNumber": "CONF-123",
            "message": "Your appointment is booked."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let flow = flow_for(&mock_server);

    flow.search("Downtown").await;
    let state = flow.state();
    let results = state.search.data().expect("search should succeed");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "1");

    flow.select_dentistry("1").await;
    let state = flow.state();
    let detail = state.detail.data().expect("detail should load");
    assert_eq!(detail.services.len(), 2);

    flow.select_service("svc-clean").await;
    let state = flow.state();
    let providers = state.providers.data().expect("providers should load");
    assert_eq!(providers[0].id, "staff-1");

    flow.select_provider("staff-1").await;
    let state = flow.state();
    let slots = state.availability.data().expect("availability should load");
    assert_eq!(slots.len(), 1);
    flow.select_slot(slots[0].clone());

    flow.book("Alex Smith").await;
    let state = flow.state();
    let confirmation = state.booking.data().expect("booking should succeed");
    assert!(confirmation.confirmation_text().contains("CONF-123"));
    assert!(
        !state.selection.is_complete(),
        "selection is cleared after a successful booking"
    );
}

#[tokio::test]
async fn stale_provider_response_never_overwrites_newer_selection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dentistries/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json("1", "Downtown Dental")))
        .mount(&mock_server)
        .await;

    // The superseded request resolves late and out of order.
    Mock::given(method("GET"))
        .and(path("/dentistries/1/providers"))
        .and(query_param("serviceId", "svc-clean"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([provider_json("staff-slow", "Dr. Slow")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dentistries/1/providers"))
        .and(query_param("serviceId", "svc-white"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([provider_json("staff-2", "Dr. Fast")])),
        )
        .mount(&mock_server)
        .await;

    let flow = flow_for(&mock_server);
    flow.select_dentistry("1").await;

    let slow = tokio::spawn({
        let flow = flow.clone();
        async move { flow.select_service("svc-clean").await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    flow.select_service("svc-white").await;
    let providers = flow.state().providers.data().cloned().expect("fast response lands");
    assert_eq!(providers[0].id, "staff-2");

    slow.await.expect("superseded request task should finish");

    let state = flow.state();
    let providers = state.providers.data().expect("state still holds fast response");
    assert_eq!(
        providers[0].id, "staff-2",
        "stale resolution must be discarded, not applied last-write-wins"
    );
    assert_eq!(state.selection.service_id.as_deref(), Some("svc-white"));
}

#[tokio::test]
async fn dentistry_change_resets_downstream_before_new_detail_resolves() {
    let mock_server = MockServer::start().await;
    mount_happy_path(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/dentistries/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(detail_json("2", "West Side Smiles"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let flow = flow_for(&mock_server);
    flow.select_dentistry("1").await;
    flow.select_service("svc-clean").await;
    flow.select_provider("staff-1").await;
    let slots = flow.state().availability.data().cloned().expect("slots loaded");
    flow.select_slot(slots[0].clone());

    let reselect = tokio::spawn({
        let flow = flow.clone();
        async move { flow.select_dentistry("2").await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Downstream stages are idle while the replacement detail is in flight.
    let state = flow.state();
    assert!(state.detail.is_loading());
    assert!(state.providers.is_idle());
    assert!(state.availability.is_idle());
    assert!(state.selection.service_id.is_none());
    assert!(state.selection.provider_id.is_none());
    assert!(state.selection.slot.is_none());

    reselect.await.expect("reselect task should finish");
    let state = flow.state();
    assert_eq!(state.detail.data().map(|d| d.id.as_str()), Some("2"));
}

#[tokio::test]
async fn empty_provider_list_is_success_with_notice() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dentistries/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json("1", "Downtown Dental")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dentistries/1/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let flow = flow_for(&mock_server);
    flow.select_dentistry("1").await;
    flow.select_service("svc-clean").await;

    let state = flow.state();
    assert!(state.providers.is_success());
    assert_eq!(state.notice.as_deref(), Some(NO_PROVIDERS_NOTICE));
}

#[tokio::test]
async fn empty_availability_is_success_with_notice() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dentistries/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json("1", "Downtown Dental")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dentistries/1/providers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([provider_json("staff-1", "Dr. Nova")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/providers/staff-1/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let flow = flow_for(&mock_server);
    flow.select_dentistry("1").await;
    flow.select_service("svc-clean").await;
    flow.select_provider("staff-1").await;

    let state = flow.state();
    assert!(state.availability.is_success());
    assert_eq!(state.notice.as_deref(), Some(NO_AVAILABILITY_NOTICE));
}

#[tokio::test]
async fn availability_failure_clears_only_its_own_stage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dentistries/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json("1", "Downtown Dental")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dentistries/1/providers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([provider_json("staff-1", "Dr. Nova")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/providers/staff-1/availability"))
        .respond_with(ResponseTemplate::new(500).set_body_string("calendar offline"))
        .mount(&mock_server)
        .await;

    let flow = flow_for(&mock_server);
    flow.select_dentistry("1").await;
    flow.select_service("svc-clean").await;
    flow.select_provider("staff-1").await;

    let state = flow.state();
    assert_eq!(state.availability.error(), Some("calendar offline"));
    assert!(state.providers.is_success(), "provider data survives");
    assert!(state.detail.is_success(), "detail data survives");
}

#[tokio::test]
async fn incomplete_selection_fails_validation_with_zero_network_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "confirmationNumber": "CONF-000",
            "message": "unreachable"
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let flow = flow_for(&mock_server);
    flow.book("Alex Smith").await;

    let state = flow.state();
    assert_eq!(state.booking.error(), Some(BOOKING_INCOMPLETE_MESSAGE));
}

#[tokio::test]
async fn booking_failure_surfaces_body_and_keeps_selection() {
    let mock_server = MockServer::start().await;
    mount_happy_path(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Slot no longer available"))
        .mount(&mock_server)
        .await;

    let flow = flow_for(&mock_server);
    flow.search("Downtown").await;
    flow.select_dentistry("1").await;
    flow.select_service("svc-clean").await;
    flow.select_provider("staff-1").await;
    let slots = flow.state().availability.data().cloned().expect("slots loaded");
    flow.select_slot(slots[0].clone());

    flow.book("Alex Smith").await;

    let state = flow.state();
    assert_eq!(state.booking.error(), Some("Slot no longer available"));
    assert!(
        state.selection.is_complete(),
        "failed booking keeps selections for retry"
    );
}

#[tokio::test]
async fn shutdown_cancels_in_flight_requests_without_writing_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dentistries"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([summary_json("1", "Downtown Dental")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let flow = flow_for(&mock_server);
    let search = tokio::spawn({
        let flow = flow.clone();
        async move { flow.search("Downtown").await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    flow.shutdown();
    search.await.expect("search task should finish");

    let state = flow.state();
    assert!(
        state.search.data().is_none(),
        "cancelled request must not write results"
    );
}
