use shared_models::{ApiError, AvailabilitySlot, StageState};

use crate::models::{
    BookingResponse, BookingSelection, DentistryDetail, DentistrySummary, Provider,
};

pub const NO_PROVIDERS_NOTICE: &str = "No providers available for this service.";
pub const NO_AVAILABILITY_NOTICE: &str = "No availability in the near future.";
pub const BOOKING_INCOMPLETE_MESSAGE: &str =
    "Select a dentistry, service, provider, and time slot before booking.";

/// State container for the public booking flow. Owned by the root of the
/// rendering layer and handed to the flow service; all mutations go through
/// the reducer functions below.
#[derive(Debug, Clone, Default)]
pub struct BookingFlowState {
    pub search: StageState<Vec<DentistrySummary>>,
    pub detail: StageState<DentistryDetail>,
    pub providers: StageState<Vec<Provider>>,
    pub availability: StageState<Vec<AvailabilitySlot>>,
    pub selection: BookingSelection,
    pub booking: StageState<BookingResponse>,
    pub notice: Option<String>,
}

// ==============================================================================
// REDUCERS
// ==============================================================================
//
// Pure functions over the state container. Key-change reducers reset every
// strictly-downstream stage to Idle before the replacement request is issued;
// apply reducers write a single stage and never touch its neighbors.

pub fn begin_search(state: &mut BookingFlowState) {
    state.search = StageState::Loading;
}

pub fn apply_search(state: &mut BookingFlowState, result: Result<Vec<DentistrySummary>, ApiError>) {
    state.search = match result {
        Ok(list) => StageState::Success(list),
        Err(error) => StageState::Error(error.user_message()),
    };
}

pub fn select_dentistry(state: &mut BookingFlowState, dentistry_id: &str) {
    state.selection = BookingSelection {
        dentistry_id: Some(dentistry_id.to_string()),
        ..BookingSelection::default()
    };
    state.detail = StageState::Loading;
    state.providers = StageState::Idle;
    state.availability = StageState::Idle;
    state.booking = StageState::Idle;
    state.notice = None;
}

pub fn apply_detail(state: &mut BookingFlowState, result: Result<DentistryDetail, ApiError>) {
    state.detail = match result {
        Ok(detail) => StageState::Success(detail),
        Err(error) => StageState::Error(error.user_message()),
    };
}

pub fn select_service(state: &mut BookingFlowState, service_id: &str) {
    state.selection.service_id = Some(service_id.to_string());
    state.selection.provider_id = None;
    state.selection.slot = None;
    state.providers = StageState::Loading;
    state.availability = StageState::Idle;
    state.notice = None;
}

pub fn apply_providers(state: &mut BookingFlowState, result: Result<Vec<Provider>, ApiError>) {
    state.providers = match result {
        Ok(list) => {
            if list.is_empty() {
                state.notice = Some(NO_PROVIDERS_NOTICE.to_string());
            }
            StageState::Success(list)
        }
        Err(error) => StageState::Error(error.user_message()),
    };
}

pub fn select_provider(state: &mut BookingFlowState, provider_id: &str) {
    state.selection.provider_id = Some(provider_id.to_string());
    state.selection.slot = None;
    state.availability = StageState::Loading;
    state.notice = None;
}

pub fn apply_availability(
    state: &mut BookingFlowState,
    result: Result<Vec<AvailabilitySlot>, ApiError>,
) {
    state.availability = match result {
        Ok(list) => {
            if list.is_empty() {
                state.notice = Some(NO_AVAILABILITY_NOTICE.to_string());
            }
            StageState::Success(list)
        }
        Err(error) => StageState::Error(error.user_message()),
    };
}

pub fn select_slot(state: &mut BookingFlowState, slot: AvailabilitySlot) {
    state.selection.slot = Some(slot);
}

pub fn begin_booking(state: &mut BookingFlowState) {
    state.booking = StageState::Loading;
}

/// On success the selection is cleared; on failure every selection is kept so
/// the patient can retry as-is.
pub fn apply_booking(state: &mut BookingFlowState, result: Result<BookingResponse, ApiError>) {
    state.booking = match result {
        Ok(response) => {
            state.selection = BookingSelection::default();
            StageState::Success(response)
        }
        Err(error) => StageState::Error(error.user_message()),
    };
}
