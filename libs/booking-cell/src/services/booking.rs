use tracing::{info, warn};

use shared_models::{ApiError, StageState};

use crate::models::{BookingRequest, BookingResponse};
use crate::services::flow::BookingFlowService;
use crate::state::{self, BOOKING_INCOMPLETE_MESSAGE};

impl BookingFlowService {
    /// Submits the assembled booking. Preconditions are checked here, at
    /// submission time only: dentistry, service, provider, and slot must all
    /// be selected, otherwise the booking stage carries a validation message
    /// and no network call is made. On failure every selection is left in
    /// place so the patient can retry.
    pub async fn book(&self, patient_name: &str) {
        let (request, token) = {
            let mut state = self.state.write();
            let selection = state.selection.clone();
            let (Some(dentistry_id), Some(service_id), Some(provider_id), Some(slot)) = (
                selection.dentistry_id,
                selection.service_id,
                selection.provider_id,
                selection.slot,
            ) else {
                warn!("booking submitted with incomplete selection");
                state.booking = StageState::Error(BOOKING_INCOMPLETE_MESSAGE.to_string());
                return;
            };

            let request = BookingRequest {
                dentistry_id,
                service_id,
                provider_id,
                slot_start: slot.start,
                slot_end: slot.end,
                patient_name: patient_name.to_string(),
            };
            state::begin_booking(&mut state);
            (request, self.lifetime.child_token())
        };

        let result = self
            .api
            .post::<BookingResponse, _>("/appointments", &request, &token)
            .await;

        if matches!(result, Err(ApiError::Cancelled)) {
            return;
        }
        if let Ok(response) = &result {
            info!("booking confirmed: {}", response.confirmation_number);
        }

        let mut state = self.state.write();
        state::apply_booking(&mut state, result);
    }
}
