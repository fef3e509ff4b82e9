// libs/booking-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::{AvailabilitySlot, Service, StaffMember};

// ==============================================================================
// DIRECTORY MODELS
// ==============================================================================

/// One row of a dentistry search result. The list is replaced wholesale on
/// every search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DentistrySummary {
    pub id: String,
    pub name: String,
    pub city: String,
    pub rating: Option<f64>,
    pub distance_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub transit: Option<String>,
    pub parking: Option<String>,
}

/// Full practice record fetched once per selected dentistry id and
/// superseded wholesale on re-selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DentistryDetail {
    pub id: String,
    pub name: String,
    pub city: String,
    pub rating: Option<f64>,
    pub distance_minutes: Option<u32>,
    pub description: Option<String>,
    pub services: Vec<Service>,
    pub staff: Vec<StaffMember>,
    pub access: AccessInfo,
}

/// A member of staff who can deliver a given service. Scoped to a
/// (dentistry, service) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub title: String,
    pub specialties: Option<Vec<String>>,
}

// ==============================================================================
// BOOKING MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub dentistry_id: String,
    pub service_id: String,
    pub provider_id: String,
    pub slot_start: DateTime<Utc>,
    pub slot_end: Option<DateTime<Utc>>,
    pub patient_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub confirmation_number: String,
    pub message: String,
}

impl BookingResponse {
    /// Confirmation line shown to the patient: the server's message plus the
    /// confirmation number.
    pub fn confirmation_text(&self) -> String {
        format!("{} Confirmation: {}", self.message, self.confirmation_number)
    }
}

/// The transient selection assembled across the flow. All four parts must be
/// present before submission; cleared on dentistry re-selection and on a
/// successful booking.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingSelection {
    pub dentistry_id: Option<String>,
    pub service_id: Option<String>,
    pub provider_id: Option<String>,
    pub slot: Option<AvailabilitySlot>,
}

impl BookingSelection {
    pub fn is_complete(&self) -> bool {
        self.dentistry_id.is_some()
            && self.service_id.is_some()
            && self.provider_id.is_some()
            && self.slot.is_some()
    }
}
