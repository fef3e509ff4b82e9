use shared_models::{ApiError, AvailabilitySlot, Service, StaffMember, StageState};

use crate::models::{BillingStatus, PracticeProfile};

pub const PROFILE_SAVED_MESSAGE: &str = "Profile saved.";
pub const SERVICE_ADDED_MESSAGE: &str = "Service added.";
pub const STAFF_UPDATED_MESSAGE: &str = "Staff details updated.";
pub const AVAILABILITY_SAVED_MESSAGE: &str = "Availability saved.";
pub const NO_STAFF_SELECTED_MESSAGE: &str = "Select a staff member to update.";

/// State container for the practice admin console. Each mutable collection
/// keeps one message slot; optimistic phases are observable here before the
/// corresponding network call resolves.
#[derive(Debug, Clone, Default)]
pub struct PracticeState {
    pub load: StageState<()>,
    pub profile: Option<PracticeProfile>,
    pub services: Vec<Service>,
    pub staff: Vec<StaffMember>,
    pub availability: Vec<AvailabilitySlot>,
    pub billing: Option<BillingStatus>,
    pub profile_message: Option<String>,
    pub service_message: Option<String>,
    pub staff_message: Option<String>,
    pub availability_message: Option<String>,
}

/// Everything the initial load fetches in one concurrent pass.
#[derive(Debug, Clone)]
pub struct LoadedPractice {
    pub profile: PracticeProfile,
    pub services: Vec<Service>,
    pub staff: Vec<StaffMember>,
    pub availability: Vec<AvailabilitySlot>,
    pub billing: BillingStatus,
}

// ==============================================================================
// REDUCERS
// ==============================================================================

pub fn begin_load(state: &mut PracticeState) {
    state.load = StageState::Loading;
}

pub fn apply_load(state: &mut PracticeState, result: Result<LoadedPractice, ApiError>) {
    match result {
        Ok(loaded) => {
            state.profile = Some(loaded.profile);
            state.services = loaded.services;
            state.staff = loaded.staff;
            state.availability = loaded.availability;
            state.billing = Some(loaded.billing);
            state.load = StageState::Success(());
        }
        Err(error) => {
            state.load = StageState::Error(error.user_message());
        }
    }
}

// --- profile ---

/// Optimistically replaces the profile; returns the prior value for rollback.
pub fn apply_optimistic_profile(
    state: &mut PracticeState,
    form: PracticeProfile,
) -> Option<PracticeProfile> {
    state.profile_message = None;
    state.profile.replace(form)
}

pub fn resolve_profile_save(
    state: &mut PracticeState,
    prior: Option<PracticeProfile>,
    result: Result<PracticeProfile, ApiError>,
) {
    match result {
        Ok(saved) => {
            state.profile = Some(saved);
            state.profile_message = Some(PROFILE_SAVED_MESSAGE.to_string());
        }
        Err(error) => {
            state.profile = prior;
            state.profile_message = Some(error.user_message());
        }
    }
}

// --- services ---

pub fn apply_optimistic_service(state: &mut PracticeState, service: Service) {
    state.service_message = None;
    state.services.push(service);
}

/// Reconciles an optimistic insert: on success the server entity replaces the
/// temp entry in place (same position); on failure exactly that entry is
/// removed, leaving the rest of the list untouched.
pub fn resolve_service_create(
    state: &mut PracticeState,
    temp_id: &str,
    result: Result<Service, ApiError>,
) {
    match result {
        Ok(created) => {
            if let Some(entry) = state.services.iter_mut().find(|s| s.id == temp_id) {
                *entry = created;
            }
            state.service_message = Some(SERVICE_ADDED_MESSAGE.to_string());
        }
        Err(error) => {
            state.services.retain(|s| s.id != temp_id);
            state.service_message = Some(error.user_message());
        }
    }
}

// --- staff ---

/// Patches one roster member in place; returns the prior snapshot for
/// rollback. `None` when the member is not on the roster.
pub fn apply_optimistic_staff(
    state: &mut PracticeState,
    staff_id: &str,
    role: &str,
    specialties: &[String],
) -> Option<StaffMember> {
    state.staff_message = None;
    let member = state.staff.iter_mut().find(|m| m.id == staff_id)?;
    let prior = member.clone();
    member.role = Some(role.to_string());
    member.specialties = Some(specialties.to_vec());
    Some(prior)
}

pub fn resolve_staff_update(
    state: &mut PracticeState,
    prior: StaffMember,
    result: Result<StaffMember, ApiError>,
) {
    match result {
        Ok(updated) => {
            if let Some(entry) = state.staff.iter_mut().find(|m| m.id == updated.id) {
                *entry = updated;
            }
            state.staff_message = Some(STAFF_UPDATED_MESSAGE.to_string());
        }
        Err(error) => {
            if let Some(entry) = state.staff.iter_mut().find(|m| m.id == prior.id) {
                *entry = prior;
            }
            state.staff_message = Some(error.user_message());
        }
    }
}

// --- availability ---

pub fn apply_optimistic_slot(state: &mut PracticeState, slot: AvailabilitySlot) {
    state.availability_message = None;
    state.availability.insert(0, slot);
}

/// Slots have no server id; the slot start is the unique key used for
/// reconciliation and rollback.
pub fn resolve_slot_create(
    state: &mut PracticeState,
    start: chrono::DateTime<chrono::Utc>,
    result: Result<AvailabilitySlot, ApiError>,
) {
    match result {
        Ok(created) => {
            if let Some(entry) = state.availability.iter_mut().find(|s| s.start == start) {
                *entry = created;
            }
            state.availability_message = Some(AVAILABILITY_SAVED_MESSAGE.to_string());
        }
        Err(error) => {
            if let Some(position) = state.availability.iter().position(|s| s.start == start) {
                state.availability.remove(position);
            }
            state.availability_message = Some(error.user_message());
        }
    }
}
