// libs/practice-cell/src/services/admin.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::{debug, warn};

use shared_api::{ApiClient, CancellationToken};
use shared_models::{ApiError, AvailabilitySlot, Service, StaffMember};

use crate::models::{self, BillingStatus, NewService, PracticeProfile, StaffUpdate};
use crate::state::{self, LoadedPractice, PracticeState, NO_STAFF_SELECTED_MESSAGE};

/// Controller for the practice admin console. Every mutation follows the same
/// shape: validate synchronously, apply the change to local state, issue the
/// network call, then reconcile with the server entity or roll back to the
/// snapshot taken at the optimistic step. Rollbacks match by temporary id or
/// unique key, so concurrent mutations to different entities never interfere.
#[derive(Clone)]
pub struct PracticeAdminService {
    api: Arc<ApiClient>,
    practice_id: String,
    state: Arc<RwLock<PracticeState>>,
    lifetime: CancellationToken,
}

impl PracticeAdminService {
    pub fn new(api: Arc<ApiClient>, practice_id: impl Into<String>) -> Self {
        Self {
            api,
            practice_id: practice_id.into(),
            state: Arc::new(RwLock::new(PracticeState::default())),
            lifetime: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> PracticeState {
        self.state.read().clone()
    }

    pub fn shutdown(&self) {
        self.lifetime.cancel();
    }

    fn path(&self, suffix: &str) -> String {
        format!("/practices/{}/{}", self.practice_id, suffix)
    }

    /// Initial load: all five areas fetched concurrently. Any failure marks
    /// the load errored; nothing is partially populated.
    pub async fn load(&self) {
        let token = {
            let mut state = self.state.write();
            state::begin_load(&mut state);
            self.lifetime.child_token()
        };

        debug!("loading practice {}", self.practice_id);
        let profile_path = self.path("profile");
        let services_path = self.path("services");
        let staff_path = self.path("staff");
        let availability_path = self.path("availability");
        let billing_path = self.path("billing");
        let (profile, services, staff, availability, billing) = futures::join!(
            self.api.get::<PracticeProfile>(&profile_path, &token),
            self.api.get::<Vec<Service>>(&services_path, &token),
            self.api.get::<Vec<StaffMember>>(&staff_path, &token),
            self.api.get::<Vec<AvailabilitySlot>>(&availability_path, &token),
            self.api.get::<BillingStatus>(&billing_path, &token),
        );

        let result = (|| -> Result<LoadedPractice, ApiError> {
            Ok(LoadedPractice {
                profile: profile?,
                services: services?,
                staff: staff?,
                availability: availability?,
                billing: billing?,
            })
        })();

        if matches!(result, Err(ApiError::Cancelled)) {
            return;
        }
        let mut state = self.state.write();
        state::apply_load(&mut state, result);
    }

    pub async fn save_profile(&self, form: PracticeProfile) {
        if let Err(message) = form.validate() {
            self.state.write().profile_message = Some(message);
            return;
        }

        let prior = {
            let mut state = self.state.write();
            state::apply_optimistic_profile(&mut state, form.clone())
        };

        let token = self.lifetime.child_token();
        let result = self
            .api
            .put::<PracticeProfile, _>(&self.path("profile"), &form, &token)
            .await;

        if matches!(result, Err(ApiError::Cancelled)) {
            return;
        }
        let mut state = self.state.write();
        state::resolve_profile_save(&mut state, prior, result);
    }

    pub async fn add_service(&self, draft: NewService) {
        if let Err(message) = draft.validate() {
            self.state.write().service_message = Some(message);
            return;
        }

        let temp_id = models::temp_id();
        let optimistic = Service {
            id: temp_id.clone(),
            name: draft.name.clone(),
            duration_minutes: draft.duration_minutes,
            price: draft.price,
            description: draft.description.clone(),
            active: draft.active,
        };
        {
            let mut state = self.state.write();
            state::apply_optimistic_service(&mut state, optimistic);
        }

        let token = self.lifetime.child_token();
        let result = self
            .api
            .post::<Service, _>(&self.path("services"), &draft, &token)
            .await;

        if matches!(result, Err(ApiError::Cancelled)) {
            return;
        }
        let mut state = self.state.write();
        state::resolve_service_create(&mut state, &temp_id, result);
    }

    pub async fn update_staff(&self, staff_id: &str, update: StaffUpdate) {
        if staff_id.trim().is_empty() {
            self.state.write().staff_message = Some(NO_STAFF_SELECTED_MESSAGE.to_string());
            return;
        }
        if let Err(message) = update.validate() {
            self.state.write().staff_message = Some(message);
            return;
        }

        let prior = {
            let mut state = self.state.write();
            state::apply_optimistic_staff(&mut state, staff_id, &update.role, &update.specialties)
        };
        let Some(prior) = prior else {
            warn!("staff update for unknown member {}", staff_id);
            self.state.write().staff_message = Some(NO_STAFF_SELECTED_MESSAGE.to_string());
            return;
        };

        let token = self.lifetime.child_token();
        let result = self
            .api
            .put::<StaffMember, _>(&self.path(&format!("staff/{}", staff_id)), &update, &token)
            .await;

        if matches!(result, Err(ApiError::Cancelled)) {
            return;
        }
        let mut state = self.state.write();
        state::resolve_staff_update(&mut state, prior, result);
    }

    pub async fn add_availability_slot(&self, start: DateTime<Utc>, duration_minutes: i64) {
        if duration_minutes <= 0 {
            self.state.write().availability_message = Some("Duration must be positive.".to_string());
            return;
        }

        let slot = AvailabilitySlot {
            start,
            end: Some(start + Duration::minutes(duration_minutes)),
            timezone: None,
        };
        {
            let mut state = self.state.write();
            state::apply_optimistic_slot(&mut state, slot.clone());
        }

        let token = self.lifetime.child_token();
        let result = self
            .api
            .post::<AvailabilitySlot, _>(&self.path("availability"), &slot, &token)
            .await;

        if matches!(result, Err(ApiError::Cancelled)) {
            return;
        }
        let mut state = self.state.write();
        state::resolve_slot_create(&mut state, start, result);
    }
}
