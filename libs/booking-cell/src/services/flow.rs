// libs/booking-cell/src/services/flow.rs
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use shared_api::{ApiClient, CancellationToken};
use shared_models::{ApiError, AvailabilitySlot};

use crate::models::{DentistryDetail, DentistrySummary, Provider};
use crate::state::{self, BookingFlowState};

/// Current cancellation token per fetch stage. A key change cancels the
/// stage's token together with every downstream stage's token, then installs
/// a fresh child of the lifetime token for the request it is about to issue.
pub(crate) struct StageTokens {
    pub(crate) search: CancellationToken,
    pub(crate) detail: CancellationToken,
    pub(crate) providers: CancellationToken,
    pub(crate) availability: CancellationToken,
}

impl StageTokens {
    fn new(lifetime: &CancellationToken) -> Self {
        Self {
            search: lifetime.child_token(),
            detail: lifetime.child_token(),
            providers: lifetime.child_token(),
            availability: lifetime.child_token(),
        }
    }
}

/// Orchestrates the dependent fetch chain
/// search -> detail -> providers -> availability and the final booking
/// submission. Exactly one request is issued per key change; superseded
/// requests are cancelled and their eventual resolution is discarded by a
/// token check under the write lock, so out-of-order resolution can never
/// write into current state.
#[derive(Clone)]
pub struct BookingFlowService {
    pub(crate) api: Arc<ApiClient>,
    pub(crate) state: Arc<RwLock<BookingFlowState>>,
    pub(crate) tokens: Arc<Mutex<StageTokens>>,
    pub(crate) lifetime: CancellationToken,
}

impl BookingFlowService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let lifetime = CancellationToken::new();
        let tokens = StageTokens::new(&lifetime);
        Self {
            api,
            state: Arc::new(RwLock::new(BookingFlowState::default())),
            tokens: Arc::new(Mutex::new(tokens)),
            lifetime,
        }
    }

    /// Snapshot of the current flow state for rendering or assertions.
    pub fn state(&self) -> BookingFlowState {
        self.state.read().clone()
    }

    /// Cancels every in-flight request. Tied to the owning component's
    /// lifetime; a dismissed flow must not keep writing state.
    pub fn shutdown(&self) {
        self.lifetime.cancel();
    }

    pub async fn search(&self, query: &str) {
        let token = {
            let mut state = self.state.write();
            state::begin_search(&mut state);
            let mut tokens = self.tokens.lock();
            tokens.search.cancel();
            tokens.search = self.lifetime.child_token();
            tokens.search.clone()
        };

        debug!("searching dentistries: {}", query);
        let path = format!("/dentistries?query={}", urlencoding::encode(query));
        let result = self.api.get::<Vec<DentistrySummary>>(&path, &token).await;

        self.apply(&token, result, state::apply_search);
    }

    pub async fn select_dentistry(&self, dentistry_id: &str) {
        let token = {
            let mut state = self.state.write();
            state::select_dentistry(&mut state, dentistry_id);
            let mut tokens = self.tokens.lock();
            tokens.detail.cancel();
            tokens.providers.cancel();
            tokens.availability.cancel();
            tokens.detail = self.lifetime.child_token();
            tokens.detail.clone()
        };

        debug!("loading dentistry detail: {}", dentistry_id);
        let path = format!("/dentistries/{}", dentistry_id);
        let result = self.api.get::<DentistryDetail>(&path, &token).await;

        self.apply(&token, result, state::apply_detail);
    }

    pub async fn select_service(&self, service_id: &str) {
        let (dentistry_id, token) = {
            let mut state = self.state.write();
            let Some(dentistry_id) = state.selection.dentistry_id.clone() else {
                warn!("service selected with no dentistry in selection");
                return;
            };
            state::select_service(&mut state, service_id);
            let mut tokens = self.tokens.lock();
            tokens.providers.cancel();
            tokens.availability.cancel();
            tokens.providers = self.lifetime.child_token();
            (dentistry_id, tokens.providers.clone())
        };

        debug!("loading providers for service {}", service_id);
        let path = format!(
            "/dentistries/{}/providers?serviceId={}",
            dentistry_id,
            urlencoding::encode(service_id)
        );
        let result = self.api.get::<Vec<Provider>>(&path, &token).await;

        self.apply(&token, result, state::apply_providers);
    }

    pub async fn select_provider(&self, provider_id: &str) {
        let (service_id, token) = {
            let mut state = self.state.write();
            let Some(service_id) = state.selection.service_id.clone() else {
                warn!("provider selected with no service in selection");
                return;
            };
            state::select_provider(&mut state, provider_id);
            let mut tokens = self.tokens.lock();
            tokens.availability.cancel();
            tokens.availability = self.lifetime.child_token();
            (service_id, tokens.availability.clone())
        };

        debug!("loading availability for provider {}", provider_id);
        let path = format!(
            "/providers/{}/availability?serviceId={}",
            provider_id,
            urlencoding::encode(&service_id)
        );
        let result = self.api.get::<Vec<AvailabilitySlot>>(&path, &token).await;

        self.apply(&token, result, state::apply_availability);
    }

    /// Pure selection; availability slots are already loaded.
    pub fn select_slot(&self, slot: AvailabilitySlot) {
        let mut state = self.state.write();
        state::select_slot(&mut state, slot);
    }

    /// Writes a resolved result into state unless the request was superseded.
    /// The token check happens under the write lock, so a cancellation racing
    /// with resolution can never interleave a stale write.
    fn apply<T>(
        &self,
        token: &CancellationToken,
        result: Result<T, ApiError>,
        reduce: fn(&mut BookingFlowState, Result<T, ApiError>),
    ) {
        if matches!(result, Err(ApiError::Cancelled)) {
            return;
        }
        let mut state = self.state.write();
        if token.is_cancelled() {
            debug!("discarding resolution of superseded request");
            return;
        }
        reduce(&mut state, result);
    }
}
