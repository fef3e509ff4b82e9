/// Lifecycle of one fetch stage. Every dependent fetch moves
/// `Idle -> Loading -> Success | Error`; a key change upstream snaps the
/// stage back to `Idle` before the replacement request is issued.
#[derive(Debug, Clone, PartialEq)]
pub enum StageState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

// Idle regardless of T; the derive would demand T: Default.
impl<T> Default for StageState<T> {
    fn default() -> Self {
        StageState::Idle
    }
}

impl<T> StageState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, StageState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, StageState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StageState::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            StageState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StageState::Error(message) => Some(message),
            _ => None,
        }
    }
}
