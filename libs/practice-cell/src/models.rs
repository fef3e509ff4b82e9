use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// PRACTICE ADMIN MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeProfile {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_name: Option<String>,
    pub website: Option<String>,
}

impl PracticeProfile {
    /// Synchronous pre-network validation; a failure produces a message and
    /// the save never reaches the wire.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() || self.address.trim().is_empty() || self.city.trim().is_empty()
        {
            return Err("Name, address, and city are required.".to_string());
        }
        if let Some(email) = &self.email {
            if !email.is_empty() && !email.contains('@') {
                return Err("Enter a valid contact email.".to_string());
            }
        }
        Ok(())
    }
}

/// Draft for a new service; the server assigns the real id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub name: String,
    pub duration_minutes: u32,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl NewService {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Service name is required.".to_string());
        }
        if self.duration_minutes == 0 {
            return Err("Duration must be greater than zero.".to_string());
        }
        if let Some(price) = self.price {
            if price < 0.0 {
                return Err("Price cannot be negative.".to_string());
            }
        }
        Ok(())
    }
}

/// Patch applied to one roster member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUpdate {
    pub role: String,
    pub specialties: Vec<String>,
}

impl StaffUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if self.role.trim().is_empty() {
            return Err("Role or title is required.".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingState {
    Active,
    PastDue,
    Trialing,
    Canceled,
}

impl fmt::Display for BillingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingState::Active => write!(f, "active"),
            BillingState::PastDue => write!(f, "past_due"),
            BillingState::Trialing => write!(f, "trialing"),
            BillingState::Canceled => write!(f, "canceled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingStatus {
    pub plan: String,
    pub status: BillingState,
    pub renewal_date: Option<NaiveDate>,
    pub amount_due_cents: Option<i64>,
    pub payment_method: Option<String>,
}

// Optimistic entities carry a `temp-` prefixed id until the server-assigned
// id replaces it.
pub(crate) fn temp_id() -> String {
    format!("temp-{}", uuid::Uuid::new_v4())
}

pub fn is_temp_id(id: &str) -> bool {
    id.starts_with("temp-")
}
