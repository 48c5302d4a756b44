//! Request and response payloads for the Aqari API. The backend speaks
//! camelCase JSON; credential payloads must never be logged.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub device_fingerprint: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub requires_verification: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDeviceRequest {
    pub email: String,
    pub code: String,
    pub device_fingerprint: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationRequest {
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetConfirmRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// Session-holder profile, fetched fresh on each authenticated page load so
/// access-control UI never renders from stale data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub tier: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan_type: String,
    pub status: String,
    #[serde(default)]
    pub current_period_start: Option<String>,
    #[serde(default)]
    pub current_period_end: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub plan_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: u64,
    pub name: String,
    pub city: String,
    pub area: String,
    pub bedroom_count: u32,
    pub building_status: String,
    pub price: u64,
    #[serde(default)]
    pub estimated_value: Option<u64>,
    #[serde(default)]
    pub size_sqft: Option<f64>,
}

impl Deal {
    /// Discount of the asking price against the estimated value, in percent.
    pub fn discount_percent(&self) -> Option<f64> {
        let estimated = self.estimated_value? as f64;
        if estimated <= 0.0 {
            return None;
        }
        Some((1.0 - self.price as f64 / estimated) * 100.0)
    }
}

/// Spring-style page envelope used by list endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
}

/// Server-side deals filters, mapped one-to-one onto query parameters.
/// The price range is a client-side post-filter and deliberately absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DealFilters {
    pub city: Option<String>,
    pub area: Option<String>,
    pub bedroom_count: Option<u32>,
    pub building_status: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequestReceipt {
    pub id: u64,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingSection {
    pub name: String,
    pub language: String,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub name: String,
    pub version: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_uses_camel_case() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"requiresVerification":true}"#).expect("decode");
        assert!(response.requires_verification);
        assert!(response.message.is_none());
    }

    #[test]
    fn page_envelope_round_trips() {
        let page: Page<Deal> = serde_json::from_str(
            r#"{"content":[{"id":7,"name":"Marina View 2BR","city":"dubai","area":"marina",
                "bedroomCount":2,"buildingStatus":"ready","price":1500000}],
               "totalElements":1,"totalPages":1}"#,
        )
        .expect("decode");
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].bedroom_count, 2);
        assert_eq!(page.total_elements, 1);
    }

    #[test]
    fn discount_percent_requires_positive_estimate() {
        let mut deal = Deal {
            id: 1,
            name: "JVC 1BR".to_string(),
            city: "dubai".to_string(),
            area: "jvc".to_string(),
            bedroom_count: 1,
            building_status: "ready".to_string(),
            price: 800_000,
            estimated_value: Some(1_000_000),
            size_sqft: None,
        };
        let discount = deal.discount_percent().expect("discount");
        assert!((discount - 20.0).abs() < 1e-9);

        deal.estimated_value = None;
        assert!(deal.discount_percent().is_none());
    }
}
