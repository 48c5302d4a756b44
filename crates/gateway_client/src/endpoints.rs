//! Typed wrappers over `ApiClient::request`. Endpoint paths live here so
//! route code never spells them out. Auth transitions go through
//! `send_direct` — they must never be served from cache or coalesced with an
//! unrelated in-flight call — and flush the cache on both sides.

use serde_json::Value;

use crate::client::{from_value, to_value, ApiClient, RequestOptions};
use crate::error::Error;
use crate::transport::{Method, Part};
use crate::types::{
    AnalysisRequestReceipt, CheckoutSession, CheckoutSessionRequest, Deal, DealFilters,
    HealthResponse, LandingSection, LoginRequest, LoginResponse, Page, PasswordResetConfirmRequest,
    PasswordResetRequest, ResendVerificationRequest, SignupRequest, Subscription,
    UpdateProfileRequest, User, VerifyDeviceRequest, VerifyEmailRequest,
};

impl ApiClient {
    /// Exchanges credentials for a session cookie. Bypasses cache and dedup
    /// and flushes the cache before and after so no cross-session data leaks.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, Error> {
        self.clear_cache();
        let payload = to_value(request)?;
        let result = self
            .send_direct("/api/auth/login", RequestOptions::json(Method::Post, payload))
            .await;
        self.clear_cache();
        from_value(result?)
    }

    /// Clears the server-side session. Same bypass-and-flush policy as login.
    pub async fn logout(&self) -> Result<(), Error> {
        self.clear_cache();
        let result = self
            .send_direct(
                "/api/auth/logout",
                RequestOptions {
                    method: Method::Post,
                    ..RequestOptions::default()
                },
            )
            .await;
        self.clear_cache();
        result.map(|_| ())
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<(), Error> {
        self.post_json::<Value, _>("/api/auth/signup", request)
            .await
            .map(|_| ())
    }

    pub async fn verify_email(&self, request: &VerifyEmailRequest) -> Result<(), Error> {
        self.post_json::<Value, _>("/api/auth/verify-email", request)
            .await
            .map(|_| ())
    }

    pub async fn verify_device(&self, request: &VerifyDeviceRequest) -> Result<(), Error> {
        self.post_json::<Value, _>("/api/auth/verify-device", request)
            .await
            .map(|_| ())
    }

    pub async fn resend_verification(
        &self,
        request: &ResendVerificationRequest,
    ) -> Result<(), Error> {
        self.post_json::<Value, _>("/api/auth/resend-verification", request)
            .await
            .map(|_| ())
    }

    pub async fn request_password_reset(
        &self,
        request: &PasswordResetRequest,
    ) -> Result<(), Error> {
        self.post_json::<Value, _>("/api/auth/password-reset", request)
            .await
            .map(|_| ())
    }

    pub async fn confirm_password_reset(
        &self,
        request: &PasswordResetConfirmRequest,
    ) -> Result<(), Error> {
        self.post_json::<Value, _>("/api/auth/password-reset/confirm", request)
            .await
            .map(|_| ())
    }

    /// Always fetched fresh; stale session data directly breaks
    /// access-control UI.
    pub async fn current_user(&self) -> Result<User, Error> {
        self.get_json("/users/me", false).await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, Error> {
        let user = self.put_json("/users/me", request).await?;
        self.invalidate(Method::Get, "/users/me");
        Ok(user)
    }

    /// `None` when the account has no subscription yet.
    pub async fn subscription(&self) -> Result<Option<Subscription>, Error> {
        match self.get_json("/api/subscriptions", false).await {
            Ok(subscription) => Ok(Some(subscription)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, Error> {
        self.post_json("/api/subscriptions/create-checkout-session", request)
            .await
    }

    pub async fn deals(
        &self,
        page: u32,
        size: u32,
        filters: &DealFilters,
    ) -> Result<Page<Deal>, Error> {
        self.get_json(&deals_path(page, size, filters), true).await
    }

    pub async fn deal(&self, id: u64) -> Result<Deal, Error> {
        self.get_json(&format!("/api/deals/{id}"), true).await
    }

    /// Best-effort secondary lookup; callers ignore failures.
    pub async fn comparable_deals(&self, id: u64) -> Result<Vec<Deal>, Error> {
        self.get_json(&format!("/api/deals/{id}/comparables"), true)
            .await
    }

    pub async fn submit_analysis_request(
        &self,
        parts: Vec<Part>,
    ) -> Result<AnalysisRequestReceipt, Error> {
        self.post_multipart("/api/analysis-requests", parts).await
    }

    pub async fn landing_section(
        &self,
        name: &str,
        language: &str,
    ) -> Result<LandingSection, Error> {
        self.get_json(
            &format!("/api/landing-page/section/{name}?language={language}"),
            true,
        )
        .await
    }

    pub async fn health(&self) -> Result<HealthResponse, Error> {
        self.get_json("/health", false).await
    }
}

/// Builds the deals listing path. Parameter order is fixed
/// (`page,size,city,area,bedroomCount,buildingStatus`); absent filters are
/// omitted entirely.
pub fn deals_path(page: u32, size: u32, filters: &DealFilters) -> String {
    let mut path = format!("/api/deals?page={page}&size={size}");
    if let Some(city) = filters.city.as_deref().filter(|value| !value.is_empty()) {
        path.push_str(&format!("&city={city}"));
    }
    if let Some(area) = filters.area.as_deref().filter(|value| !value.is_empty()) {
        path.push_str(&format!("&area={area}"));
    }
    if let Some(bedrooms) = filters.bedroom_count {
        path.push_str(&format!("&bedroomCount={bedrooms}"));
    }
    if let Some(status) = filters
        .building_status
        .as_deref()
        .filter(|value| !value.is_empty())
    {
        path.push_str(&format!("&buildingStatus={status}"));
    }
    path
}

/// Client-side price-range post-filter for the deals table. The backend does
/// not accept price bounds, so the listing applies this after the fetch.
pub fn apply_price_filter(deals: Vec<Deal>, min_price: Option<u64>, max_price: Option<u64>) -> Vec<Deal> {
    deals
        .into_iter()
        .filter(|deal| min_price.is_none_or(|min| deal.price >= min))
        .filter(|deal| max_price.is_none_or(|max| deal.price <= max))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(id: u64, price: u64) -> Deal {
        Deal {
            id,
            name: format!("Deal {id}"),
            city: "dubai".to_string(),
            area: "marina".to_string(),
            bedroom_count: 2,
            building_status: "ready".to_string(),
            price,
            estimated_value: None,
            size_sqft: None,
        }
    }

    #[test]
    fn deals_path_includes_only_present_filters() {
        let filters = DealFilters {
            city: Some("dubai".to_string()),
            ..DealFilters::default()
        };
        assert_eq!(deals_path(0, 20, &filters), "/api/deals?page=0&size=20&city=dubai");

        let all = DealFilters {
            city: Some("dubai".to_string()),
            area: Some("marina".to_string()),
            bedroom_count: Some(3),
            building_status: Some("offplan".to_string()),
        };
        assert_eq!(
            deals_path(2, 50, &all),
            "/api/deals?page=2&size=50&city=dubai&area=marina&bedroomCount=3&buildingStatus=offplan"
        );
    }

    #[test]
    fn deals_path_omits_empty_strings() {
        let filters = DealFilters {
            city: Some(String::new()),
            area: Some(String::new()),
            ..DealFilters::default()
        };
        assert_eq!(deals_path(0, 20, &filters), "/api/deals?page=0&size=20");
    }

    #[test]
    fn price_filter_applies_inclusive_bounds() {
        let deals = vec![deal(1, 500_000), deal(2, 1_000_000), deal(3, 2_000_000)];
        let filtered = apply_price_filter(deals.clone(), Some(1_000_000), Some(2_000_000));
        assert_eq!(
            filtered.iter().map(|deal| deal.id).collect::<Vec<_>>(),
            vec![2, 3]
        );

        let unbounded = apply_price_filter(deals, None, None);
        assert_eq!(unbounded.len(), 3);
    }
}
