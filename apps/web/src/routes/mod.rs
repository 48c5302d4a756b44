mod account;
mod analysis_request;
mod dashboard;
mod deal_detail;
mod deals;
mod health;
mod home;
mod login;
mod not_found;
mod reset_password;
mod signup;

pub(crate) use account::AccountPage;
pub(crate) use analysis_request::AnalysisRequestPage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use deal_detail::DealDetailPage;
pub(crate) use deals::DealsPage;
pub(crate) use health::HealthPage;
pub(crate) use home::HomePage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use reset_password::ResetPasswordPage;
pub(crate) use signup::SignupPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

/// Route paths, centralized so navigation targets never drift.
pub(crate) mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const RESET_PASSWORD: &str = "/reset-password";
    pub const DASHBOARD: &str = "/dashboard";
    pub const DEALS: &str = "/deals";
    pub const ANALYSIS: &str = "/analysis";
    pub const ACCOUNT: &str = "/account";
    pub const HEALTH: &str = "/health";
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=HomePage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/signup") view=SignupPage />
            <Route path=path!("/reset-password") view=ResetPasswordPage />
            <Route path=path!("/dashboard") view=DashboardPage />
            <Route path=path!("/deals") view=DealsPage />
            <Route path=path!("/deals/:id") view=DealDetailPage />
            <Route path=path!("/analysis") view=AnalysisRequestPage />
            <Route path=path!("/account") view=AccountPage />
            <Route path=path!("/health") view=HealthPage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
