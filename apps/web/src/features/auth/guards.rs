use crate::features::auth::state::use_auth;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn RequireAuth(children: Children) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        // Wait out hydration so a slow cookie check does not bounce the user.
        if !auth.is_loading.get() && !auth.is_authenticated.get() {
            // UX-only guard; real access control must live on the API.
            navigate(paths::LOGIN, Default::default());
        }
    });

    view! { {children()} }
}
