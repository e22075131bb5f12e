//! Auth gate: the login page until a session exists, the requisitions page afterwards.

use crate::domain::a003_item_request::ui::RequisitionsPage;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
fn MainLayout() -> impl IntoView {
    let auth_state = use_auth();

    let user_label = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| match &u.office {
                    Some(office) => format!("{} ({})", u.display_name(), office.name),
                    None => u.display_name().to_string(),
                })
                .unwrap_or_default()
        })
    };

    view! {
        <header class="top-header">
            <span class="top-header__user">{user_label}</span>
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| spawn_local(do_logout(auth_state))
            >
                "Sign out"
            </Button>
        </header>
        <main class="main-content">
            <RequisitionsPage />
        </main>
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let auth_state = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
