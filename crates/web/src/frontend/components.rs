//! Shared view components.

use leptos::*;
use leptos_router::*;

use meditrack_auth::NavState;

use crate::frontend::context::use_auth;
use crate::views::{NavLink, nav_links};

/// Renders its children only once the session may see the current route.
///
/// Suspends while the session store has not hydrated; the redirect itself
/// is issued by the shell's route controller.
#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();

    move || {
        let snapshot = auth.snapshot();
        let state = NavState::resolve_path(&snapshot, &location.pathname.get());

        match state {
            NavState::AuthorizedRender => children().into_view(),
            NavState::Checking => view! { <Loading/> }.into_view(),
            NavState::NotFound => view! { <p class="not-found">"Page not found."</p> }.into_view(),
            _ => view! { <p class="redirecting">"Redirecting..."</p> }.into_view(),
        }
    }
}

#[component]
pub fn Loading() -> impl IntoView {
    view! { <p class="loading">"Loading..."</p> }
}

#[component]
pub fn ErrorBanner(#[prop(into)] message: String) -> impl IntoView {
    view! { <div class="error" role="alert">{message}</div> }
}

/// Inline form error, hidden while empty.
#[component]
pub fn FormError(error: RwSignal<Option<String>>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|message| view! { <ErrorBanner message=message/> })
    }
}

#[component]
pub fn LinkButton(link: NavLink) -> impl IntoView {
    view! {
        <A href=link.href() class="button">
            {link.label}
        </A>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let menu_open = create_rw_signal(false);

    let links = move || {
        nav_links(auth.role().as_ref())
            .into_iter()
            .map(|link| {
                view! {
                    <A href=link.href() class="nav-link">
                        {link.label}
                    </A>
                }
            })
            .collect_view()
    };

    view! {
        <nav class="navbar">
            <A href="/dashboard" class="brand">
                <span class="brand-name">"MediTrack"</span>
                <span class="brand-tagline">"Healthcare Equipment Management"</span>
            </A>

            <button
                class="menu-toggle"
                on:click=move |_| menu_open.update(|open| *open = !*open)
            >
                <span class="sr-only">"Open main menu"</span>
                "☰"
            </button>

            <div
                class="nav-links"
                class:open=move || menu_open.get()
                on:click=move |_| menu_open.set(false)
            >
                {links}
                <span class="nav-user">
                    {move || {
                        auth.username()
                            .zip(auth.role())
                            .map(|(name, role)| format!("{name} ({})", role.label()))
                    }}
                </span>
                <button class="nav-link logout" on:click=move |_| auth.logout()>
                    "Logout"
                </button>
            </div>
        </nav>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <p>"MediTrack - Healthcare Equipment Management"</p>
        </footer>
    }
}
