use leptos::*;
use leptos_router::*;

use crate::frontend::context::use_auth;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <section class="home">
            <h1>"MediTrack"</h1>
            <p>"Track medical devices, maintenance work orders and spare parts across your hospitals."</p>
            {move || {
                if auth.snapshot().session.is_some() {
                    view! { <A href="/dashboard" class="button">"Go to dashboard"</A> }.into_view()
                } else {
                    view! {
                        <div class="actions">
                            <A href="/login" class="button">"Log in"</A>
                            <A href="/signup" class="button secondary">"Sign up"</A>
                        </div>
                    }
                    .into_view()
                }
            }}
        </section>
    }
}

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <section class="unauthorized">
            <h1>"Access denied"</h1>
            <p>"Your role does not have access to this page."</p>
            <A href="/dashboard">"Back to your dashboard"</A>
        </section>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Page not found"</h1>
            <A href="/">"Home"</A>
        </section>
    }
}
