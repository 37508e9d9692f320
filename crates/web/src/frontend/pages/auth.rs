//! Login and signup.

use leptos::*;
use leptos_router::*;
use tracing::warn;

use meditrack_auth::{Role, dashboard_for};

use super::field;
use crate::forms::{Form, LoginForm, SignupForm, error_message};
use crate::frontend::components::FormError;
use crate::frontend::context::{use_api, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();
    let navigate = use_navigate();

    let form = create_rw_signal(LoginForm::default());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let (username, set_username) = field(form, |f| f.username.clone(), |f, v| f.username = v);
    let (password, set_password) = field(form, |f| f.password.clone(), |f, v| f.password = v);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let credentials = match form.with_untracked(|f| f.draft()) {
            Ok(credentials) => credentials,
            Err(err) => {
                error.set(Some(error_message(&err)));
                return;
            }
        };

        pending.set(true);
        error.set(None);
        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = match client.login(&credentials).await {
                Ok(response) if !response.user_type.is_known() => {
                    Err("Unknown user type.".to_string())
                }
                Ok(response) => auth
                    .login(response)
                    .map(|session| dashboard_for(Some(&session)))
                    .map_err(|err| err.to_string()),
                Err(err) => {
                    warn!(error = %err, "login failed");
                    Err("Login failed. Check your credentials.".to_string())
                }
            };
            pending.set(false);
            match outcome {
                Ok(target) => navigate(&target.path(), Default::default()),
                Err(message) => error.set(Some(message)),
            }
        });
    };

    view! {
        <section class="auth-card">
            <h1>"Log in to MediTrack"</h1>
            <FormError error=error/>
            <form on:submit=on_submit>
                <label for="username">"Username"</label>
                <input id="username" type="text" required prop:value=username on:input=set_username/>

                <label for="password">"Password"</label>
                <input id="password" type="password" required prop:value=password on:input=set_password/>

                <button type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Logging in..." } else { "Log in" }}
                </button>
            </form>
            <p>
                "No account yet? "
                <A href="/signup">"Sign up"</A>
            </p>
        </section>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let client = use_api();
    let navigate = use_navigate();

    let form = create_rw_signal(SignupForm::default());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let (username, set_username) = field(form, |f| f.username.clone(), |f, v| f.username = v);
    let (email, set_email) = field(form, |f| f.email.clone(), |f, v| f.email = v);
    let (password, set_password) = field(form, |f| f.password.clone(), |f, v| f.password = v);
    let (role, set_role) = field(form, |f| f.role.clone(), |f, v| f.role = v);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let request = match form.with_untracked(|f| f.draft()) {
            Ok(request) => request,
            Err(err) => {
                error.set(Some(error_message(&err)));
                return;
            }
        };

        pending.set(true);
        error.set(None);
        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = client.signup(&request).await;
            pending.set(false);
            match result {
                Ok(_) => navigate("/login", Default::default()),
                Err(err) => {
                    warn!(error = %err, "signup failed");
                    error.set(Some(format!("Signup failed. {err}")));
                }
            }
        });
    };

    view! {
        <section class="auth-card">
            <h1>"Create an account"</h1>
            <FormError error=error/>
            <form on:submit=on_submit>
                <label for="username">"Username"</label>
                <input id="username" type="text" required prop:value=username on:input=set_username/>

                <label for="email">"Email"</label>
                <input id="email" type="email" required prop:value=email on:input=set_email/>

                <label for="password">"Password"</label>
                <input id="password" type="password" required prop:value=password on:input=set_password/>

                <label for="role">"Role"</label>
                <select id="role" prop:value=role on:change=set_role>
                    {Role::KNOWN
                        .into_iter()
                        .map(|r| view! { <option value=r.as_str().to_string()>{r.label().to_string()}</option> })
                        .collect_view()}
                </select>

                <button type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing up..." } else { "Sign up" }}
                </button>
            </form>
            <p>
                "Already registered? "
                <A href="/login">"Log in"</A>
            </p>
        </section>
    }
}
