use leptos::*;
use leptos_router::*;

use meditrack_auth::AppRoute;
use meditrack_core::HospitalId;

use super::{field, use_id_param};
use crate::forms::{Form, HospitalForm, error_message};
use crate::frontend::components::{ErrorBanner, FormError, LinkButton, Loading};
use crate::frontend::context::{report, use_api, use_auth};
use crate::loaders;
use crate::views::create_action;

#[component]
pub fn HospitalIndexPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();

    let hospitals = create_local_resource(
        || (),
        move |_| {
            let client = client.clone();
            async move {
                loaders::hospitals(&client)
                    .await
                    .map_err(|err| report(auth, &err))
            }
        },
    );

    let create = move || {
        auth.role()
            .and_then(|role| create_action(&role, AppRoute::Hospitals))
            .map(|link| view! { <LinkButton link=link/> })
    };

    view! {
        <section class="index">
            <header class="index-header">
                <h1>"Hospitals"</h1>
                {create}
            </header>
            {move || match hospitals.get() {
                None => view! { <Loading/> }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message/> }.into_view(),
                Some(Ok(list)) if list.is_empty() => {
                    view! { <p class="empty">"No hospitals yet."</p> }.into_view()
                }
                Some(Ok(list)) => view! {
                    <table>
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|h| view! {
                                    <tr>
                                        <td>{h.name.clone()}</td>
                                        <td>
                                            <A href=AppRoute::EditHospital(h.id).path()>"Edit"</A>
                                        </td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_view(),
            }}
        </section>
    }
}

/// `/hospitals/new` and `/hospitals/:id`.
#[component]
pub fn HospitalFormPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();
    let navigate = use_navigate();
    let id = use_id_param::<HospitalId>();

    let form = create_rw_signal(HospitalForm::default());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let load_client = client.clone();
    let existing = create_local_resource(
        move || id.get(),
        move |id| {
            let client = load_client.clone();
            async move {
                match id {
                    Some(id) => loaders::hospital(&client, id)
                        .await
                        .map(Some)
                        .map_err(|err| report(auth, &err)),
                    None => Ok(None),
                }
            }
        },
    );
    create_effect(move |_| match existing.get() {
        Some(Ok(Some(hospital))) => form.set(HospitalForm::from(&hospital)),
        Some(Err(message)) => error.set(Some(message)),
        _ => {}
    });

    let (name, set_name) = field(form, |f| f.name.clone(), |f, v| f.name = v);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let draft = match form.with_untracked(|f| f.draft()) {
            Ok(draft) => draft,
            Err(err) => {
                error.set(Some(error_message(&err)));
                return;
            }
        };

        pending.set(true);
        let client = client.clone();
        let navigate = navigate.clone();
        let id = id.get_untracked();
        spawn_local(async move {
            let saved = match id {
                Some(id) => client.update_hospital(id, &draft, None).await,
                None => client.create_hospital(&draft, None).await,
            };
            pending.set(false);
            match saved {
                Ok(_) => navigate(&AppRoute::Hospitals.path(), Default::default()),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <section class="form-page">
            <h1>{move || if id.get().is_some() { "Edit Hospital" } else { "Add Hospital" }}</h1>
            <FormError error=error/>
            <form on:submit=on_submit>
                <label for="name">"Name"</label>
                <input id="name" type="text" required prop:value=name on:input=set_name/>

                <div class="form-actions">
                    <button type="submit" disabled=move || pending.get()>"Save"</button>
                    <A href="/hospitals">"Cancel"</A>
                </div>
            </form>
        </section>
    }
}
