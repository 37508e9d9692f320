use leptos::*;
use leptos_router::*;

use meditrack_auth::AppRoute;
use meditrack_core::RoomId;

use super::{field, use_id_param};
use crate::forms::{Form, RoomForm, error_message};
use crate::frontend::components::{ErrorBanner, FormError, LinkButton, Loading};
use crate::frontend::context::{report, use_api, use_auth};
use crate::loaders;
use crate::views::create_action;

#[component]
pub fn RoomIndexPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();

    let rooms = create_local_resource(
        || (),
        move |_| {
            let client = client.clone();
            async move { loaders::rooms(&client).await.map_err(|err| report(auth, &err)) }
        },
    );

    let create = move || {
        auth.role()
            .and_then(|role| create_action(&role, AppRoute::Rooms))
            .map(|link| view! { <LinkButton link=link/> })
    };

    view! {
        <section class="index">
            <header class="index-header">
                <h1>"Rooms"</h1>
                {create}
            </header>
            {move || match rooms.get() {
                None => view! { <Loading/> }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message/> }.into_view(),
                Some(Ok(list)) if list.is_empty() => {
                    view! { <p class="empty">"No rooms yet."</p> }.into_view()
                }
                Some(Ok(list)) => view! {
                    <table>
                        <thead>
                            <tr>
                                <th>"Room"</th>
                                <th>"Hospital"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|room| view! {
                                    <tr>
                                        <td>{room.room_number.clone()}</td>
                                        <td>{room.hospital_name.clone().unwrap_or_else(|| room.hospital.to_string())}</td>
                                        <td>
                                            <A href=AppRoute::EditRoom(room.id).path()>"Edit"</A>
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

/// `/rooms/new` and `/rooms/:id`.
#[component]
pub fn RoomFormPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();
    let navigate = use_navigate();
    let id = use_id_param::<RoomId>();

    let form = create_rw_signal(RoomForm::default());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let load_client = client.clone();
    let options = create_local_resource(
        move || id.get(),
        move |id| {
            let client = load_client.clone();
            async move {
                loaders::room_form(&client, id)
                    .await
                    .map_err(|err| report(auth, &err))
            }
        },
    );
    create_effect(move |_| match options.get() {
        Some(Ok(data)) => {
            if let Some(room) = &data.room {
                form.set(RoomForm::from(room));
            }
        }
        Some(Err(message)) => error.set(Some(message)),
        None => {}
    });

    let (room_number, set_room_number) =
        field(form, |f| f.room_number.clone(), |f, v| f.room_number = v);
    let (hospital, set_hospital) = field(form, |f| f.hospital.clone(), |f, v| f.hospital = v);

    let hospital_options = move || {
        options
            .get()
            .and_then(Result::ok)
            .map(|data| {
                data.hospitals
                    .into_iter()
                    .map(|h| {
                        let value = h.id.to_string();
                        let selected = value.clone();
                        view! {
                            <option value=value prop:selected=move || hospital() == selected>
                                {h.name.clone()}
                            </option>
                        }
                    })
                    .collect_view()
            })
    };

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
                Some(id) => client.update_room(id, &draft, None).await,
                None => client.create_room(&draft, None).await,
            };
            pending.set(false);
            match saved {
                Ok(_) => navigate(&AppRoute::Rooms.path(), Default::default()),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <section class="form-page">
            <h1>{move || if id.get().is_some() { "Edit Room" } else { "Add Room" }}</h1>
            <FormError error=error/>
            <form on:submit=on_submit>
                <label for="room_number">"Room number"</label>
                <input
                    id="room_number"
                    type="text"
                    required
                    prop:value=room_number
                    on:input=set_room_number
                />

                <label for="hospital">"Hospital"</label>
                <select id="hospital" required on:change=set_hospital>
                    <option value="">"Select a hospital"</option>
                    {hospital_options}
                </select>

                <div class="form-actions">
                    <button type="submit" disabled=move || pending.get()>"Save"</button>
                    <A href="/rooms">"Cancel"</A>
                </div>
            </form>
        </section>
    }
}
