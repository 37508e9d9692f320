use leptos::*;
use leptos_router::*;

use meditrack_auth::{AppRoute, Capability};
use meditrack_core::{DeviceId, DeviceStatus};

use super::{field, use_id_param};
use crate::forms::{DeviceForm, Form, error_message};
use crate::frontend::components::{ErrorBanner, FormError, LinkButton, Loading};
use crate::frontend::context::{report, use_api, use_auth};
use crate::loaders;
use crate::views::{create_action, device_badge};

/// Devices visible to the signed-in role.
#[component]
pub fn DeviceIndexPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();

    let devices = create_local_resource(
        move || auth.role(),
        move |role| {
            let client = client.clone();
            async move {
                match role {
                    Some(role) => loaders::devices(&client, &role)
                        .await
                        .map_err(|err| report(auth, &err)),
                    None => Ok(Vec::new()),
                }
            }
        },
    );

    let can_edit = move || {
        auth.role()
            .is_some_and(|role| role.can(Capability::ManageFacilities))
    };
    let create = move || {
        auth.role()
            .and_then(|role| create_action(&role, AppRoute::Devices))
            .map(|link| view! { <LinkButton link=link/> })
    };

    view! {
        <section class="index">
            <header class="index-header">
                <h1>"Devices"</h1>
                {create}
            </header>
            {move || match devices.get() {
                None => view! { <Loading/> }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message/> }.into_view(),
                Some(Ok(list)) if list.is_empty() => {
                    view! { <p class="empty">"No devices to show."</p> }.into_view()
                }
                Some(Ok(list)) => view! {
                    <table>
                        <thead>
                            <tr>
                                <th>"Asset"</th>
                                <th>"Equipment"</th>
                                <th>"Model"</th>
                                <th>"Status"</th>
                                <th>"Room"</th>
                                <th>"Engineer"</th>
                                <th>"Nurses"</th>
                                <th>"Last inventory"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|d| {
                                    let edit = AppRoute::EditDevice(d.id).path();
                                    view! {
                                        <tr>
                                            <td>{d.asset_number.clone()}</td>
                                            <td>{d.equipment_name.clone()}</td>
                                            <td>{d.model.clone()}</td>
                                            <td>
                                                <span class=device_badge(d.status)>{d.status.label()}</span>
                                            </td>
                                            <td>{d.room_display.clone().unwrap_or_default()}</td>
                                            <td>{d.assigned_engineer_display.clone().unwrap_or_default()}</td>
                                            <td>{d.assigned_nurses_display.join(", ")}</td>
                                            <td>
                                                {d.last_inventory_date
                                                    .map(|date| date.format("%Y-%m-%d").to_string())
                                                    .unwrap_or_default()}
                                            </td>
                                            <td>
                                                <Show when=can_edit>
                                                    <A href=edit.clone()>"Edit"</A>
                                                </Show>
                                            </td>
                                        </tr>
                                    }
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

/// `/devices/new` and `/devices/:id`.
#[component]
pub fn DeviceFormPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();
    let navigate = use_navigate();
    let id = use_id_param::<DeviceId>();

    let form = create_rw_signal(DeviceForm::default());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let load_client = client.clone();
    let options = create_local_resource(
        move || id.get(),
        move |id| {
            let client = load_client.clone();
            async move {
                loaders::device_form(&client, id)
                    .await
                    .map_err(|err| report(auth, &err))
            }
        },
    );
    create_effect(move |_| match options.get() {
        Some(Ok(data)) => {
            if let Some(device) = &data.device {
                form.set(DeviceForm::from(device));
            }
        }
        Some(Err(message)) => error.set(Some(message)),
        None => {}
    });

    let (asset_number, set_asset_number) =
        field(form, |f| f.asset_number.clone(), |f, v| f.asset_number = v);
    let (serial_number, set_serial_number) =
        field(form, |f| f.serial_number.clone(), |f, v| f.serial_number = v);
    let (equipment_name, set_equipment_name) =
        field(form, |f| f.equipment_name.clone(), |f, v| f.equipment_name = v);
    let (model, set_model) = field(form, |f| f.model.clone(), |f, v| f.model = v);
    let (manufacturer, set_manufacturer) =
        field(form, |f| f.manufacturer.clone(), |f, v| f.manufacturer = v);
    let (status, set_status) = field(form, |f| f.status.clone(), |f, v| f.status = v);
    let (room, set_room) = field(form, |f| f.room.clone(), |f, v| f.room = v);
    let (engineer, set_engineer) = field(
        form,
        |f| f.assigned_engineer.clone(),
        |f, v| f.assigned_engineer = v,
    );
    let (inventory_date, set_inventory_date) = field(
        form,
        |f| f.last_inventory_date.clone(),
        |f, v| f.last_inventory_date = v,
    );

    let loaded = move || options.get().and_then(Result::ok);

    let room_options = move || {
        loaded().map(|data| {
            data.rooms
                .into_iter()
                .map(|r| {
                    let value = r.id.to_string();
                    let selected = value.clone();
                    view! {
                        <option value=value prop:selected=move || room() == selected>
                            {r.label()}
                        </option>
                    }
                })
                .collect_view()
        })
    };

    let engineer_options = move || {
        loaded().map(|data| {
            data.engineers
                .into_iter()
                .map(|e| {
                    let value = e.id.to_string();
                    let selected = value.clone();
                    view! {
                        <option value=value prop:selected=move || engineer() == selected>
                            {e.username.clone()}
                        </option>
                    }
                })
                .collect_view()
        })
    };

    let nurse_checkboxes = move || {
        loaded().map(|data| {
            data.nurses
                .into_iter()
                .map(|n| {
                    let value = n.id.to_string();
                    let checked = value.clone();
                    let toggled = value.clone();
                    view! {
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                value=value
                                prop:checked=move || {
                                    form.with(|f| f.assigned_nurses.contains(&checked))
                                }
                                on:change=move |_| form.update(|f| f.toggle_nurse(&toggled))
                            />
                            {n.username.clone()}
                        </label>
                    }
                })
                .collect_view()
        })
    };

    let status_options = move || {
        DeviceStatus::ALL
            .into_iter()
            .map(|s| {
                view! {
                    <option value=s.as_str() prop:selected=move || status() == s.as_str()>
                        {s.label()}
                    </option>
                }
            })
            .collect_view()
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
                Some(id) => client.update_device(id, &draft, None).await,
                None => client.create_device(&draft, None).await,
            };
            pending.set(false);
            match saved {
                Ok(_) => navigate(&AppRoute::Devices.path(), Default::default()),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <section class="form-page">
            <h1>{move || if id.get().is_some() { "Edit Device" } else { "Add Device" }}</h1>
            <FormError error=error/>
            <form on:submit=on_submit>
                <label for="asset_number">"Asset number"</label>
                <input id="asset_number" type="text" required prop:value=asset_number on:input=set_asset_number/>

                <label for="serial_number">"Serial number"</label>
                <input id="serial_number" type="text" required prop:value=serial_number on:input=set_serial_number/>

                <label for="equipment_name">"Equipment name"</label>
                <input id="equipment_name" type="text" required prop:value=equipment_name on:input=set_equipment_name/>

                <label for="model">"Model"</label>
                <input id="model" type="text" prop:value=model on:input=set_model/>

                <label for="manufacturer">"Manufacturer"</label>
                <input id="manufacturer" type="text" prop:value=manufacturer on:input=set_manufacturer/>

                <label for="status">"Status"</label>
                <select id="status" on:change=set_status>{status_options}</select>

                <label for="room">"Room"</label>
                <select id="room" on:change=set_room>
                    <option value="">"No room"</option>
                    {room_options}
                </select>

                <label for="engineer">"Assigned engineer"</label>
                <select id="engineer" on:change=set_engineer>
                    <option value="">"Unassigned"</option>
                    {engineer_options}
                </select>

                <fieldset>
                    <legend>"Assigned nurses"</legend>
                    {nurse_checkboxes}
                </fieldset>

                <label for="last_inventory_date">"Last inventory date"</label>
                <input
                    id="last_inventory_date"
                    type="date"
                    prop:value=inventory_date
                    on:input=set_inventory_date
                />

                <div class="form-actions">
                    <button type="submit" disabled=move || pending.get()>"Save"</button>
                    <A href="/devices">"Cancel"</A>
                </div>
            </form>
        </section>
    }
}
