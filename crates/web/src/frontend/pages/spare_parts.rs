use leptos::*;
use leptos_router::*;

use meditrack_auth::AppRoute;
use meditrack_core::{SparePartId, SparePartRequest};

use super::{field, use_id_param};
use crate::forms::{Form, SparePartForm, error_message};
use crate::frontend::components::{ErrorBanner, FormError, LinkButton, Loading};
use crate::frontend::context::{report, use_api, use_auth};
use crate::loaders;
use crate::views::{SparePartActions, create_action, device_options, spare_part_badge};

#[component]
pub fn SparePartIndexPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();

    let requests = create_local_resource(
        || (),
        move |_| {
            let client = client.clone();
            async move {
                loaders::spare_parts(&client)
                    .await
                    .map_err(|err| report(auth, &err))
            }
        },
    );

    let create = move || {
        auth.role()
            .and_then(|role| create_action(&role, AppRoute::SpareParts))
            .map(|link| view! { <LinkButton link=link/> })
    };

    view! {
        <section class="index">
            <header class="index-header">
                <h1>"Spare Part Requests"</h1>
                {create}
            </header>
            {move || match requests.get() {
                None => view! { <Loading/> }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message/> }.into_view(),
                Some(Ok(list)) if list.is_empty() => {
                    view! { <p class="empty">"No spare part requests."</p> }.into_view()
                }
                Some(Ok(list)) => view! {
                    <table>
                        <thead>
                            <tr>
                                <th>"Request"</th>
                                <th>"Device"</th>
                                <th>"Quantity"</th>
                                <th>"Status"</th>
                                <th>"Requested by"</th>
                                <th>"Date"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|r| view! {
                                    <tr>
                                        <td>{r.request_number.clone()}</td>
                                        <td>{r.device_display.clone()}</td>
                                        <td>{r.quantity}</td>
                                        <td>
                                            <span class=spare_part_badge(r.status)>{r.status.as_str()}</span>
                                        </td>
                                        <td>{r.requested_by_display.clone()}</td>
                                        <td>{r.request_date.clone()}</td>
                                        <td>
                                            <A href=AppRoute::SparePartDetail(r.id).path()>"View"</A>
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

/// `/spareparts/new`: an engineer requests parts for an assigned device.
#[component]
pub fn SparePartFormPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();
    let navigate = use_navigate();

    let form = create_rw_signal(SparePartForm::default());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let load_client = client.clone();
    let devices = create_local_resource(
        move || auth.role(),
        move |role| {
            let client = load_client.clone();
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
    create_effect(move |_| {
        if let Some(Err(message)) = devices.get() {
            error.set(Some(message));
        }
    });

    let (device, set_device) = field(form, |f| f.device.clone(), |f, v| f.device = v);
    let (description, set_description) =
        field(form, |f| f.description.clone(), |f, v| f.description = v);
    let (quantity, set_quantity) = field(form, |f| f.quantity.clone(), |f, v| f.quantity = v);

    let device_choices = move || {
        devices.get().and_then(Result::ok).map(|list| {
            device_options(&list)
                .into_iter()
                .map(|(value, label)| {
                    let selected = value.clone();
                    view! {
                        <option value=value prop:selected=move || device() == selected>
                            {label}
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
        error.set(None);
        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let created = client.create_spare_part(&draft, None).await;
            pending.set(false);
            match created {
                Ok(_) => navigate(&AppRoute::SpareParts.path(), Default::default()),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <section class="form-page">
            <h1>"Request Spare Parts"</h1>
            <FormError error=error/>
            <form on:submit=on_submit>
                <label for="device">"Device"</label>
                <select id="device" required on:change=set_device>
                    <option value="">"Select a device"</option>
                    {device_choices}
                </select>

                <label for="quantity">"Quantity"</label>
                <input
                    id="quantity"
                    type="number"
                    min="1"
                    required
                    prop:value=quantity
                    on:input=set_quantity
                />

                <label for="description">"Parts needed"</label>
                <textarea
                    id="description"
                    required
                    rows="4"
                    prop:value=description
                    on:input=set_description
                ></textarea>

                <div class="form-actions">
                    <button type="submit" disabled=move || pending.get()>"Submit Request"</button>
                    <A href="/spareparts">"Cancel"</A>
                </div>
            </form>
        </section>
    }
}

/// Review outcome picked on the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Review {
    Approve,
    Reject,
}

#[component]
pub fn SparePartDetailPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();
    let navigate = use_navigate();
    let id = use_id_param::<SparePartId>();

    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let load_client = client.clone();
    let request = create_local_resource(
        move || id.get(),
        move |id| {
            let client = load_client.clone();
            async move {
                let id = id.ok_or_else(|| "Spare part request not found.".to_string())?;
                loaders::spare_part(&client, id)
                    .await
                    .map_err(|err| report(auth, &err))
            }
        },
    );

    let review = move |request_id: SparePartId, decision: Review| {
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        error.set(None);
        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let reviewed = match decision {
                Review::Approve => client.approve_spare_part(request_id, None).await,
                Review::Reject => client.reject_spare_part(request_id, None).await,
            };
            pending.set(false);
            match reviewed {
                Ok(_) => navigate(&AppRoute::SpareParts.path(), Default::default()),
                Err(err) => error.set(Some(format!("Could not update request. {err}"))),
            }
        });
    };

    let details = move |r: SparePartRequest| {
        let actions = auth
            .role()
            .map(|role| SparePartActions::for_role(&role, &r))
            .unwrap_or_default();
        let approve = review.clone();
        let reject = review.clone();
        let request_id = r.id;

        view! {
            <article class="detail">
                <header class="detail-header">
                    <h1>{format!("Spare Part Request {}", r.request_number)}</h1>
                    <span class=spare_part_badge(r.status)>{r.status.as_str()}</span>
                </header>
                <dl>
                    <dt>"Device"</dt>
                    <dd>{r.device_display.clone()}</dd>
                    <dt>"Quantity"</dt>
                    <dd>{r.quantity}</dd>
                    <dt>"Parts needed"</dt>
                    <dd>{r.description.clone()}</dd>
                    <dt>"Requested by"</dt>
                    <dd>{r.requested_by_display.clone()}</dd>
                    <dt>"Date"</dt>
                    <dd>{r.request_date.clone()}</dd>
                </dl>
                <div class="detail-actions">
                    <Show when=move || actions.approve>
                        {
                            let approve = approve.clone();
                            view! {
                                <button
                                    class="btn btn-primary"
                                    disabled=move || pending.get()
                                    on:click=move |_| approve(request_id, Review::Approve)
                                >
                                    "Approve"
                                </button>
                            }
                        }
                    </Show>
                    <Show when=move || actions.reject>
                        {
                            let reject = reject.clone();
                            view! {
                                <button
                                    class="btn btn-danger"
                                    disabled=move || pending.get()
                                    on:click=move |_| reject(request_id, Review::Reject)
                                >
                                    "Reject"
                                </button>
                            }
                        }
                    </Show>
                    <A href="/spareparts">"Back to requests"</A>
                </div>
            </article>
        }
    };

    view! {
        <section class="detail-page">
            <FormError error=error/>
            {move || match request.get() {
                None => view! { <Loading/> }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message/> }.into_view(),
                Some(Ok(r)) => details(r).into_view(),
            }}
        </section>
    }
}
