use leptos::*;
use leptos_router::*;

use meditrack_auth::{AppRoute, Role};
use meditrack_core::{WorkOrder, WorkOrderId, WorkType};

use super::{field, use_id_param};
use crate::forms::{Form, WorkOrderForm, error_message};
use crate::frontend::components::{ErrorBanner, FormError, LinkButton, Loading};
use crate::frontend::context::{AuthContext, report, use_api, use_auth};
use crate::loaders;
use crate::views::{
    ReportFilter, WorkOrderActions, create_action, device_options, open_orders, own_reports,
    work_order_access, work_order_badge,
};

/// Work orders for the signed-in role, reloaded when the role changes.
fn role_work_orders(auth: AuthContext) -> Resource<Option<Role>, Result<Vec<WorkOrder>, String>> {
    let client = use_api();
    create_local_resource(
        move || auth.role(),
        move |role| {
            let client = client.clone();
            async move {
                match role {
                    Some(role) => loaders::work_orders(&client, &role)
                        .await
                        .map_err(|err| report(auth, &err)),
                    None => Ok(Vec::new()),
                }
            }
        },
    )
}

#[component]
fn WorkOrderTable(orders: Vec<WorkOrder>, #[prop(into)] empty: String) -> impl IntoView {
    if orders.is_empty() {
        return view! { <p class="empty">{empty}</p> }.into_view();
    }

    view! {
        <table>
            <thead>
                <tr>
                    <th>"Number"</th>
                    <th>"Device"</th>
                    <th>"Type"</th>
                    <th>"Status"</th>
                    <th>"Reported"</th>
                    <th>"Reported by"</th>
                    <th>"Assigned to"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {orders
                    .into_iter()
                    .map(|o| view! {
                        <tr>
                            <td>{o.work_number.clone()}</td>
                            <td>{o.device_display.clone()}</td>
                            <td>{o.work_type.as_str()}</td>
                            <td>
                                <span class=work_order_badge(o.status)>{o.status.label()}</span>
                            </td>
                            <td>{o.reported_date.clone()}</td>
                            <td>{o.created_by_display.clone()}</td>
                            <td>{o.assigned_to_display.clone().unwrap_or_else(|| "Unassigned".to_string())}</td>
                            <td>
                                <A href=AppRoute::WorkOrderDetail(o.id).path()>"View"</A>
                            </td>
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

#[component]
pub fn WorkOrderIndexPage() -> impl IntoView {
    let auth = use_auth();
    let orders = role_work_orders(auth);

    let create = move || {
        auth.role()
            .and_then(|role| create_action(&role, AppRoute::WorkOrders))
            .map(|link| view! { <LinkButton link=link/> })
    };

    view! {
        <section class="index">
            <header class="index-header">
                <h1>"Work Orders"</h1>
                {create}
            </header>
            {move || match orders.get() {
                None => view! { <Loading/> }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message/> }.into_view(),
                Some(Ok(list)) => {
                    view! { <WorkOrderTable orders=list empty="No work orders found."/> }.into_view()
                }
            }}
        </section>
    }
}

/// Orders an engineer could still pick up.
#[component]
pub fn EngineerOpenWorkOrdersPage() -> impl IntoView {
    let auth = use_auth();
    let orders = role_work_orders(auth);

    view! {
        <section class="index">
            <h1>"Open Work Orders"</h1>
            {move || match orders.get() {
                None => view! { <Loading/> }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message/> }.into_view(),
                Some(Ok(list)) => view! {
                    <WorkOrderTable orders=open_orders(&list) empty="No open work orders."/>
                }
                .into_view(),
            }}
        </section>
    }
}

/// A nurse's own reports, open or closed.
#[component]
pub fn NurseReportsPage(filter: ReportFilter) -> impl IntoView {
    let auth = use_auth();
    let orders = role_work_orders(auth);

    let (title, empty) = match filter {
        ReportFilter::Open => ("My Open Work Orders", "You have no open work orders."),
        ReportFilter::Closed => ("My Closed Work Orders", "You have no closed work orders."),
    };

    view! {
        <section class="index">
            <header class="index-header">
                <h1>{title}</h1>
                <A href=AppRoute::NewWorkOrder.path()>"Report a Fault"</A>
            </header>
            {move || match (orders.get(), auth.session()) {
                (None, _) => view! { <Loading/> }.into_view(),
                (Some(Err(message)), _) => view! { <ErrorBanner message=message/> }.into_view(),
                (Some(Ok(_)), None) => view! { <Loading/> }.into_view(),
                (Some(Ok(list)), Some(session)) => view! {
                    <WorkOrderTable orders=own_reports(&list, &session, filter) empty=empty/>
                }
                .into_view(),
            }}
        </section>
    }
}

/// `/workorders/new`: a nurse reports a fault on one of their devices.
#[component]
pub fn WorkOrderFormPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();
    let navigate = use_navigate();

    let form = create_rw_signal(WorkOrderForm::default());
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
    let (work_type, set_work_type) = field(form, |f| f.work_type.clone(), |f, v| f.work_type = v);

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

    let work_type_choices = move || {
        WorkType::ALL
            .into_iter()
            .map(|t| {
                view! {
                    <option value=t.as_str() prop:selected=move || work_type() == t.as_str()>
                        {t.label()}
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
        error.set(None);
        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let created = client.create_work_order(&draft, None).await;
            pending.set(false);
            match created {
                Ok(order) => {
                    tracing::info!(work_number = %order.work_number, "work order reported");
                    navigate(&AppRoute::WorkOrders.path(), Default::default());
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <section class="form-page">
            <h1>"Report a Fault"</h1>
            <FormError error=error/>
            <form on:submit=on_submit>
                <label for="device">"Device"</label>
                <select id="device" required on:change=set_device>
                    <option value="">"Select a device"</option>
                    {device_choices}
                </select>

                <label for="work_type">"Work type"</label>
                <select id="work_type" on:change=set_work_type>{work_type_choices}</select>

                <label for="description">"Description"</label>
                <textarea
                    id="description"
                    required
                    rows="4"
                    prop:value=description
                    on:input=set_description
                ></textarea>

                <div class="form-actions">
                    <button type="submit" disabled=move || pending.get()>
                        {move || if pending.get() { "Submitting..." } else { "Submit" }}
                    </button>
                    <A href="/workorders">"Cancel"</A>
                </div>
            </form>
        </section>
    }
}

#[component]
pub fn WorkOrderDetailPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();
    let navigate = use_navigate();
    let id = use_id_param::<WorkOrderId>();

    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let load_client = client.clone();
    let order = create_local_resource(
        move || id.get(),
        move |id| {
            let client = load_client.clone();
            async move {
                let id = id.ok_or_else(|| "Work order not found.".to_string())?;
                loaders::work_order(&client, id)
                    .await
                    .map_err(|err| report(auth, &err))
            }
        },
    );

    let close = move |order_id: WorkOrderId| {
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        error.set(None);
        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let closed = client.close_work_order(order_id, None).await;
            pending.set(false);
            match closed {
                Ok(_) => navigate(&AppRoute::WorkOrders.path(), Default::default()),
                Err(err) => error.set(Some(format!("Could not close work order. {err}"))),
            }
        });
    };

    let details = move |o: WorkOrder| {
        let actions = auth
            .role()
            .map(|role| WorkOrderActions::for_role(&role, &o))
            .unwrap_or_default();
        let close = close.clone();
        let order_id = o.id;

        view! {
            <article class="detail">
                <header class="detail-header">
                    <h1>{format!("Work Order {}", o.work_number)}</h1>
                    <span class=work_order_badge(o.status)>{o.status.label()}</span>
                </header>
                <dl>
                    <dt>"Device"</dt>
                    <dd>{o.device_display.clone()}</dd>
                    <dt>"Work type"</dt>
                    <dd>{o.work_type.label()}</dd>
                    <dt>"Description"</dt>
                    <dd>{o.description.clone()}</dd>
                    <dt>"Reported"</dt>
                    <dd>{o.reported_date.clone()}</dd>
                    <dt>"Reported by"</dt>
                    <dd>{o.created_by_display.clone()}</dd>
                    <dt>"Assigned to"</dt>
                    <dd>{o.assigned_to_display.clone().unwrap_or_else(|| "Unassigned".to_string())}</dd>
                    <dt>"Completed"</dt>
                    <dd>{o.completed_date.clone().unwrap_or_else(|| "-".to_string())}</dd>
                </dl>
                <div class="detail-actions">
                    <Show when=move || actions.close>
                        {
                            let close = close.clone();
                            view! {
                                <button
                                    class="btn btn-primary"
                                    disabled=move || pending.get()
                                    on:click=move |_| close(order_id)
                                >
                                    {move || if pending.get() { "Closing..." } else { "Close Work Order" }}
                                </button>
                            }
                        }
                    </Show>
                    <A href="/workorders">"Back to work orders"</A>
                </div>
            </article>
        }
    };

    view! {
        <section class="detail-page">
            <FormError error=error/>
            {move || match (order.get(), auth.session()) {
                (None, _) | (Some(Ok(_)), None) => view! { <Loading/> }.into_view(),
                (Some(Err(message)), _) => view! { <ErrorBanner message=message/> }.into_view(),
                (Some(Ok(o)), Some(session)) => match work_order_access(&session, &o) {
                    Ok(()) => details(o).into_view(),
                    Err(message) => view! { <ErrorBanner message=message/> }.into_view(),
                },
            }}
        </section>
    }
}
