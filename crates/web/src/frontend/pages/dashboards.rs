//! Role dashboards and the `/dashboard` entry point.

use leptos::*;

use crate::frontend::components::{ErrorBanner, LinkButton, Loading};
use crate::frontend::context::{report, use_api, use_auth};
use crate::loaders::{self, DashboardData};
use crate::views::quick_links;

/// `/dashboard`: the shell's route controller forwards to the role's own
/// dashboard, this only covers the moment in between.
#[component]
pub fn DashboardRedirect() -> impl IntoView {
    view! { <p class="loading">"Opening your dashboard..."</p> }
}

#[component]
fn StatCard(title: &'static str, value: String, #[prop(optional)] note: &'static str) -> impl IntoView {
    view! {
        <div class="stat-card">
            <h2>{title}</h2>
            <p class="stat-value">{value}</p>
            <p class="stat-note">{note}</p>
        </div>
    }
}

/// Dashboard of the signed-in role.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api();

    let data = create_local_resource(
        move || auth.role(),
        move |role| {
            let client = client.clone();
            async move {
                let role = role.ok_or_else(|| "Not signed in.".to_string())?;
                loaders::dashboard(&client, &role)
                    .await
                    .map_err(|err| report(auth, &err))
            }
        },
    );

    let links = move || {
        auth.role()
            .map(|role| {
                quick_links(&role)
                    .into_iter()
                    .map(|link| view! { <LinkButton link=link/> })
                    .collect_view()
            })
    };

    let welcome = move || {
        format!(
            "Welcome, {}",
            auth.username().unwrap_or_else(|| "there".to_string())
        )
    };

    view! {
        <section class="dashboard">
            <h1>{welcome}</h1>
            {move || match data.get() {
                None => view! { <Loading/> }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message/> }.into_view(),
                Some(Ok(DashboardData::Admin(overview))) => view! {
                    <p class="subtitle">"Here's an overview of your medical device system."</p>
                    <div class="stats">
                        <StatCard title="Devices" value=overview.devices.to_string()/>
                        <StatCard title="Work Orders" value=overview.work_orders.to_string()/>
                        <StatCard title="Spare Requests" value=overview.spare_parts.to_string()/>
                    </div>
                }
                .into_view(),
                Some(Ok(DashboardData::Engineer(figures))) => view! {
                    <p class="subtitle">"Engineer Dashboard"</p>
                    <div class="stats">
                        <StatCard
                            title="Assigned Devices"
                            value=figures.assigned_devices.to_string()
                            note="Medical devices under your care"
                        />
                        <StatCard
                            title="My Work Orders"
                            value=figures.my_work_orders.to_string()
                            note="Work orders assigned to you"
                        />
                        <StatCard
                            title="Open Work Orders"
                            value=figures.open_work_orders.to_string()
                            note="Pending maintenance requests"
                        />
                    </div>
                }
                .into_view(),
                Some(Ok(DashboardData::Nurse(figures))) => view! {
                    <p class="subtitle">"Nurse Dashboard"</p>
                    <div class="stats">
                        <StatCard title="Total Work Orders" value=figures.total_work_orders.to_string()/>
                        <StatCard title="Open" value=figures.open.to_string()/>
                        <StatCard title="In Progress" value=figures.in_progress.to_string()/>
                        <StatCard title="Closed" value=figures.closed.to_string()/>
                    </div>
                }
                .into_view(),
            }}
            <div class="quick-links">{links}</div>
        </section>
    }
}
