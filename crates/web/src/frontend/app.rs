//! Leptos application with routing.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use meditrack_auth::{AppRoute, RouteController};

use crate::frontend::components::{Footer, Guarded, Navbar};
use crate::frontend::context::{provide_app_context, use_auth};
use crate::frontend::pages::{
    auth::{LoginPage, SignupPage},
    dashboards::{DashboardPage, DashboardRedirect},
    devices::{DeviceFormPage, DeviceIndexPage},
    hospitals::{HospitalFormPage, HospitalIndexPage},
    misc::{HomePage, NotFoundPage, UnauthorizedPage},
    rooms::{RoomFormPage, RoomIndexPage},
    spare_parts::{SparePartDetailPage, SparePartFormPage, SparePartIndexPage},
    work_orders::{
        EngineerOpenWorkOrdersPage, NurseReportsPage, WorkOrderDetailPage, WorkOrderFormPage,
        WorkOrderIndexPage,
    },
};
use crate::views::ReportFilter;

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let auth = provide_app_context();
    auth.hydrate();

    view! {
        <Router>
            <Shell/>
        </Router>
    }
}

/// Everything inside the router: redirects, chrome and the route table.
#[component]
fn Shell() -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    // Re-evaluated on every location or session change; the controller
    // issues each redirect once.
    let controller = Rc::new(RefCell::new(RouteController::new(move |path: &str| {
        navigate(
            path,
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        )
    })));
    create_effect(move |_| {
        let path = location.pathname.get();
        let snapshot = auth.snapshot();
        let Ok(mut controller) = controller.try_borrow_mut() else {
            return;
        };
        controller.visit_path(&path, &snapshot);
    });

    let show_chrome = move || {
        let bare = AppRoute::parse(&location.pathname.get()).is_none_or(|r| r.is_bare());
        !bare && auth.snapshot().session.is_some()
    };

    view! {
        <div class="app">
            <Show when=show_chrome>
                <Navbar/>
            </Show>

            <main class="content">
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/signup" view=SignupPage/>
                    <Route path="/unauthorized" view=UnauthorizedPage/>

                    <Route path="/dashboard" view=|| view! { <Guarded><DashboardRedirect/></Guarded> }/>
                    <Route path="/dashboard/admin" view=|| view! { <Guarded><DashboardPage/></Guarded> }/>
                    <Route path="/dashboard/engineer" view=|| view! { <Guarded><DashboardPage/></Guarded> }/>
                    <Route path="/dashboard/nurse" view=|| view! { <Guarded><DashboardPage/></Guarded> }/>

                    <Route path="/hospitals" view=|| view! { <Guarded><HospitalIndexPage/></Guarded> }/>
                    <Route path="/hospitals/new" view=|| view! { <Guarded><HospitalFormPage/></Guarded> }/>
                    <Route path="/hospitals/:id" view=|| view! { <Guarded><HospitalFormPage/></Guarded> }/>

                    <Route path="/rooms" view=|| view! { <Guarded><RoomIndexPage/></Guarded> }/>
                    <Route path="/rooms/new" view=|| view! { <Guarded><RoomFormPage/></Guarded> }/>
                    <Route path="/rooms/:id" view=|| view! { <Guarded><RoomFormPage/></Guarded> }/>

                    <Route path="/devices" view=|| view! { <Guarded><DeviceIndexPage/></Guarded> }/>
                    <Route path="/devices/new" view=|| view! { <Guarded><DeviceFormPage/></Guarded> }/>
                    <Route path="/devices/:id" view=|| view! { <Guarded><DeviceFormPage/></Guarded> }/>

                    <Route path="/workorders" view=|| view! { <Guarded><WorkOrderIndexPage/></Guarded> }/>
                    <Route path="/workorders/new" view=|| view! { <Guarded><WorkOrderFormPage/></Guarded> }/>
                    <Route path="/workorders/open" view=|| view! { <Guarded><EngineerOpenWorkOrdersPage/></Guarded> }/>
                    <Route
                        path="/workorders/nurse/open"
                        view=|| view! { <Guarded><NurseReportsPage filter=ReportFilter::Open/></Guarded> }
                    />
                    <Route
                        path="/workorders/nurse/closed"
                        view=|| view! { <Guarded><NurseReportsPage filter=ReportFilter::Closed/></Guarded> }
                    />
                    <Route path="/workorders/:id" view=|| view! { <Guarded><WorkOrderDetailPage/></Guarded> }/>

                    <Route path="/spareparts" view=|| view! { <Guarded><SparePartIndexPage/></Guarded> }/>
                    <Route path="/spareparts/new" view=|| view! { <Guarded><SparePartFormPage/></Guarded> }/>
                    <Route path="/spareparts/:id" view=|| view! { <Guarded><SparePartDetailPage/></Guarded> }/>

                    <Route path="/*any" view=NotFoundPage/>
                </Routes>
            </main>

            <Footer/>
        </div>
    }
}
