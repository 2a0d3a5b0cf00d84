//! Application root and route switch.

use crate::components::layout::DashboardLayout;
use crate::routes::Route;
use pages::{DashboardPage, MessagesPage, NotFound, PlaceholderPage, SettingsPage};
use yew::prelude::*;
use yew_router::prelude::*;

mod pages;

#[function_component(NeoDashApp)]
pub(crate) fn neodash_app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn switch(route: Route) -> Html {
    let page = match route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Leads | Route::Analytics => html! { <PlaceholderPage title={route.title()} /> },
        Route::Messages => html! { <MessagesPage /> },
        Route::Settings => html! { <SettingsPage /> },
        Route::NotFound => return html! { <NotFound /> },
    };
    html! {
        <DashboardLayout>{page}</DashboardLayout>
    }
}

/// Mount the shell on `#root`, or on `<body>` when there is none.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<NeoDashApp>::with_root(root).render();
    } else {
        yew::Renderer::<NeoDashApp>::new().render();
    }
}
