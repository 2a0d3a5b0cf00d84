use crate::nav::{BRAND, NAV_ITEMS, NavItem, collapse_label, sidebar_style};
use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::{Link, use_route};

const CHEVRON_RIGHT: &str = "M7.293 14.707a1 1 0 010-1.414L10.586 10 7.293 6.707a1 1 0 011.414-1.414l4 4a1 1 0 010 1.414l-4 4a1 1 0 01-1.414 0z";
const CHEVRON_LEFT: &str = "M12.707 5.293a1 1 0 010 1.414L9.414 10l3.293 3.293a1 1 0 01-1.414 1.414l-4-4a1 1 0 010-1.414l4-4a1 1 0 011.414 0z";

#[derive(Properties, PartialEq)]
pub(crate) struct SidebarProps {
    pub collapsed: bool,
    pub on_toggle: Callback<()>,
}

#[function_component(Sidebar)]
pub(crate) fn sidebar(props: &SidebarProps) -> Html {
    let current = use_route::<Route>();
    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };
    let chevron = if props.collapsed { CHEVRON_RIGHT } else { CHEVRON_LEFT };

    html! {
        <aside
            class="fixed inset-y-0 left-0 z-20 bg-gray-800 text-white h-screen flex flex-col overflow-hidden"
            style={sidebar_style(props.collapsed)}
        >
            <div class="p-4 flex items-center justify-between">
                if !props.collapsed {
                    <span class="text-xl font-bold">{BRAND}</span>
                }
                <button
                    type="button"
                    onclick={on_toggle}
                    class="p-1 rounded-md hover:bg-gray-700 focus:outline-none"
                    aria-label={collapse_label(props.collapsed)}
                >
                    <svg class="w-6 h-6" fill="currentColor" viewBox="0 0 20 20">
                        <path fill-rule="evenodd" clip-rule="evenodd" d={chevron}></path>
                    </svg>
                </button>
            </div>
            <nav class="flex-1 overflow-y-auto">
                <ul class="py-4">
                    { for NAV_ITEMS.iter().map(|item| nav_item(item, current, props.collapsed)) }
                </ul>
            </nav>
        </aside>
    }
}

fn nav_item(item: &NavItem, current: Option<Route>, collapsed: bool) -> Html {
    let classes = classes!(
        "flex",
        "items-center",
        "px-4",
        "py-3",
        if item.is_active(current) {
            "bg-gray-700"
        } else {
            "hover:bg-gray-700"
        }
    );
    html! {
        <li key={item.label}>
            <Link<Route> to={item.route} classes={classes}>
                <span title={item.label}>
                    <svg class="w-5 h-5" fill="currentColor" viewBox="0 0 20 20">
                        <path fill-rule="evenodd" clip-rule="evenodd" d={item.icon}></path>
                    </svg>
                </span>
                if !collapsed {
                    <span class="ml-4">{item.label}</span>
                }
            </Link<Route>>
        </li>
    }
}
