use crate::components::button::Button;
use crate::components::header::Header;
use crate::components::sidebar::Sidebar;
use crate::foundations::ButtonVariant;
use crate::hooks::{use_media_query, use_persisted_state};
use crate::nav::main_offset_style;
use crate::preferences::THEME_KEY;
use crate::theme::ThemeMode;
use gloo::utils::document;
use neodash_hooks::Breakpoint;
use yew::prelude::*;

const SUN: &str = "M10 2a1 1 0 011 1v1a1 1 0 11-2 0V3a1 1 0 011-1zm4 8a4 4 0 11-8 0 4 4 0 018 0zm-.464 4.95l.707.707a1 1 0 001.414-1.414l-.707-.707a1 1 0 00-1.414 1.414zm2.12-10.607a1 1 0 010 1.414l-.706.707a1 1 0 11-1.414-1.414l.707-.707a1 1 0 011.414 0zM17 11a1 1 0 100-2h-1a1 1 0 100 2h1zm-7 4a1 1 0 011 1v1a1 1 0 11-2 0v-1a1 1 0 011-1zM5.05 6.464A1 1 0 106.465 5.05l-.708-.707a1 1 0 00-1.414 1.414l.707.707zm1.414 8.486l-.707.707a1 1 0 01-1.414-1.414l.707-.707a1 1 0 011.414 1.414zM4 11a1 1 0 100-2H3a1 1 0 000 2h1z";
const MOON: &str = "M17.293 13.293A8 8 0 016.707 2.707a8.001 8.001 0 1010.586 10.586z";

#[derive(Properties, PartialEq)]
pub(crate) struct DashboardLayoutProps {
    pub children: Children,
    #[prop_or_default]
    pub title: Option<AttrValue>,
}

#[function_component(DashboardLayout)]
pub(crate) fn dashboard_layout(props: &DashboardLayoutProps) -> Html {
    let collapsed = use_state(|| false);
    let desktop = use_media_query(Breakpoint::Md);
    let theme = use_persisted_state(THEME_KEY, ThemeMode::default());
    let mode = theme.get();

    {
        let collapsed = collapsed.clone();
        use_effect_with_deps(
            move |desktop| {
                if !*desktop {
                    collapsed.set(true);
                }
                || ()
            },
            desktop,
        );
    }
    use_effect_with_deps(
        move |mode| {
            apply_theme(*mode);
            || ()
        },
        mode,
    );

    let on_toggle_sidebar = {
        let collapsed = collapsed.clone();
        Callback::from(move |()| collapsed.set(!*collapsed))
    };
    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| theme.update(|current| current.toggled()))
    };

    let theme_button = html! {
        <Button
            variant={ButtonVariant::Ghost}
            aria_label={mode.toggle_label()}
            onclick={on_toggle_theme}
        >
            <svg class="w-5 h-5" fill="currentColor" viewBox="0 0 20 20">
                <path fill-rule="evenodd" clip-rule="evenodd" d={if mode.is_dark() { SUN } else { MOON }} />
            </svg>
        </Button>
    };
    let header = match props.title.clone() {
        Some(title) => html! { <Header {title} actions={theme_button} /> },
        None => html! { <Header actions={theme_button} /> },
    };

    html! {
        <div class="h-screen bg-gray-50 dark:bg-gray-900 flex overflow-hidden">
            <Sidebar collapsed={*collapsed} on_toggle={on_toggle_sidebar} />
            <main class="flex-1 flex flex-col overflow-hidden" style={main_offset_style(*collapsed)}>
                {header}
                <div class="flex-1 overflow-auto p-6">
                    { for props.children.iter() }
                </div>
            </main>
        </div>
    }
}

fn apply_theme(mode: ThemeMode) {
    let Some(root) = document().document_element() else {
        return;
    };
    let _ = root.set_attribute("data-theme", mode.as_str());
    let classes = root.class_list();
    let _ = match mode.root_class() {
        Some(class) => classes.add_1(class),
        None => classes.remove_1("dark"),
    };
}
