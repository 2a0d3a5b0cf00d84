//! Page bodies rendered inside the dashboard layout.

use crate::components::button::Button;
use crate::components::card::Card;
use crate::components::input::Input;
use crate::components::toggle::Toggle;
use crate::foundations::{ButtonVariant, CardVariant, Size};
use crate::hooks::{spawn_browser, use_async, use_entered, use_persisted_state, use_persisted_state_in};
use crate::metrics::{DashboardMetrics, MetricsError, demo_metrics};
use crate::preferences::{DISPLAY_NAME_KEY, MESSAGE_DRAFT_KEY, NOTIFICATIONS_KEY};
use crate::routes::Route;
use chrono::Utc;
use gloo::console;
use gloo_timers::future::TimeoutFuture;
use neodash_hooks::format::{capitalize_first_letter, truncate_text};
use neodash_hooks::motion::{loading_pulse, page_transition};
use neodash_hooks::{AsyncState, Namespace};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::Link;

const LOAD_DELAY_MS: u32 = 600;
const DISPLAY_NAME_LIMIT: usize = 40;
const DRAFT_PREVIEW_CHARS: usize = 60;

async fn load_metrics(attempt: u32) -> Result<DashboardMetrics, MetricsError> {
    TimeoutFuture::new(LOAD_DELAY_MS).await;
    demo_metrics(attempt, Utc::now())
}

#[derive(Properties, PartialEq)]
pub(crate) struct PageProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Children,
}

/// Page wrapper that fades its content in on mount.
#[function_component(Page)]
pub(crate) fn page(props: &PageProps) -> Html {
    let entered = use_entered();
    html! {
        <section class="h-full flex flex-col" style={page_transition().frame(entered).css_style()}>
            <h1 class="text-2xl font-bold mb-4">{props.title.clone()}</h1>
            { for props.children.iter() }
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct PlaceholderProps {
    pub title: AttrValue,
}

#[function_component(PlaceholderPage)]
pub(crate) fn placeholder_page(props: &PlaceholderProps) -> Html {
    html! {
        <Page title={props.title.clone()}>
            <p class="text-gray-500 dark:text-gray-400">
                {format!("This is a placeholder for the {} page. Content will be added here.", props.title)}
            </p>
        </Page>
    }
}

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page() -> Html {
    let metrics = use_async(load_metrics, true, 0_u32);
    let attempts = use_mut_ref(|| 0_u32);

    let on_refresh = {
        let metrics = metrics.clone();
        let attempts = Rc::clone(&attempts);
        Callback::from(move |_: MouseEvent| {
            let attempt = {
                let mut count = attempts.borrow_mut();
                *count = count.saturating_add(1);
                *count
            };
            let pending = metrics.execute_with(attempt);
            spawn_browser(Box::pin(async move {
                if let Err(err) = pending.await {
                    console::error!(format!("dashboard refresh failed: {err}"));
                }
            }));
        })
    };

    let body = match metrics.state() {
        AsyncState::Idle | AsyncState::Pending => html! {
            <div class="grid gap-6 md:grid-cols-2 xl:grid-cols-4">
                { for (0..4).map(|_| html! {
                    <Card variant={CardVariant::Flat}>
                        <div class="h-16 rounded bg-gray-200 dark:bg-gray-700" style={loading_pulse().hidden.css_style()} />
                    </Card>
                }) }
            </div>
        },
        AsyncState::Success(snapshot) => html! {
            <>
                <div class="grid gap-6 md:grid-cols-2 xl:grid-cols-4">
                    { for snapshot.tiles().into_iter().map(|tile| html! {
                        <Card animate=true>
                            <p class="text-sm text-gray-500 dark:text-gray-400">{tile.label}</p>
                            <p class="text-2xl font-semibold">{tile.value}</p>
                        </Card>
                    }) }
                </div>
                <p class="mt-4 text-sm text-gray-500 dark:text-gray-400">{snapshot.freshness(Utc::now())}</p>
            </>
        },
        AsyncState::Error(err) => html! {
            <Card variant={CardVariant::Primary}>
                <p class="text-red-500" role="alert">{capitalize_first_letter(&err.to_string())}</p>
            </Card>
        },
    };
    let label = if metrics.is_error() { "Retry" } else { "Refresh" };

    html! {
        <Page title={Route::Dashboard.title()}>
            {body}
            <div class="mt-6">
                <Button
                    variant={ButtonVariant::Outline}
                    size={Size::Sm}
                    loading={metrics.is_loading()}
                    onclick={on_refresh}
                >
                    {label}
                </Button>
            </div>
        </Page>
    }
}

#[function_component(MessagesPage)]
pub(crate) fn messages_page() -> Html {
    let draft = use_persisted_state_in(Namespace::Session, MESSAGE_DRAFT_KEY, String::new());
    let text = draft.get();
    let oninput = {
        let draft = Rc::clone(&draft);
        Callback::from(move |value: String| draft.set(value))
    };
    let on_discard = {
        let draft = Rc::clone(&draft);
        Callback::from(move |_: MouseEvent| draft.remove())
    };

    html! {
        <Page title={Route::Messages.title()}>
            <Card class="max-w-xl">
                <Input
                    label="Reply draft"
                    value={text.clone()}
                    placeholder="Write a reply..."
                    helper_text="Drafts are kept until this tab is closed."
                    oninput={oninput}
                />
                if !text.is_empty() {
                    <p class="mt-4 text-sm text-gray-500 dark:text-gray-400">
                        {format!("Preview: {}", truncate_text(&text, DRAFT_PREVIEW_CHARS))}
                    </p>
                    <div class="mt-4">
                        <Button variant={ButtonVariant::Ghost} size={Size::Sm} onclick={on_discard}>{"Discard"}</Button>
                    </div>
                }
            </Card>
        </Page>
    }
}

#[function_component(SettingsPage)]
pub(crate) fn settings_page() -> Html {
    let notifications = use_persisted_state(NOTIFICATIONS_KEY, true);
    let display_name = use_persisted_state(DISPLAY_NAME_KEY, String::new());
    let name = display_name.get();
    let error = (name.chars().count() > DISPLAY_NAME_LIMIT)
        .then(|| AttrValue::from(format!("Display name must be {DISPLAY_NAME_LIMIT} characters or fewer")));

    let on_notifications = {
        let notifications = Rc::clone(&notifications);
        Callback::from(move |()| notifications.update(|enabled| !enabled))
    };
    let on_name = {
        let display_name = Rc::clone(&display_name);
        Callback::from(move |value: String| display_name.set(value))
    };

    html! {
        <Page title={Route::Settings.title()}>
            <Card class="max-w-xl space-y-6">
                <Input
                    label="Display name"
                    value={name}
                    error={error}
                    helper_text="Shown to customers in message replies."
                    oninput={on_name}
                />
                <Toggle
                    label="Email notifications"
                    on={notifications.get()}
                    size={Size::Md}
                    ontoggle={on_notifications}
                />
            </Card>
        </Page>
    }
}

#[function_component(NotFound)]
pub(crate) fn not_found() -> Html {
    html! {
        <div class="h-screen flex flex-col items-center justify-center">
            <h1 class="text-4xl font-bold mb-4">{"404"}</h1>
            <p class="text-xl mb-8">{Route::NotFound.title()}</p>
            <Link<Route> to={Route::Dashboard} classes="text-primary-500 hover:underline">
                {"Return to Dashboard"}
            </Link<Route>>
        </div>
    }
}
