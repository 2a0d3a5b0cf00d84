use crate::nav::DEFAULT_TITLE;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct HeaderProps {
    #[prop_or(AttrValue::Static(DEFAULT_TITLE))]
    pub title: AttrValue,
    #[prop_or_default]
    pub actions: Option<Html>,
}

#[function_component(Header)]
pub(crate) fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="bg-white dark:bg-gray-800 border-b border-gray-200 dark:border-gray-700 shadow-sm">
            <div class="px-6 py-4 flex items-center justify-between">
                <h1 class="text-xl font-semibold text-gray-800 dark:text-white">{props.title.clone()}</h1>
                if let Some(actions) = props.actions.clone() {
                    <div class="flex items-center space-x-4">{actions}</div>
                }
            </div>
        </header>
    }
}
