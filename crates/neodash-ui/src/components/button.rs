use crate::foundations::{ButtonVariant, Size, button_classes};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ButtonProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub variant: ButtonVariant,
    #[prop_or_default]
    pub size: Size,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub aria_label: Option<AttrValue>,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
}

#[function_component(Button)]
pub(crate) fn button(props: &ButtonProps) -> Html {
    let classes = classes!(
        button_classes(props.variant, props.size, props.disabled, props.loading),
        props.class.clone()
    );

    html! {
        <button
            type="button"
            class={classes}
            disabled={props.disabled || props.loading}
            aria-label={props.aria_label.clone()}
            aria-busy={props.loading.then_some("true")}
            onclick={props.onclick.clone()}
        >
            <div class="flex items-center justify-center space-x-2">
                if props.loading {
                    <Spinner />
                }
                <span>{ for props.children.iter() }</span>
            </div>
        </button>
    }
}

#[function_component(Spinner)]
pub(crate) fn spinner() -> Html {
    html! {
        <svg class="animate-spin h-4 w-4" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
            <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
            <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path>
        </svg>
    }
}
