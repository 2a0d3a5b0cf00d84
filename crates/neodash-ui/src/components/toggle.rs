use crate::foundations::{Size, toggle_knob_style, toggle_track_classes};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ToggleProps {
    pub on: bool,
    #[prop_or_default]
    pub label: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub size: Size,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub ontoggle: Callback<()>,
}

#[function_component(Toggle)]
pub(crate) fn toggle(props: &ToggleProps) -> Html {
    let onclick = {
        let ontoggle = props.ontoggle.clone();
        let disabled = props.disabled;
        Callback::from(move |_: MouseEvent| {
            if !disabled {
                ontoggle.emit(());
            }
        })
    };
    let aria_label = props.label.clone().unwrap_or_else(|| AttrValue::from("Toggle"));
    let knob_class = classes!(props.size.toggle_metrics().knob, "bg-white rounded-full shadow-md");

    html! {
        <div class={classes!("flex", "items-center", props.class.clone())}>
            if let Some(label) = props.label.clone() {
                <span class="mr-3 text-sm font-medium text-gray-700 dark:text-gray-300">{label}</span>
            }
            <button
                type="button"
                class={toggle_track_classes(props.size, props.on, props.disabled)}
                aria-pressed={if props.on { "true" } else { "false" }}
                aria-label={aria_label}
                disabled={props.disabled}
                onclick={onclick}
            >
                <div class={knob_class} style={toggle_knob_style(props.size, props.on)} />
            </button>
        </div>
    }
}
