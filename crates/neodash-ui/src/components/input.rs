use crate::foundations::{input_classes, input_hint_class};
use neodash_hooks::format::slugify;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct InputProps {
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub label: Option<AttrValue>,
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub helper_text: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub oninput: Callback<String>,
}

#[function_component(Input)]
pub(crate) fn input(props: &InputProps) -> Html {
    let id = props.id.clone().unwrap_or_else(|| {
        let stem = props.label.as_deref().map(slugify).unwrap_or_default();
        AttrValue::from(format!("input-{stem}"))
    });
    let has_error = props.error.is_some();
    let hint = props.error.clone().or_else(|| props.helper_text.clone());
    let oninput = {
        let oninput = props.oninput.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                oninput.emit(input.value());
            }
        })
    };

    html! {
        <div class="w-full">
            if let Some(label) = props.label.clone() {
                <label for={id.clone()} class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">
                    {label}
                </label>
            }
            <input
                id={id}
                class={classes!(input_classes(has_error), props.class.clone())}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                aria-invalid={has_error.then_some("true")}
                oninput={oninput}
            />
            if let Some(hint) = hint {
                <p class={input_hint_class(has_error)}>{hint}</p>
            }
        </div>
    }
}
