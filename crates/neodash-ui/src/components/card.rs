use crate::foundations::{CardVariant, card_classes};
use crate::hooks::use_entered;
use neodash_hooks::motion::slide_up;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct CardProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub variant: CardVariant,
    /// Slide up into place after mounting.
    #[prop_or_default]
    pub animate: bool,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
}

#[function_component(Card)]
pub(crate) fn card(props: &CardProps) -> Html {
    let entered = use_entered();
    let style = props
        .animate
        .then(|| slide_up().frame(entered).css_style());
    let classes = classes!(
        card_classes(props.variant, props.onclick.is_some()),
        props.class.clone()
    );

    html! {
        <div class={classes} style={style} onclick={props.onclick.clone()}>
            { for props.children.iter() }
        </div>
    }
}
