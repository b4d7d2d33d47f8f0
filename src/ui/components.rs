/// Reusable UI components

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or(false)]
    pub multiline: bool,
    #[prop_or(false)]
    pub password: bool,
    pub oninput: Callback<String>,
}

/// Labelled input or textarea that reports its new value as a plain string
#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let emit = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                emit.emit(input.value());
            } else if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                emit.emit(area.value());
            }
        })
    };

    html! {
        <div class="form-field">
            <label class="form-label" for={props.id.clone()}>{props.label.clone()}</label>
            if props.multiline {
                <textarea
                    id={props.id.clone()}
                    class="form-input form-textarea"
                    value={props.value.clone()}
                    placeholder={props.placeholder.clone()}
                    {oninput}
                />
            } else {
                <input
                    id={props.id.clone()}
                    type={if props.password { "password" } else { "text" }}
                    class="form-input"
                    value={props.value.clone()}
                    placeholder={props.placeholder.clone()}
                    {oninput}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SavedBadgeProps {
    pub visible: bool,
    #[prop_or(AttrValue::from("Saved"))]
    pub text: AttrValue,
}

#[function_component(SavedBadge)]
pub fn saved_badge(props: &SavedBadgeProps) -> Html {
    if !props.visible {
        return html! {};
    }

    html! {
        <div class="saved-badge">
            <span class="saved-check">{"✓"}</span>
            <span class="saved-text">{props.text.clone()}</span>
        </div>
    }
}
