use crate::api::clipboard;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const COPIED_FEEDBACK_MS: u32 = 1500;

#[derive(Properties, PartialEq)]
pub struct ResultCardProps {
    pub variant: String,
}

#[function_component(ResultCard)]
pub fn result_card(props: &ResultCardProps) -> Html {
    let copied = use_state(|| false);

    let on_copy = {
        let variant = props.variant.clone();
        let copied = copied.clone();
        Callback::from(move |_: MouseEvent| {
            let variant = variant.clone();
            let copied = copied.clone();
            spawn_local(async move {
                match clipboard::copy_text(&variant).await {
                    Ok(()) => {
                        copied.set(true);
                        Timeout::new(COPIED_FEEDBACK_MS, move || copied.set(false)).forget();
                    }
                    Err(e) => web_sys::console::error_1(&JsValue::from_str(&format!(
                        "Failed to copy to clipboard: {:?}",
                        e
                    ))),
                }
            });
        })
    };

    html! {
        <div class="result-card">
            <p>{&props.variant}</p>
            <button
                type="button"
                class="copy-btn"
                onclick={on_copy}
                aria-label="Copy paraphrased text"
            >
                {if *copied { "Copied" } else { "Copy" }}
            </button>
        </div>
    }
}
