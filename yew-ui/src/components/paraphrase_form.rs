use paraph_shared::ResultType;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ParaphraseFormProps {
    pub text: String,
    pub result_type: ResultType,
    pub loading: bool,
    pub error: String,
    pub on_text: Callback<String>,
    pub on_result_type: Callback<ResultType>,
    pub on_submit: Callback<()>,
}

#[function_component(ParaphraseForm)]
pub fn paraphrase_form(props: &ParaphraseFormProps) -> Html {
    let on_input = {
        let callback = props.on_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            callback.emit(input.value());
        })
    };

    let on_change = {
        let callback = props.on_result_type.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            callback.emit(select.value().parse().unwrap_or_default());
        })
    };

    let on_submit = {
        let callback = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            callback.emit(());
        })
    };

    html! {
        <form class="form" onsubmit={on_submit}>
            <label for="text" class="label">{"Enter text"}</label>
            <textarea
                id="text"
                class="textarea"
                placeholder="Paste or type your text here..."
                rows="10"
                value={props.text.clone()}
                oninput={on_input}
            />

            <div class="controls">
                <div class="select-wrap">
                    <label for="resultType" class="sublabel">{"Result type"}</label>
                    <select id="resultType" class="select" onchange={on_change}>
                        <option
                            value="multiple"
                            selected={props.result_type == ResultType::Multiple}
                        >
                            {"Multiple (per sentence)"}
                        </option>
                        <option
                            value="single"
                            selected={props.result_type == ResultType::Single}
                        >
                            {"Single"}
                        </option>
                    </select>
                </div>
                <button class="submit" type="submit" disabled={props.loading}>
                    {if props.loading { "Paraphrasing…" } else { "Paraphrase" }}
                </button>
            </div>

            {if props.error.is_empty() {
                html! {}
            } else {
                html! { <div class="error" role="alert">{&props.error}</div> }
            }}
        </form>
    }
}
