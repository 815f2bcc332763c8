use crate::api;
use crate::components::{Header, ParaphraseForm, ResultsList};
use paraph_shared::{Completion, FormState, RequestToken, ResultType};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const FOOTER_NOTE: &str =
    "Paraphrases are provided by a third-party API through a small Rust proxy.";

pub enum Msg {
    // Form input
    TextChanged(String),
    ResultTypeChanged(ResultType),

    // Submission lifecycle
    Submit,
    Completed(RequestToken, Completion),
}

pub struct App {
    form: FormState,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: FormState::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::TextChanged(text) => {
                self.form.set_text(text);
                true
            }

            Msg::ResultTypeChanged(result_type) => {
                self.form.set_result_type(result_type);
                true
            }

            Msg::Submit => {
                if let Some((token, request)) = self.form.submit() {
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let completion = api::paraphrase(&request).await;
                        link.send_message(Msg::Completed(token, completion));
                    });
                }
                true
            }

            Msg::Completed(token, completion) => {
                if let Completion::Transport(message) = &completion {
                    web_sys::console::error_1(&JsValue::from_str(&format!(
                        "Paraphrase request failed: {}",
                        message
                    )));
                }
                // A superseded submission leaves nothing to redraw
                self.form.complete(token, completion)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="app">
                <Header />

                <main>
                    <ParaphraseForm
                        text={self.form.text.clone()}
                        result_type={self.form.result_type}
                        loading={self.form.loading}
                        error={self.form.error.clone()}
                        on_text={link.callback(Msg::TextChanged)}
                        on_result_type={link.callback(Msg::ResultTypeChanged)}
                        on_submit={link.callback(|_| Msg::Submit)}
                    />

                    {match self.form.groups() {
                        Some(groups) => html! { <ResultsList {groups} /> },
                        None => html! {},
                    }}
                </main>

                <footer class="footer">
                    <small>{FOOTER_NOTE}</small>
                </footer>
            </div>
        }
    }
}
