use yew::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="header">
            <h1>{"Paraphrase Genius"}</h1>
            <p class="tagline">{"Quickly rephrase your text with multiple alternatives."}</p>
        </header>
    }
}
