mod api;
mod components;

fn main() {
    yew::Renderer::<components::App>::new().render();
}
