mod api;
pub use api::ApiHandle;

mod ui;

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<ui::App>::new().render();
}
