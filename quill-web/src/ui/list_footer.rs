use quill_client::ListFooter;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ListFooterProps {
    pub footer: ListFooter,
    pub on_load_more: Callback<()>,
}

#[function_component(ListFooterView)]
pub fn list_footer(p: &ListFooterProps) -> Html {
    let f = &p.footer;
    html! {
        <div class="mt-2 text-center">
            { for f.empty_message.map(|msg| html! { <p>{ msg }</p> }) }
            { for f.loading.then(|| html! {
                <div class="spinner-border" role="status"></div>
            }) }
            { for f.error_message.map(|msg| html! { <p>{ msg }</p> }) }
            { for f.load_more_label.clone().map(|label| html! {
                <button
                    type="button"
                    class="btn btn-outline-primary"
                    onclick={ p.on_load_more.reform(|_| ()) }
                >
                    { label }
                </button>
            }) }
        </div>
    }
}
