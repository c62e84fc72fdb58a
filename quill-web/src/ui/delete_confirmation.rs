use quill_client::CONFIRM_DELETE;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct DeleteConfirmationProps {
    pub pending: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(DeleteConfirmation)]
pub fn delete_confirmation(p: &DeleteConfirmationProps) -> Html {
    html! {
        <div>
            <p class="text-danger">{ CONFIRM_DELETE }</p>
            <button
                type="button"
                class="btn btn-danger"
                disabled={ p.pending }
                onclick={ p.on_confirm.reform(|_| ()) }
            >
                { "Delete" }
            </button>
            <button
                type="button"
                class="btn btn-outline-danger ms-2"
                onclick={ p.on_cancel.reform(|_| ()) }
            >
                { "Cancel" }
            </button>
        </div>
    }
}
