use quill_client::api::COMMENT_MAX_LEN;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct CommentFormProps {
    pub title: AttrValue,
    pub text: AttrValue,
    pub submitting: bool,
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    pub on_input: Callback<String>,
    pub on_submit: Callback<()>,
    #[prop_or_default]
    pub on_cancel: Option<Callback<()>>,
}

/// Textarea with submit and optional cancel buttons, shared by the comment,
/// reply and edit forms
#[function_component(CommentForm)]
pub fn comment_form(p: &CommentFormProps) -> Html {
    let onsubmit = {
        let on_submit = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(())
        })
    };
    let oninput = p.on_input.reform(|e: InputEvent| {
        let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
        input.value()
    });
    let cancel_button = p.on_cancel.as_ref().map(|on_cancel| {
        html! {
            <button
                type="button"
                class="btn btn-outline-primary ms-2"
                onclick={ on_cancel.reform(|_| ()) }
            >
                { "Cancel" }
            </button>
        }
    });
    html! {
        <div class="mt-2">
            <div class="mb-1">{ p.title.clone() }</div>
            <form { onsubmit }>
                <textarea
                    class="form-control mb-2"
                    maxlength={ COMMENT_MAX_LEN.to_string() }
                    placeholder={ p.placeholder.clone() }
                    value={ p.text.clone() }
                    { oninput }
                />
                <button type="submit" class="btn btn-primary" disabled={ p.submitting }>
                    { for p.submitting.then(|| html! {
                        <span class="spinner-border spinner-border-sm me-1" role="status"></span>
                    }) }
                    { p.submit_label.clone() }
                </button>
                { for cancel_button }
            </form>
        </div>
    }
}
