use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct LoginPromptProps {
    pub shown: bool,
    pub on_close: Callback<()>,
}

/// Stand-in for the blog's login modal, which lives outside of the comments
#[function_component(LoginPrompt)]
pub fn login_prompt(p: &LoginPromptProps) -> Html {
    if !p.shown {
        return html! {};
    }
    html! {
        <div class="login-prompt alert alert-info d-flex align-items-center" role="dialog">
            <div class="flex-grow-1">
                { "You need to be logged in to do this. " }
                <a href="/login">{ "Log in" }</a>
            </div>
            <button
                type="button"
                class="btn-close"
                aria-label="Close"
                onclick={ p.on_close.reform(|_| ()) }
            >
            </button>
        </div>
    }
}
