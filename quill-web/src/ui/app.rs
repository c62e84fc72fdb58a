use quill_client::{api::PostId, Session};
use yew::prelude::*;

use crate::{api, ui, ApiHandle};

pub enum AppMsg {
    SessionResolved(Session),
    ShowLogin,
    HideLogin,
}

pub struct App {
    api: ApiHandle,
    post: Option<PostId>,
    session: Session,
    login_shown: bool,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let handle = ApiHandle::from_storage();
        {
            let handle = handle.clone();
            ctx.link().send_future(async move {
                let session = match Session::resolve(&*handle).await {
                    Ok(session) => session,
                    Err(err) => {
                        tracing::error!(?err, "failed retrieving authenticated user");
                        Session::anonymous()
                    }
                };
                AppMsg::SessionResolved(session)
            });
        }
        App {
            api: handle,
            post: api::post_from_location(),
            session: Session::anonymous(),
            login_shown: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::SessionResolved(session) => {
                tracing::debug!(logged_in = session.is_logged_in(), "session resolved");
                self.session = session;
            }
            AppMsg::ShowLogin => self.login_shown = true,
            AppMsg::HideLogin => self.login_shown = false,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let section = match &self.post {
            None => html! { <p>{ "No post selected" }</p> },
            Some(post) => html! {
                // keyed on the post so that switching posts starts from scratch
                <ui::CommentSectionView
                    key={ post.to_string() }
                    api={ self.api.clone() }
                    session={ self.session.clone() }
                    post={ post.clone() }
                    on_show_login={ ctx.link().callback(|_| AppMsg::ShowLogin) }
                />
            },
        };
        html! {
            <div class="container my-4">
                { section }
                <ui::LoginPrompt
                    shown={ self.login_shown }
                    on_close={ ctx.link().callback(|_| AppMsg::HideLogin) }
                />
            </div>
        }
    }
}
