use quill_client::{
    api::{Comment, CommentApi, Error, PostId},
    CommentComposer, Session, LOGIN_TO_COMMENT,
};
use yew::prelude::*;

use crate::{api, ui, ApiHandle};

#[derive(Clone, PartialEq, Properties)]
pub struct CreateCommentBoxProps {
    pub api: ApiHandle,
    pub session: Session,
    pub post: PostId,
    pub title: AttrValue,
    pub on_created: Callback<Comment>,
    pub on_show_login: Callback<()>,
}

pub enum CreateCommentMsg {
    TextChanged(String),
    Submit,
    Done(Result<Comment, Error>),
}

/// Form for a new root comment
pub struct CreateCommentBox {
    composer: CommentComposer,
}

impl Component for CreateCommentBox {
    type Message = CreateCommentMsg;
    type Properties = CreateCommentBoxProps;

    fn create(ctx: &Context<Self>) -> Self {
        CreateCommentBox {
            composer: CommentComposer::new_comment(ctx.props().post.clone()),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CreateCommentMsg::TextChanged(t) => self.composer.draft_mut().set_text(&t),
            CreateCommentMsg::Submit => {
                let new = match self.composer.begin_submit() {
                    Some(new) => new,
                    None => return false,
                };
                let handle = ctx.props().api.clone();
                ctx.link().send_future(async move {
                    let res = handle
                        .create_comment(&new.post_id, new.parent_comment_id.as_ref(), &new.text)
                        .await;
                    CreateCommentMsg::Done(res)
                });
            }
            CreateCommentMsg::Done(res) => match self.composer.finish_submit(res) {
                Ok(c) => ctx.props().on_created.emit(c),
                Err(e) => api::alert(&e.to_string()),
            },
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let p = ctx.props();
        if !self.composer.is_available(&p.session) {
            return html! {
                <button
                    type="button"
                    class="btn btn-outline-primary mt-1"
                    onclick={ p.on_show_login.reform(|_| ()) }
                >
                    { LOGIN_TO_COMMENT }
                </button>
            };
        }
        let draft = self.composer.draft();
        html! {
            <ui::CommentForm
                title={ p.title.clone() }
                text={ AttrValue::from(String::from(draft.text())) }
                submitting={ draft.is_submitting() }
                submit_label="Send"
                placeholder={ AttrValue::from("Say something...") }
                on_input={ ctx.link().callback(CreateCommentMsg::TextChanged) }
                on_submit={ ctx.link().callback(|_| CreateCommentMsg::Submit) }
            />
        }
    }
}
