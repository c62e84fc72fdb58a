use quill_client::{
    api::{Comment, CommentApi, CommentId, Error},
    format_relative_date, CommentNode, Panel, ReplyIntent, Session, EDITED_MARKER,
};
use yew::prelude::*;

use crate::{api, ui, ApiHandle};

#[derive(Clone, PartialEq, Properties)]
pub struct CommentNodeViewProps {
    pub api: ApiHandle,
    pub session: Session,
    pub comment: Comment,
    pub on_show_login: Callback<()>,
    pub on_reply_created: Callback<Comment>,
    pub on_updated: Callback<Comment>,
    pub on_deleted: Callback<CommentId>,
}

pub enum CommentNodeMsg {
    ReplyClicked,
    EditClicked,
    DeleteClicked,
    Cancel,
    TextChanged(String),
    SubmitReply,
    ReplyDone(Result<Comment, Error>),
    SubmitEdit,
    EditDone(Result<Comment, Error>),
    ConfirmDelete,
    DeleteDone(Result<(), Error>),
}

pub struct CommentNodeView {
    node: CommentNode,
}

impl Component for CommentNodeView {
    type Message = CommentNodeMsg;
    type Properties = CommentNodeViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        CommentNodeView {
            node: CommentNode::new(ctx.props().comment.clone()),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.node.set_comment(ctx.props().comment.clone());
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let p = ctx.props();
        match msg {
            CommentNodeMsg::ReplyClicked => {
                if self.node.reply_clicked(&p.session) == ReplyIntent::ShowLogin {
                    p.on_show_login.emit(());
                    return false;
                }
            }
            CommentNodeMsg::EditClicked => return self.node.edit_clicked(&p.session),
            CommentNodeMsg::DeleteClicked => return self.node.delete_clicked(&p.session),
            CommentNodeMsg::Cancel => self.node.cancel(),
            CommentNodeMsg::TextChanged(t) => match self.node.panel_mut() {
                Panel::Editing(draft) => draft.set_text(&t),
                Panel::Replying(composer) => composer.draft_mut().set_text(&t),
                _ => return false,
            },
            CommentNodeMsg::SubmitReply => {
                let new = match self.node.composer_mut().and_then(|c| c.begin_submit()) {
                    Some(new) => new,
                    None => return false,
                };
                let handle = p.api.clone();
                ctx.link().send_future(async move {
                    let res = handle
                        .create_comment(&new.post_id, new.parent_comment_id.as_ref(), &new.text)
                        .await;
                    CommentNodeMsg::ReplyDone(res)
                });
            }
            CommentNodeMsg::ReplyDone(res) => match self.node.finish_reply(res) {
                Ok(reply) => p.on_reply_created.emit(reply),
                Err(e) => api::alert(&e.to_string()),
            },
            CommentNodeMsg::SubmitEdit => {
                let text = match self.node.begin_edit() {
                    Some(text) => text,
                    None => return false,
                };
                let handle = p.api.clone();
                let id = self.node.comment().id.clone();
                ctx.link().send_future(async move {
                    CommentNodeMsg::EditDone(handle.update_comment(&id, &text).await)
                });
            }
            CommentNodeMsg::EditDone(res) => match self.node.finish_edit(res) {
                Ok(updated) => p.on_updated.emit(updated),
                Err(e) => api::alert(&e.to_string()),
            },
            CommentNodeMsg::ConfirmDelete => {
                let id = match self.node.begin_delete() {
                    Some(id) => id,
                    None => return false,
                };
                let handle = p.api.clone();
                ctx.link().send_future(async move {
                    CommentNodeMsg::DeleteDone(handle.delete_comment(&id).await)
                });
            }
            CommentNodeMsg::DeleteDone(res) => match self.node.finish_delete(res) {
                Ok(id) => p.on_deleted.emit(id),
                Err(e) => api::alert(&e.to_string()),
            },
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_input = link.callback(CommentNodeMsg::TextChanged);
        let on_cancel = link.callback(|_| CommentNodeMsg::Cancel);
        let (body, panel) = match self.node.panel() {
            Panel::Closed => (self.comment_box(ctx), html! {}),
            Panel::Editing(draft) => (
                html! {
                    <ui::CommentForm
                        title="Edit comment"
                        text={ AttrValue::from(String::from(draft.text())) }
                        submitting={ draft.is_submitting() }
                        submit_label="Submit"
                        { on_input }
                        on_submit={ link.callback(|_| CommentNodeMsg::SubmitEdit) }
                        on_cancel={ on_cancel }
                    />
                },
                html! {},
            ),
            Panel::Replying(composer) => (
                self.comment_box(ctx),
                html! {
                    <ui::CommentForm
                        title="Write a reply"
                        text={ AttrValue::from(String::from(composer.draft().text())) }
                        submitting={ composer.draft().is_submitting() }
                        submit_label="Send"
                        placeholder={ AttrValue::from("Say something...") }
                        { on_input }
                        on_submit={ link.callback(|_| CommentNodeMsg::SubmitReply) }
                        on_cancel={ on_cancel }
                    />
                },
            ),
            Panel::ConfirmingDelete { pending } => (
                self.comment_box(ctx),
                html! {
                    <ui::DeleteConfirmation
                        pending={ *pending }
                        on_confirm={ link.callback(|_| CommentNodeMsg::ConfirmDelete) }
                        { on_cancel }
                    />
                },
            ),
        };
        html! {
            <div>
                <hr />
                { body }
                { panel }
            </div>
        }
    }
}

impl CommentNodeView {
    fn comment_box(&self, ctx: &Context<Self>) -> Html {
        let c = self.node.comment();
        let link = ctx.link();
        let author_buttons = self.node.can_modify(&ctx.props().session).then(|| {
            html! {<>
                <button
                    type="button"
                    class="btn btn-link small"
                    onclick={ link.callback(|_| CommentNodeMsg::EditClicked) }
                >
                    { "Edit" }
                </button>
                <button
                    type="button"
                    class="btn btn-link small"
                    onclick={ link.callback(|_| CommentNodeMsg::DeleteClicked) }
                >
                    { "Delete" }
                </button>
            </>}
        });
        html! {
            <div>
                <div class="mb-2">{ c.text.clone() }</div>
                <div class="d-flex gap-2 align-items-center">
                    <a href={ format!("/users/{}", c.author.username) }>
                        { c.author.display_name.clone().unwrap_or_else(|| c.author.username.clone()) }
                    </a>
                    { format_relative_date(chrono::Utc::now(), c.created_at) }
                    { for c.is_edited().then(|| html! { <span>{ EDITED_MARKER }</span> }) }
                </div>
                <div class="mt-1 d-flex gap-2">
                    <button
                        type="button"
                        class="btn btn-link small"
                        onclick={ link.callback(|_| CommentNodeMsg::ReplyClicked) }
                    >
                        { "Reply" }
                    </button>
                    { for author_buttons }
                </div>
            </div>
        }
    }
}
