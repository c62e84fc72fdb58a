use quill_client::{
    api::{Comment, CommentId, CommentPage, Error},
    CommentThread, PageRequest, Provenance, Session,
};
use yew::prelude::*;

use crate::{ui, ApiHandle};

#[derive(Clone, PartialEq, Properties)]
pub struct CommentThreadViewProps {
    pub api: ApiHandle,
    pub session: Session,
    pub comment: Comment,
    pub on_show_login: Callback<()>,
    pub on_updated: Callback<Comment>,
    pub on_deleted: Callback<CommentId>,
}

pub enum CommentThreadMsg {
    LoadReplies,
    RepliesLoaded(PageRequest<CommentId>, Result<CommentPage, Error>),
    ReplyCreated(Comment),
    ReplyUpdated(Provenance, Comment),
    ReplyDeleted(Provenance, CommentId),
}

pub struct CommentThreadView {
    thread: CommentThread,
}

impl Component for CommentThreadView {
    type Message = CommentThreadMsg;
    type Properties = CommentThreadViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        CommentThreadView {
            thread: CommentThread::new(ctx.props().comment.clone()),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.thread.set_comment(ctx.props().comment.clone());
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CommentThreadMsg::LoadReplies => {
                let req = self.thread.begin_load_replies();
                let handle = ctx.props().api.clone();
                ctx.link().send_future(async move {
                    let res = req.fetch(&*handle).await;
                    CommentThreadMsg::RepliesLoaded(req, res)
                });
            }
            CommentThreadMsg::RepliesLoaded(req, res) => {
                self.thread.finish_load_replies(req, res)
            }
            CommentThreadMsg::ReplyCreated(reply) => self.thread.on_reply_created(reply),
            CommentThreadMsg::ReplyUpdated(from, reply) => {
                self.thread.on_reply_updated(from, reply)
            }
            CommentThreadMsg::ReplyDeleted(from, id) => self.thread.on_reply_deleted(from, &id),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let p = ctx.props();
        let on_reply_created = ctx.link().callback(CommentThreadMsg::ReplyCreated);
        let reply_view = |from: Provenance, reply: &Comment| {
            html! {
                <ui::CommentNodeView
                    key={ reply.id.to_string() }
                    api={ p.api.clone() }
                    session={ p.session.clone() }
                    comment={ reply.clone() }
                    on_show_login={ p.on_show_login.clone() }
                    on_reply_created={ on_reply_created.clone() }
                    on_updated={ ctx.link().callback(move |c| CommentThreadMsg::ReplyUpdated(from, c)) }
                    on_deleted={ ctx.link().callback(move |id| CommentThreadMsg::ReplyDeleted(from, id)) }
                />
            }
        };
        let remote = self
            .thread
            .remote_replies()
            .iter()
            .map(|c| reply_view(Provenance::Remote, c));
        let local = self
            .thread
            .local_replies()
            .iter()
            .map(|c| reply_view(Provenance::Local, c));
        html! {
            <div>
                <ui::CommentNodeView
                    api={ p.api.clone() }
                    session={ p.session.clone() }
                    comment={ self.thread.comment().clone() }
                    on_show_login={ p.on_show_login.clone() }
                    on_reply_created={ on_reply_created.clone() }
                    on_updated={ p.on_updated.clone() }
                    on_deleted={ p.on_deleted.clone() }
                />
                <div class="ms-5">{ for remote }</div>
                <ui::ListFooterView
                    footer={ self.thread.footer() }
                    on_load_more={ ctx.link().callback(|_| CommentThreadMsg::LoadReplies) }
                />
                <div class="ms-5">{ for local }</div>
            </div>
        }
    }
}
