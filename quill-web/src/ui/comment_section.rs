use quill_client::{
    api::{Comment, CommentId, CommentPage, Error, PostId},
    CommentSection, PageRequest, Session,
};
use yew::prelude::*;

use crate::{ui, ApiHandle};

#[derive(Clone, PartialEq, Properties)]
pub struct CommentSectionViewProps {
    pub api: ApiHandle,
    pub session: Session,
    pub post: PostId,
    pub on_show_login: Callback<()>,
}

pub enum CommentSectionMsg {
    ShowMore,
    PageLoaded(PageRequest<PostId>, Result<CommentPage, Error>),
    Created(Comment),
    Updated(Comment),
    Deleted(CommentId),
}

/// Root comments of a post. Expected to be keyed on the post id.
pub struct CommentSectionView {
    section: CommentSection,
}

fn fetch(ctx: &Context<CommentSectionView>, req: PageRequest<PostId>) {
    let handle = ctx.props().api.clone();
    ctx.link().send_future(async move {
        let res = req.fetch(&*handle).await;
        CommentSectionMsg::PageLoaded(req, res)
    });
}

impl Component for CommentSectionView {
    type Message = CommentSectionMsg;
    type Properties = CommentSectionViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut section = CommentSection::new(ctx.props().post.clone());
        fetch(ctx, section.begin_load(None));
        CommentSectionView { section }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CommentSectionMsg::ShowMore => match self.section.show_more() {
                Some(req) => fetch(ctx, req),
                None => return false,
            },
            CommentSectionMsg::PageLoaded(req, res) => self.section.finish_load(req, res),
            CommentSectionMsg::Created(c) => self.section.on_comment_created(c),
            CommentSectionMsg::Updated(c) => self.section.on_comment_updated(c),
            CommentSectionMsg::Deleted(id) => self.section.on_comment_deleted(&id),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let p = ctx.props();
        let link = ctx.link();
        html! {
            <div>
                <p class="h5">{ "Comments" }</p>
                <ui::CreateCommentBox
                    api={ p.api.clone() }
                    session={ p.session.clone() }
                    post={ p.post.clone() }
                    title="Write a comment"
                    on_created={ link.callback(CommentSectionMsg::Created) }
                    on_show_login={ p.on_show_login.clone() }
                />
                { for self.section.comments().iter().map(|c| html! {
                    <ui::CommentThreadView
                        key={ c.id.to_string() }
                        api={ p.api.clone() }
                        session={ p.session.clone() }
                        comment={ c.clone() }
                        on_show_login={ p.on_show_login.clone() }
                        on_updated={ link.callback(CommentSectionMsg::Updated) }
                        on_deleted={ link.callback(CommentSectionMsg::Deleted) }
                    />
                }) }
                <ui::ListFooterView
                    footer={ self.section.footer() }
                    on_load_more={ link.callback(|_| CommentSectionMsg::ShowMore) }
                />
            </div>
        }
    }
}
