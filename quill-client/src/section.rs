use crate::{
    api::{Comment, CommentApi, CommentId, CommentPage, Error, PostId},
    page::{self, ListFooter, PageRequest},
};

pub const NO_COMMENTS_YET: &str = "No one has posted a comment. Be the first!";
pub const COMMENTS_LOAD_FAILED: &str = "Comments could not be loaded";
pub const SHOW_MORE_COMMENTS: &str = "Show more comments";

/// Root comments of one post
///
/// Meant to be thrown away and rebuilt whenever the post changes.
#[derive(Clone, Debug)]
pub struct CommentSection {
    post: PostId,
    comments: Vec<Comment>,
    loading: bool,
    is_error: bool,

    /// `None` until the first page arrived
    pagination_end: Option<bool>,
}

impl CommentSection {
    pub fn new(post: PostId) -> CommentSection {
        CommentSection {
            post,
            comments: Vec::new(),
            loading: false,
            is_error: false,
            pagination_end: None,
        }
    }

    pub fn post(&self) -> &PostId {
        &self.post
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn pagination_end(&self) -> Option<bool> {
        self.pagination_end
    }

    /// Without a cursor, the page replaces the whole list once it arrives.
    /// Calls are not deduplicated: the UI hides its trigger while loading.
    pub fn begin_load(&mut self, continue_after: Option<CommentId>) -> PageRequest<PostId> {
        self.loading = true;
        self.is_error = false;
        PageRequest {
            target: self.post.clone(),
            continue_after,
        }
    }

    /// A page for another post leaves every flag as is: the load that
    /// superseded it is still in flight.
    pub fn finish_load(&mut self, req: PageRequest<PostId>, res: Result<CommentPage, Error>) {
        if req.target != self.post {
            tracing::warn!(
                expected = %self.post,
                got = %req.target,
                "ignoring comment page for another post"
            );
            return;
        }
        self.loading = false;
        match res {
            Ok(page) => {
                match req.continue_after {
                    None => self.comments = page.comments,
                    Some(_) => page::append_page(&mut self.comments, page.comments),
                }
                self.pagination_end = Some(page.end_of_pagination_reached);
                tracing::debug!(
                    post = %self.post,
                    num_comments = self.comments.len(),
                    end = page.end_of_pagination_reached,
                    "loaded comment page"
                );
            }
            Err(err) => {
                tracing::error!(?err, post = %self.post, "failed loading comments");
                self.is_error = true;
            }
        }
    }

    pub async fn load_next_page<A>(&mut self, api: &A, continue_after: Option<CommentId>)
    where
        A: CommentApi + ?Sized,
    {
        let req = self.begin_load(continue_after);
        let res = req.fetch(api).await;
        self.finish_load(req, res);
    }

    fn show_more_visible(&self) -> bool {
        !self.loading && self.pagination_end != Some(true)
    }

    /// Start loading the page after the last known comment, if the
    /// "show more" control is currently visible
    pub fn show_more(&mut self) -> Option<PageRequest<PostId>> {
        if !self.show_more_visible() {
            return None;
        }
        let cursor = self.comments.last().map(|c| c.id.clone());
        Some(self.begin_load(cursor))
    }

    pub fn footer(&self) -> ListFooter {
        ListFooter {
            empty_message: (self.pagination_end == Some(true) && self.comments.is_empty())
                .then_some(NO_COMMENTS_YET),
            loading: self.loading,
            error_message: self.is_error.then_some(COMMENTS_LOAD_FAILED),
            load_more_label: self
                .show_more_visible()
                .then(|| String::from(SHOW_MORE_COMMENTS)),
        }
    }

    pub fn on_comment_created(&mut self, comment: Comment) {
        if self.comments.iter().any(|c| c.id == comment.id) {
            tracing::warn!(id = %comment.id, "created comment is already listed");
            return;
        }
        self.comments.insert(0, comment);
    }

    /// The reply count known locally wins over the one in `updated`
    pub fn on_comment_updated(&mut self, mut updated: Comment) {
        match self.comments.iter_mut().find(|c| c.id == updated.id) {
            Some(c) => {
                updated.replies_count = c.replies_count;
                *c = updated;
            }
            None => tracing::debug!(id = %updated.id, "updated comment is not listed"),
        }
    }

    pub fn on_comment_deleted(&mut self, id: &CommentId) {
        page::remove_by_id(&mut self.comments, id);
    }
}
