use async_trait::async_trait;

use crate::{Comment, CommentId, CommentPage, Error, PostId, User};

/// The blog's comment REST API, as seen by the client
///
/// Listing calls are cursor-based: `continue_after` is the id of the last
/// comment already known, and the returned page starts right after it.
///
/// Futures are not required to be `Send`, everything runs on the UI thread.
#[async_trait(?Send)]
pub trait CommentApi {
    async fn get_comments_for_post(
        &self,
        post: &PostId,
        continue_after: Option<&CommentId>,
    ) -> Result<CommentPage, Error>;

    async fn get_replies_for_comment(
        &self,
        comment: &CommentId,
        continue_after: Option<&CommentId>,
    ) -> Result<CommentPage, Error>;

    async fn create_comment(
        &self,
        post: &PostId,
        parent: Option<&CommentId>,
        text: &str,
    ) -> Result<Comment, Error>;

    async fn update_comment(&self, comment: &CommentId, text: &str) -> Result<Comment, Error>;

    /// Fails with `Error::NotFound` if the comment is already gone
    async fn delete_comment(&self, comment: &CommentId) -> Result<(), Error>;

    /// Returns `None` when nobody is logged in
    async fn authenticated_user(&self) -> Result<Option<User>, Error>;
}
