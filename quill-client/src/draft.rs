use crate::{
    api::{Comment, CommentApi, CommentId, Error, NewComment, PostId, COMMENT_MAX_LEN},
    Session,
};

/// Shown instead of the composer when nobody is logged in
pub const LOGIN_TO_COMMENT: &str = "Log in to write a comment";

/// Text being typed in a comment form
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    default_text: String,
    text: String,
    submitting: bool,
}

fn truncated(text: &str) -> String {
    text.chars().take(COMMENT_MAX_LEN).collect()
}

impl Draft {
    pub fn new(default_text: &str) -> Draft {
        let default_text = truncated(default_text);
        Draft {
            text: default_text.clone(),
            default_text,
            submitting: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = truncated(text);
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Returns the text to send, or `None` if there is nothing to send or a
    /// submission is already in flight
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.submitting || self.text.is_empty() {
            return None;
        }
        self.submitting = true;
        Some(self.text.clone())
    }

    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.text = self.default_text.clone();
        }
    }
}

/// Form creating a root comment or a reply
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentComposer {
    post_id: PostId,
    parent_comment_id: Option<CommentId>,
    draft: Draft,
}

impl CommentComposer {
    pub fn new_comment(post_id: PostId) -> CommentComposer {
        CommentComposer {
            post_id,
            parent_comment_id: None,
            draft: Draft::new(""),
        }
    }

    /// Replies to replies are attached to the thread's root, addressed to the
    /// replied-to author with an `@username` prefix.
    pub fn reply_to(comment: &Comment) -> CommentComposer {
        let default_text = match comment.is_reply() {
            true => format!("@{} ", comment.author.username),
            false => String::new(),
        };
        CommentComposer {
            post_id: comment.post_id.clone(),
            parent_comment_id: Some(comment.thread_root_id().clone()),
            draft: Draft::new(&default_text),
        }
    }

    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    pub fn parent_comment_id(&self) -> Option<&CommentId> {
        self.parent_comment_id.as_ref()
    }

    pub fn is_available(&self, session: &Session) -> bool {
        session.is_logged_in()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn begin_submit(&mut self) -> Option<NewComment> {
        let text = self.draft.begin_submit()?;
        Some(NewComment {
            post_id: self.post_id.clone(),
            parent_comment_id: self.parent_comment_id.clone(),
            text,
        })
    }

    /// Resets the draft to its default text on success
    pub fn finish_submit(&mut self, res: Result<Comment, Error>) -> Result<Comment, Error> {
        self.draft.finish_submit(res.is_ok());
        if let Err(err) = &res {
            tracing::error!(?err, post = %self.post_id, "failed creating comment");
        }
        res
    }

    pub async fn submit<A>(&mut self, api: &A) -> Option<Result<Comment, Error>>
    where
        A: CommentApi + ?Sized,
    {
        let new = self.begin_submit()?;
        let res = api
            .create_comment(&new.post_id, new.parent_comment_id.as_ref(), &new.text)
            .await;
        Some(self.finish_submit(res))
    }
}
