use crate::{
    api::{Comment, CommentApi, CommentId, Error},
    CommentComposer, Draft, Session,
};

pub const CONFIRM_DELETE: &str = "Do you really want to delete this comment?";

/// The form currently opened below a comment. At most one at a time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Panel {
    Closed,
    Editing(Draft),
    Replying(CommentComposer),
    ConfirmingDelete { pending: bool },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReplyIntent {
    /// The reply form was opened
    Compose,

    /// Nobody is logged in, the login prompt should be shown instead
    ShowLogin,
}

/// One comment, root or reply, with its reply/edit/delete affordances
#[derive(Clone, Debug)]
pub struct CommentNode {
    comment: Comment,
    panel: Panel,
}

impl CommentNode {
    pub fn new(comment: Comment) -> CommentNode {
        CommentNode {
            comment,
            panel: Panel::Closed,
        }
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: Comment) {
        self.comment = comment;
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    /// Only the author gets to see the edit and delete controls
    pub fn can_modify(&self, session: &Session) -> bool {
        session.is_author_of(&self.comment)
    }

    pub fn reply_clicked(&mut self, session: &Session) -> ReplyIntent {
        if !session.is_logged_in() {
            return ReplyIntent::ShowLogin;
        }
        self.panel = Panel::Replying(CommentComposer::reply_to(&self.comment));
        ReplyIntent::Compose
    }

    /// Returns whether the edit form was opened
    pub fn edit_clicked(&mut self, session: &Session) -> bool {
        if !self.can_modify(session) {
            return false;
        }
        self.panel = Panel::Editing(Draft::new(&self.comment.text));
        true
    }

    /// Returns whether the delete confirmation was opened
    pub fn delete_clicked(&mut self, session: &Session) -> bool {
        if !self.can_modify(session) {
            return false;
        }
        self.panel = Panel::ConfirmingDelete { pending: false };
        true
    }

    pub fn cancel(&mut self) {
        self.panel = Panel::Closed;
    }

    /// Returns the comment to delete, unless a deletion is already in flight
    /// or the confirmation is not shown
    pub fn begin_delete(&mut self) -> Option<CommentId> {
        match &mut self.panel {
            Panel::ConfirmingDelete { pending } if !*pending => {
                *pending = true;
                Some(self.comment.id.clone())
            }
            _ => None,
        }
    }

    /// Deleting a comment that is already gone counts as a success. On
    /// success, returns the id to remove from the list; on failure the
    /// confirmation stays open.
    pub fn finish_delete(&mut self, res: Result<(), Error>) -> Result<CommentId, Error> {
        match res {
            Ok(()) => {}
            Err(Error::NotFound(msg)) => {
                tracing::warn!(id = %self.comment.id, %msg, "comment to delete was already gone");
            }
            Err(err) => {
                tracing::error!(?err, id = %self.comment.id, "failed deleting comment");
                if let Panel::ConfirmingDelete { pending } = &mut self.panel {
                    *pending = false;
                }
                return Err(err);
            }
        }
        self.panel = Panel::Closed;
        Ok(self.comment.id.clone())
    }

    pub async fn delete<A>(&mut self, api: &A) -> Option<Result<CommentId, Error>>
    where
        A: CommentApi + ?Sized,
    {
        let id = self.begin_delete()?;
        let res = api.delete_comment(&id).await;
        Some(self.finish_delete(res))
    }

    /// Returns the new text to send, if the edit form has something to send
    pub fn begin_edit(&mut self) -> Option<String> {
        match &mut self.panel {
            Panel::Editing(draft) => draft.begin_submit(),
            _ => None,
        }
    }

    /// On success, closes the edit form and returns the comment to propagate
    pub fn finish_edit(&mut self, res: Result<Comment, Error>) -> Result<Comment, Error> {
        match res {
            Ok(updated) => {
                self.comment = updated.clone();
                self.panel = Panel::Closed;
                Ok(updated)
            }
            Err(err) => {
                tracing::error!(?err, id = %self.comment.id, "failed updating comment");
                if let Panel::Editing(draft) = &mut self.panel {
                    draft.finish_submit(false);
                }
                Err(err)
            }
        }
    }

    pub async fn submit_edit<A>(&mut self, api: &A) -> Option<Result<Comment, Error>>
    where
        A: CommentApi + ?Sized,
    {
        let text = self.begin_edit()?;
        let res = api.update_comment(&self.comment.id, &text).await;
        Some(self.finish_edit(res))
    }

    pub fn composer_mut(&mut self) -> Option<&mut CommentComposer> {
        match &mut self.panel {
            Panel::Replying(composer) => Some(composer),
            _ => None,
        }
    }

    /// On success, closes the reply form and returns the reply to propagate
    pub fn finish_reply(&mut self, res: Result<Comment, Error>) -> Result<Comment, Error> {
        let res = match self.composer_mut() {
            Some(composer) => composer.finish_submit(res),
            None => res,
        };
        if res.is_ok() {
            self.panel = Panel::Closed;
        }
        res
    }

    pub async fn submit_reply<A>(&mut self, api: &A) -> Option<Result<Comment, Error>>
    where
        A: CommentApi + ?Sized,
    {
        let new = self.composer_mut()?.begin_submit()?;
        let res = api
            .create_comment(&new.post_id, new.parent_comment_id.as_ref(), &new.text)
            .await;
        Some(self.finish_reply(res))
    }
}
