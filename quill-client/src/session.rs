use crate::api::{Comment, CommentApi, Error, User};

/// Who is looking at the comments
///
/// Passed explicitly down to every controller that needs to gate an action on
/// the viewer's identity.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Session {
        Session { user: None }
    }

    pub fn logged_in(user: User) -> Session {
        Session { user: Some(user) }
    }

    /// Ask the server who we are. Not being logged in is not an error.
    pub async fn resolve<A>(api: &A) -> Result<Session, Error>
    where
        A: CommentApi + ?Sized,
    {
        match api.authenticated_user().await {
            Ok(user) => Ok(Session { user }),
            Err(Error::Unauthorized) => Ok(Session::anonymous()),
            Err(e) => Err(e),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_author_of(&self, comment: &Comment) -> bool {
        self.user
            .as_ref()
            .map(|u| u.id == comment.author.id)
            .unwrap_or(false)
    }
}
