use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    sync::Arc,
};

use async_trait::async_trait;
use parking_lot::Mutex;
use quill_api::{
    Comment, CommentApi, CommentAuthor, CommentId, CommentPage, Error, PostId, Time, User, UserId,
    COMMENT_MAX_LEN,
};
use uuid::Uuid;

pub const DEFAULT_ROOT_PAGE_SIZE: usize = 10;
pub const DEFAULT_REPLY_PAGE_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SessionToken(pub Uuid);

/// In-memory stand-in for the blog's REST backend
///
/// Comment ids are allocated in increasing order, so that cursors compare the
/// same way the real server's object ids do: a cursor stays valid even after
/// the comment it designates has been deleted.
pub struct MockServer {
    users: BTreeMap<UserId, User>,
    sessions: HashMap<SessionToken, UserId>,
    comments: BTreeMap<CommentId, Comment>,
    now: Time,
    next_id: u64,
    root_page_size: usize,
    reply_page_size: usize,
    injected_failures: VecDeque<Error>,
    calls: usize,
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            users: BTreeMap::new(),
            sessions: HashMap::new(),
            comments: BTreeMap::new(),
            now: chrono::DateTime::parse_from_rfc3339("2023-01-01T00:00:00Z")
                .expect("parsing mock server epoch")
                .with_timezone(&chrono::Utc),
            next_id: 1,
            root_page_size: DEFAULT_ROOT_PAGE_SIZE,
            reply_page_size: DEFAULT_REPLY_PAGE_SIZE,
            injected_failures: VecDeque::new(),
            calls: 0,
        }
    }

    pub fn with_page_sizes(mut self, roots: usize, replies: usize) -> MockServer {
        self.root_page_size = roots;
        self.reply_page_size = replies;
        self
    }

    /// Wrap this server so that it can be shared by several viewers
    pub fn shared(self) -> Arc<Mutex<MockServer>> {
        Arc::new(Mutex::new(self))
    }

    fn tick(&mut self) -> Time {
        self.now = self.now + chrono::Duration::seconds(1);
        self.now
    }

    fn alloc_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}{:08}", self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_user(&mut self, username: &str) -> User {
        let user = User {
            id: UserId(self.alloc_id("u")),
            username: String::from(username),
            display_name: None,
            about: None,
            profile_pic_url: None,
            created_at: Some(self.tick()),
        };
        self.users.insert(user.id.clone(), user.clone());
        user
    }

    pub fn login(&mut self, user: &UserId) -> Result<SessionToken, Error> {
        if !self.users.contains_key(user) {
            return Err(Error::Unauthorized);
        }
        let tok = SessionToken(Uuid::new_v4());
        self.sessions.insert(tok, user.clone());
        Ok(tok)
    }

    pub fn logout(&mut self, tok: SessionToken) {
        self.sessions.remove(&tok);
    }

    /// Make the next API call fail with `err`, without touching any data
    pub fn fail_next(&mut self, err: Error) {
        self.injected_failures.push_back(err);
    }

    /// Number of API calls received so far
    pub fn call_count(&self) -> usize {
        self.calls
    }

    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.get(id)
    }

    pub fn num_comments(&self) -> usize {
        self.comments.len()
    }

    /// Insert a comment directly, bypassing sessions and validation
    pub fn seed_comment(
        &mut self,
        author: &UserId,
        post: &PostId,
        parent: Option<&CommentId>,
        text: &str,
    ) -> Comment {
        let author = self
            .users
            .get(author)
            .unwrap_or_else(|| panic!("seeding comment for unknown user {author}"))
            .as_author();
        self.insert_comment(author, post, parent.cloned(), text)
    }

    fn insert_comment(
        &mut self,
        author: CommentAuthor,
        post: &PostId,
        parent: Option<CommentId>,
        text: &str,
    ) -> Comment {
        let date = self.tick();
        let c = Comment {
            id: CommentId(self.alloc_id("c")),
            post_id: post.clone(),
            parent_comment_id: parent,
            author,
            text: String::from(text),
            created_at: date,
            updated_at: date,
            replies_count: None,
        };
        self.comments.insert(c.id.clone(), c.clone());
        c
    }

    fn begin_call(&mut self) -> Result<(), Error> {
        self.calls += 1;
        match self.injected_failures.pop_front() {
            Some(err) => {
                tracing::debug!(?err, "failing mock call on request");
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn resolve(&self, tok: Option<SessionToken>) -> Result<&User, Error> {
        tok.and_then(|t| self.sessions.get(&t))
            .and_then(|u| self.users.get(u))
            .ok_or(Error::Unauthorized)
    }

    fn count_replies(&self, id: &CommentId) -> u64 {
        self.comments
            .values()
            .filter(|c| c.parent_comment_id.as_ref() == Some(id))
            .count() as u64
    }

    fn with_replies_count(&self, c: &Comment) -> Comment {
        let mut c = c.clone();
        c.replies_count = Some(self.count_replies(&c.id));
        c
    }

    fn paginate<'a>(
        &self,
        matching: impl Iterator<Item = &'a Comment>,
        page_size: usize,
    ) -> CommentPage {
        let mut comments = matching
            .take(page_size + 1)
            .map(|c| self.with_replies_count(c))
            .collect::<Vec<_>>();
        let end_of_pagination_reached = comments.len() <= page_size;
        comments.truncate(page_size);
        CommentPage {
            comments,
            end_of_pagination_reached,
        }
    }

    /// Root comments of `post`, newest first
    pub fn get_comments_for_post(
        &mut self,
        post: &PostId,
        continue_after: Option<&CommentId>,
    ) -> Result<CommentPage, Error> {
        self.begin_call()?;
        let roots = self.comments.values().rev().filter(|c| {
            c.post_id == *post
                && c.parent_comment_id.is_none()
                && continue_after.map(|after| c.id < *after).unwrap_or(true)
        });
        Ok(self.paginate(roots, self.root_page_size))
    }

    /// Replies to `comment`, oldest first
    pub fn get_replies_for_comment(
        &mut self,
        comment: &CommentId,
        continue_after: Option<&CommentId>,
    ) -> Result<CommentPage, Error> {
        self.begin_call()?;
        let replies = self.comments.values().filter(|c| {
            c.parent_comment_id.as_ref() == Some(comment)
                && continue_after.map(|after| c.id > *after).unwrap_or(true)
        });
        Ok(self.paginate(replies, self.reply_page_size))
    }

    pub fn create_comment(
        &mut self,
        tok: Option<SessionToken>,
        post: &PostId,
        parent: Option<&CommentId>,
        text: &str,
    ) -> Result<Comment, Error> {
        self.begin_call()?;
        let author = self.resolve(tok)?.as_author();
        validate_text(text)?;
        let parent = match parent {
            None => None,
            Some(p) => {
                let parent = self
                    .comments
                    .get(p)
                    .ok_or_else(|| Error::NotFound(format!("Parent comment {p} not found")))?;
                if parent.post_id != *post {
                    return Err(Error::BadRequest(String::from(
                        "Parent comment belongs to another post",
                    )));
                }
                Some(parent.thread_root_id().clone())
            }
        };
        Ok(self.insert_comment(author, post, parent, text))
    }

    pub fn update_comment(
        &mut self,
        tok: Option<SessionToken>,
        id: &CommentId,
        text: &str,
    ) -> Result<Comment, Error> {
        self.begin_call()?;
        let user = self.resolve(tok)?.id.clone();
        validate_text(text)?;
        let date = self.tick();
        let c = self
            .comments
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("Comment {id} not found")))?;
        if c.author.id != user {
            return Err(Error::Forbidden);
        }
        c.text = String::from(text);
        c.updated_at = date;
        Ok(c.clone())
    }

    pub fn delete_comment(&mut self, tok: Option<SessionToken>, id: &CommentId) -> Result<(), Error> {
        self.begin_call()?;
        let user = self.resolve(tok)?.id.clone();
        let c = self
            .comments
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("Comment {id} not found")))?;
        if c.author.id != user {
            return Err(Error::Forbidden);
        }
        self.comments
            .retain(|cid, c| cid != id && c.parent_comment_id.as_ref() != Some(id));
        Ok(())
    }

    pub fn authenticated_user(&mut self, tok: Option<SessionToken>) -> Result<User, Error> {
        self.begin_call()?;
        self.resolve(tok).cloned()
    }
}

fn validate_text(text: &str) -> Result<(), Error> {
    if text.trim().is_empty() {
        return Err(Error::BadRequest(String::from("Comment text is required")));
    }
    if text.chars().count() > COMMENT_MAX_LEN {
        return Err(Error::BadRequest(format!(
            "Comment text is longer than {COMMENT_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// A viewer's connection to a shared `MockServer`
#[derive(Clone)]
pub struct MockApi {
    server: Arc<Mutex<MockServer>>,
    session: Option<SessionToken>,
}

impl MockApi {
    pub fn anonymous(server: Arc<Mutex<MockServer>>) -> MockApi {
        MockApi {
            server,
            session: None,
        }
    }

    pub fn logged_in(server: Arc<Mutex<MockServer>>, user: &UserId) -> Result<MockApi, Error> {
        let session = Some(server.lock().login(user)?);
        Ok(MockApi { server, session })
    }

    pub fn server(&self) -> &Arc<Mutex<MockServer>> {
        &self.server
    }
}

#[async_trait(?Send)]
impl CommentApi for MockApi {
    async fn get_comments_for_post(
        &self,
        post: &PostId,
        continue_after: Option<&CommentId>,
    ) -> Result<CommentPage, Error> {
        self.server.lock().get_comments_for_post(post, continue_after)
    }

    async fn get_replies_for_comment(
        &self,
        comment: &CommentId,
        continue_after: Option<&CommentId>,
    ) -> Result<CommentPage, Error> {
        self.server
            .lock()
            .get_replies_for_comment(comment, continue_after)
    }

    async fn create_comment(
        &self,
        post: &PostId,
        parent: Option<&CommentId>,
        text: &str,
    ) -> Result<Comment, Error> {
        self.server
            .lock()
            .create_comment(self.session, post, parent, text)
    }

    async fn update_comment(&self, comment: &CommentId, text: &str) -> Result<Comment, Error> {
        self.server.lock().update_comment(self.session, comment, text)
    }

    async fn delete_comment(&self, comment: &CommentId) -> Result<(), Error> {
        self.server.lock().delete_comment(self.session, comment)
    }

    async fn authenticated_user(&self) -> Result<Option<User>, Error> {
        match self.server.lock().authenticated_user(self.session) {
            Ok(u) => Ok(Some(u)),
            Err(Error::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
