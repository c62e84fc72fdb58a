use crate::{
    api::{Comment, CommentApi, CommentId, CommentPage, Error},
    page::{self, ListFooter, PageRequest},
    pluralize,
};

pub const REPLIES_LOAD_FAILED: &str = "Replies could not be loaded";
pub const SHOW_MORE_REPLIES: &str = "Show more replies";

/// Which list of a thread a reply currently lives in
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Provenance {
    /// Fetched from the server, page by page
    Remote,

    /// Created during this session, since the last page fetch
    Local,
}

/// A root comment along with its replies
///
/// Replies are fetched lazily, only once asked for. Replies posted from here
/// are kept in a separate local list, shown after the remote ones, which is
/// dropped whenever a new page arrives from the server.
#[derive(Clone, Debug)]
pub struct CommentThread {
    comment: Comment,
    remote_replies: Vec<Comment>,
    local_replies: Vec<Comment>,
    loading: bool,
    is_error: bool,

    /// `None` until the first page arrived
    pagination_end: Option<bool>,
}

impl CommentThread {
    pub fn new(comment: Comment) -> CommentThread {
        CommentThread {
            comment,
            remote_replies: Vec::new(),
            local_replies: Vec::new(),
            loading: false,
            is_error: false,
            pagination_end: None,
        }
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    /// Called when the root comment was changed from above
    pub fn set_comment(&mut self, comment: Comment) {
        if comment.id != self.comment.id {
            tracing::warn!(
                old = %self.comment.id,
                new = %comment.id,
                "replacing the root of a thread with another comment"
            );
        }
        self.comment = comment;
    }

    pub fn remote_replies(&self) -> &[Comment] {
        &self.remote_replies
    }

    pub fn local_replies(&self) -> &[Comment] {
        &self.local_replies
    }

    /// All replies in display order, remote ones first
    pub fn replies(&self) -> impl Iterator<Item = (Provenance, &Comment)> {
        self.remote_replies
            .iter()
            .map(|c| (Provenance::Remote, c))
            .chain(self.local_replies.iter().map(|c| (Provenance::Local, c)))
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

    pub fn begin_load_replies(&mut self) -> PageRequest<CommentId> {
        self.loading = true;
        self.is_error = false;
        PageRequest {
            target: self.comment.id.clone(),
            continue_after: self.remote_replies.last().map(|c| c.id.clone()),
        }
    }

    /// A successful fetch drops all local replies: they are assumed to be
    /// part of the server's state by now.
    pub fn finish_load_replies(
        &mut self,
        req: PageRequest<CommentId>,
        res: Result<CommentPage, Error>,
    ) {
        if req.target != self.comment.id {
            tracing::warn!(
                expected = %self.comment.id,
                got = %req.target,
                "ignoring reply page for another comment"
            );
            return;
        }
        self.loading = false;
        match res {
            Ok(page) => {
                page::append_page(&mut self.remote_replies, page.comments);
                self.pagination_end = Some(page.end_of_pagination_reached);
                if !self.local_replies.is_empty() {
                    tracing::debug!(
                        comment = %self.comment.id,
                        num_dropped = self.local_replies.len(),
                        "dropping local replies after page fetch"
                    );
                }
                self.local_replies.clear();
            }
            Err(err) => {
                tracing::error!(?err, comment = %self.comment.id, "failed loading replies");
                self.is_error = true;
            }
        }
    }

    pub async fn load_next_replies_page<A>(&mut self, api: &A)
    where
        A: CommentApi + ?Sized,
    {
        let req = self.begin_load_replies();
        let res = req.fetch(api).await;
        self.finish_load_replies(req, res);
    }

    /// Label of the "load replies" control, `None` when it is hidden
    ///
    /// Relies on the reply count from when the root comment was fetched.
    pub fn load_replies_label(&self) -> Option<String> {
        let count = self.comment.replies_count.unwrap_or(0);
        if count == 0 || self.loading || self.pagination_end == Some(true) {
            return None;
        }
        Some(match self.pagination_end {
            None => format!("Show {}", pluralize(count, "reply", "replies")),
            Some(_) => String::from(SHOW_MORE_REPLIES),
        })
    }

    pub fn footer(&self) -> ListFooter {
        ListFooter {
            empty_message: None,
            loading: self.loading,
            error_message: self.is_error.then_some(REPLIES_LOAD_FAILED),
            load_more_label: self.load_replies_label(),
        }
    }

    pub fn on_reply_created(&mut self, reply: Comment) {
        if self.local_replies.iter().any(|c| c.id == reply.id) {
            tracing::warn!(id = %reply.id, "created reply is already listed");
            return;
        }
        self.local_replies.push(reply);
    }

    pub fn on_remote_reply_updated(&mut self, reply: Comment) {
        page::replace_by_id(&mut self.remote_replies, reply);
    }

    pub fn on_remote_reply_deleted(&mut self, id: &CommentId) {
        page::remove_by_id(&mut self.remote_replies, id);
    }

    pub fn on_local_reply_updated(&mut self, reply: Comment) {
        page::replace_by_id(&mut self.local_replies, reply);
    }

    pub fn on_local_reply_deleted(&mut self, id: &CommentId) {
        page::remove_by_id(&mut self.local_replies, id);
    }

    pub fn on_reply_updated(&mut self, from: Provenance, reply: Comment) {
        match from {
            Provenance::Remote => self.on_remote_reply_updated(reply),
            Provenance::Local => self.on_local_reply_updated(reply),
        }
    }

    pub fn on_reply_deleted(&mut self, from: Provenance, id: &CommentId) {
        match from {
            Provenance::Remote => self.on_remote_reply_deleted(id),
            Provenance::Local => self.on_local_reply_deleted(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use quill_mock_server::{MockApi, MockServer};

    use super::*;
    use crate::{
        api::PostId,
        page::tests::{comment, ids},
    };

    fn root(replies_count: u64) -> Comment {
        let mut c = comment("root", None);
        c.replies_count = Some(replies_count);
        c
    }

    fn page(ids: &[&str], end: bool) -> Result<CommentPage, Error> {
        Ok(CommentPage {
            comments: ids.iter().map(|id| comment(id, Some("root"))).collect(),
            end_of_pagination_reached: end,
        })
    }

    fn local_ids(t: &CommentThread) -> Vec<&str> {
        ids(t.local_replies())
    }

    #[test]
    fn label_follows_pagination() {
        let mut t = CommentThread::new(root(3));
        assert_eq!(t.load_replies_label().as_deref(), Some("Show 3 replies"));
        let req = t.begin_load_replies();
        assert_eq!(req.continue_after, None);
        assert_eq!(t.load_replies_label(), None, "hidden while loading");
        t.finish_load_replies(req, page(&["r1", "r2"], false));
        assert_eq!(t.load_replies_label().as_deref(), Some(SHOW_MORE_REPLIES));

        let req = t.begin_load_replies();
        assert_eq!(req.continue_after, Some(CommentId::from("r2")));
        t.finish_load_replies(req, page(&["r3"], true));
        assert_eq!(t.load_replies_label(), None);
        assert_eq!(ids(t.remote_replies()), vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn label_for_single_or_no_reply() {
        assert_eq!(
            CommentThread::new(root(1)).load_replies_label().as_deref(),
            Some("Show 1 reply")
        );
        assert_eq!(CommentThread::new(root(0)).load_replies_label(), None);
        assert_eq!(
            CommentThread::new(comment("root", None)).load_replies_label(),
            None
        );
    }

    #[test]
    fn created_replies_stay_local() {
        let mut t = CommentThread::new(root(2));
        let req = t.begin_load_replies();
        t.finish_load_replies(req, page(&["r1"], false));
        t.on_reply_created(comment("l1", Some("root")));
        t.on_reply_created(comment("l2", Some("root")));
        assert_eq!(ids(t.remote_replies()), vec!["r1"]);
        assert_eq!(local_ids(&t), vec!["l1", "l2"]);
        assert_eq!(
            t.replies().map(|(p, c)| (p, c.id.as_str())).collect::<Vec<_>>(),
            vec![
                (Provenance::Remote, "r1"),
                (Provenance::Local, "l1"),
                (Provenance::Local, "l2"),
            ]
        );
    }

    #[test]
    fn page_fetch_clears_local_replies() {
        let mut t = CommentThread::new(root(1));
        t.on_reply_created(comment("l1", Some("root")));
        let req = t.begin_load_replies();
        t.finish_load_replies(req, page(&["r1"], true));
        assert!(t.local_replies().is_empty());

        // failed fetches keep them
        t.on_reply_created(comment("l2", Some("root")));
        let req = t.begin_load_replies();
        t.finish_load_replies(req, Err(Error::Network(String::from("offline"))));
        assert_eq!(local_ids(&t), vec!["l2"]);
        assert!(t.is_error());
        assert_eq!(t.footer().error_message, Some(REPLIES_LOAD_FAILED));
    }

    #[test]
    fn mutations_are_routed_by_provenance() {
        let mut t = CommentThread::new(root(1));
        let req = t.begin_load_replies();
        t.finish_load_replies(req, page(&["r1"], true));
        t.on_reply_created(comment("l1", Some("root")));

        let mut edited = comment("l1", Some("root"));
        edited.text = String::from("edited");
        t.on_reply_updated(Provenance::Remote, edited.clone());
        assert_eq!(t.local_replies()[0].text, "text of l1");
        t.on_reply_updated(Provenance::Local, edited);
        assert_eq!(t.local_replies()[0].text, "edited");

        t.on_reply_deleted(Provenance::Local, &CommentId::from("r1"));
        assert_eq!(ids(t.remote_replies()), vec!["r1"]);
        t.on_reply_deleted(Provenance::Remote, &CommentId::from("r1"));
        t.on_reply_deleted(Provenance::Local, &CommentId::from("l1"));
        assert_eq!(t.replies().count(), 0);
    }

    #[test]
    fn stale_page_leaves_current_load_in_charge() {
        let mut t = CommentThread::new(root(1));
        let req = t.begin_load_replies();
        let stale = PageRequest {
            target: CommentId::from("other"),
            continue_after: None,
        };
        t.finish_load_replies(stale, page(&["x"], true));
        assert!(t.remote_replies().is_empty());
        assert!(t.is_loading());
        assert_eq!(t.pagination_end(), None);

        t.finish_load_replies(req, page(&["r1"], true));
        assert!(!t.is_loading());
        assert_eq!(ids(t.remote_replies()), vec!["r1"]);
        assert_eq!(t.load_replies_label(), None);
    }

    #[tokio::test]
    async fn lazily_loads_replies_from_server() {
        let server = MockServer::new().with_page_sizes(10, 2).shared();
        let alice = server.lock().add_user("alice");
        let post = PostId::from("post");
        let root = server.lock().seed_comment(&alice.id, &post, None, "root");
        for i in 0..3 {
            server
                .lock()
                .seed_comment(&alice.id, &post, Some(&root.id), &format!("reply {i}"));
        }
        let api = MockApi::logged_in(server.clone(), &alice.id).unwrap();
        let root = api
            .get_comments_for_post(&post, None)
            .await
            .unwrap()
            .comments
            .remove(0);
        let calls = server.lock().call_count();

        let mut t = CommentThread::new(root);
        assert_eq!(t.load_replies_label().as_deref(), Some("Show 3 replies"));
        assert_eq!(server.lock().call_count(), calls, "nothing fetched yet");

        t.load_next_replies_page(&api).await;
        assert_eq!(t.remote_replies().len(), 2);

        let reply = api
            .create_comment(&post, Some(&t.comment().id), "mine")
            .await
            .unwrap();
        t.on_reply_created(reply);
        assert_eq!(t.replies().count(), 3);

        t.load_next_replies_page(&api).await;
        let texts = t.replies().map(|(_, c)| &c.text as &str).collect::<Vec<_>>();
        assert_eq!(texts, vec!["reply 0", "reply 1", "reply 2", "mine"]);
        assert!(t.local_replies().is_empty());
        assert_eq!(t.pagination_end(), Some(true));
    }
}
