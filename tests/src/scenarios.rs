use std::sync::Arc;

use parking_lot::Mutex;
use quill_api::{CommentApi, Error, PostId};
use quill_client::{
    CommentNode, CommentSection, CommentThread, Panel, Provenance, ReplyIntent, Session,
};
use quill_mock_server::{MockApi, MockServer};
use rand::{rngs::StdRng, SeedableRng};

fn post() -> PostId {
    PostId::from("post")
}

async fn load_all_roots(section: &mut CommentSection, api: &MockApi) {
    while let Some(req) = section.show_more() {
        let res = req.fetch(api).await;
        section.finish_load(req, res);
        assert!(!section.is_error());
    }
}

async fn load_all_replies(thread: &mut CommentThread, api: &MockApi) {
    while thread.load_replies_label().is_some() {
        thread.load_next_replies_page(api).await;
        assert!(!thread.is_error());
    }
}

#[tokio::test]
async fn empty_post_shows_empty_state() {
    let api = MockApi::anonymous(MockServer::new().shared());
    let mut section = CommentSection::new(post());
    section.load_next_page(&api, None).await;

    let footer = section.footer();
    assert_eq!(footer.empty_message, Some(quill_client::NO_COMMENTS_YET));
    assert_eq!(footer.load_more_label, None);
    assert!(section.show_more().is_none());
}

#[tokio::test]
async fn reply_control_counts_down_to_show_more() {
    let mut server = MockServer::new().with_page_sizes(10, 2);
    let u = server.add_user("alice");
    let root = server.seed_comment(&u.id, &post(), None, "root");
    for i in 0..3 {
        server.seed_comment(&u.id, &post(), Some(&root.id), &format!("reply {i}"));
    }
    let api = MockApi::anonymous(server.shared());

    let mut section = CommentSection::new(post());
    section.load_next_page(&api, None).await;
    let mut thread = CommentThread::new(section.comments()[0].clone());
    assert_eq!(thread.load_replies_label().as_deref(), Some("Show 3 replies"));

    thread.load_next_replies_page(&api).await;
    assert_eq!(thread.remote_replies().len(), 2);
    assert_eq!(
        thread.load_replies_label().as_deref(),
        Some("Show more replies")
    );

    thread.load_next_replies_page(&api).await;
    assert_eq!(thread.remote_replies().len(), 3);
    assert_eq!(thread.load_replies_label(), None);
}

#[tokio::test]
async fn reply_to_reply_lands_in_thread_root() {
    let mut server = MockServer::new();
    let alice = server.add_user("alice");
    let bob = server.add_user("bob");
    let carol = server.add_user("carol");
    let root = server.seed_comment(&alice.id, &post(), None, "root");
    server.seed_comment(&bob.id, &post(), Some(&root.id), "first!");
    let server = server.shared();
    let api = MockApi::logged_in(server.clone(), &carol.id).unwrap();
    let session = Session::resolve(&api).await.unwrap();

    let mut section = CommentSection::new(post());
    section.load_next_page(&api, None).await;
    let mut thread = CommentThread::new(section.comments()[0].clone());
    load_all_replies(&mut thread, &api).await;

    let mut node = CommentNode::new(thread.remote_replies()[0].clone());
    assert_eq!(node.reply_clicked(&session), ReplyIntent::Compose);
    let composer = node.composer_mut().unwrap();
    assert_eq!(composer.draft().text(), "@bob ");
    composer.draft_mut().set_text("@bob welcome");

    let reply = node.submit_reply(&api).await.unwrap().unwrap();
    assert_eq!(reply.parent_comment_id.as_ref(), Some(&root.id));
    assert_eq!(*node.panel(), Panel::Closed);
    thread.on_reply_created(reply.clone());
    assert_eq!(
        thread.replies().map(|(from, _)| from).collect::<Vec<_>>(),
        vec![Provenance::Remote, Provenance::Local]
    );
    assert_eq!(server.lock().comment(&reply.id).unwrap().text, "@bob welcome");
}

#[tokio::test]
async fn local_reply_is_not_duplicated_by_next_fetch() {
    let mut server = MockServer::new().with_page_sizes(10, 1);
    let alice = server.add_user("alice");
    let root = server.seed_comment(&alice.id, &post(), None, "root");
    server.seed_comment(&alice.id, &post(), Some(&root.id), "one");
    server.seed_comment(&alice.id, &post(), Some(&root.id), "two");
    let api = MockApi::logged_in(server.shared(), &alice.id).unwrap();

    let mut section = CommentSection::new(post());
    section.load_next_page(&api, None).await;
    let mut thread = CommentThread::new(section.comments()[0].clone());
    thread.load_next_replies_page(&api).await;
    assert_eq!(thread.remote_replies().len(), 1);

    let reply = api
        .create_comment(&post(), Some(&root.id), "three")
        .await
        .unwrap();
    thread.on_reply_created(reply);
    assert_eq!(thread.replies().count(), 2);

    load_all_replies(&mut thread, &api).await;
    let texts = thread
        .replies()
        .map(|(_, c)| c.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(texts, vec!["one", "two", "three"]);
    assert!(thread.local_replies().is_empty());
}

#[tokio::test]
async fn deleting_vanished_comment_removes_it() {
    let mut server = MockServer::new();
    let alice = server.add_user("alice");
    server.seed_comment(&alice.id, &post(), None, "oops");
    let server = server.shared();
    let first_tab = MockApi::logged_in(server.clone(), &alice.id).unwrap();
    let other_tab = MockApi::logged_in(server.clone(), &alice.id).unwrap();
    let session = Session::resolve(&first_tab).await.unwrap();

    let mut section = CommentSection::new(post());
    section.load_next_page(&first_tab, None).await;
    let mut node = CommentNode::new(section.comments()[0].clone());
    assert!(node.delete_clicked(&session));

    other_tab
        .delete_comment(&node.comment().id)
        .await
        .unwrap();
    let id = node.delete(&first_tab).await.unwrap().unwrap();
    section.on_comment_deleted(&id);

    assert!(section.comments().is_empty());
    assert!(section.footer().empty_message.is_some());
    assert_eq!(server.lock().num_comments(), 0);
}

#[tokio::test]
async fn failed_page_keeps_list_and_retries_same_cursor() {
    let mut server = MockServer::new().with_page_sizes(2, 2);
    let alice = server.add_user("alice");
    for i in 0..4 {
        server.seed_comment(&alice.id, &post(), None, &format!("c{i}"));
    }
    let server = server.shared();
    let api = MockApi::anonymous(server.clone());

    let mut section = CommentSection::new(post());
    section.load_next_page(&api, None).await;
    assert_eq!(section.comments().len(), 2);

    server
        .lock()
        .fail_next(Error::Network(String::from("connection reset")));
    let req = section.show_more().unwrap();
    let res = req.fetch(&api).await;
    section.finish_load(req, res);
    assert!(section.is_error());
    assert_eq!(section.comments().len(), 2);

    load_all_roots(&mut section, &api).await;
    let texts = section
        .comments()
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(texts, vec!["c3", "c2", "c1", "c0"]);
}

#[tokio::test]
async fn walking_generated_section_visits_every_comment_once() {
    let mut server = MockServer::new().with_page_sizes(4, 3);
    let mut rng = StdRng::seed_from_u64(42);
    crate::populate(&mut server, &mut rng, &post(), crate::NUM_USERS, crate::NUM_ROOTS);
    let total = server.num_comments();
    let server: Arc<Mutex<MockServer>> = server.shared();
    let api = MockApi::anonymous(server.clone());

    let mut section = CommentSection::new(post());
    load_all_roots(&mut section, &api).await;
    assert_eq!(section.comments().len(), crate::NUM_ROOTS);

    let mut seen = section.comments().len();
    for root in section.comments() {
        let mut thread = CommentThread::new(root.clone());
        load_all_replies(&mut thread, &api).await;
        assert_eq!(
            thread.remote_replies().len() as u64,
            root.replies_count.unwrap()
        );
        assert!(thread
            .remote_replies()
            .iter()
            .all(|r| r.parent_comment_id.as_ref() == Some(&root.id)));
        seen += thread.remote_replies().len();
    }
    assert_eq!(seen, total);
}

#[test]
fn generated_section_depends_only_on_seed() {
    let generate = |seed| {
        let mut server = MockServer::new().with_page_sizes(100, 100);
        let mut rng = StdRng::seed_from_u64(seed);
        crate::populate(&mut server, &mut rng, &post(), crate::NUM_USERS, crate::NUM_ROOTS);
        let roots = server.get_comments_for_post(&post(), None).unwrap().comments;
        roots
            .into_iter()
            .map(|c| (c.author.username, c.text, c.replies_count))
            .collect::<Vec<_>>()
    };
    let first = generate(7);
    assert_eq!(first.len(), crate::NUM_ROOTS);
    assert!(first.iter().all(|(_, text, _)| !text.is_empty()));
    assert_eq!(first, generate(7));
}
