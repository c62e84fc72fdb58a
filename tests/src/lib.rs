use quill_api::{Comment, PostId, User};
use quill_mock_server::MockServer;
use rand::Rng;

pub const NUM_USERS: usize = 5;
pub const NUM_ROOTS: usize = 25;
pub const MAX_REPLIES: usize = 8;
pub const MAX_COMMENT_WORDS: usize = 40;

const USERNAMES: &[&str] = &[
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy",
];

fn gen_comment_text(rng: &mut impl Rng) -> String {
    let words = rng.gen_range(1..=MAX_COMMENT_WORDS);
    lipsum::lipsum_words_from_seed(words, rng.gen())
}

/// Fill `server` with users, and comments on `post` from these users
///
/// Some replies address another reply's author with an `@username` prefix,
/// the way the reply form pre-fills them.
pub fn populate(
    server: &mut MockServer,
    rng: &mut impl Rng,
    post: &PostId,
    num_users: usize,
    num_roots: usize,
) -> Vec<User> {
    let users = (0..num_users)
        .map(|i| server.add_user(&format!("{}{i}", USERNAMES[i % USERNAMES.len()])))
        .collect::<Vec<_>>();
    for _ in 0..num_roots {
        let author = &users[rng.gen_range(0..users.len())];
        let text = gen_comment_text(rng);
        let root = server.seed_comment(&author.id, post, None, &text);
        let mut replies: Vec<Comment> = Vec::new();
        for _ in 0..rng.gen_range(0..=MAX_REPLIES) {
            let author = &users[rng.gen_range(0..users.len())];
            let mut text = gen_comment_text(rng);
            if !replies.is_empty() && rng.gen_bool(0.3) {
                let addressed = &replies[rng.gen_range(0..replies.len())];
                text = format!("@{} {text}", addressed.author.username);
            }
            replies.push(server.seed_comment(&author.id, post, Some(&root.id), &text));
        }
    }
    users
}

#[cfg(test)]
mod scenarios;
