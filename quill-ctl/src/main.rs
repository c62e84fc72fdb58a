use anyhow::{anyhow, bail, Context};
use quill_client::{
    api::{Comment, CommentApi, CommentId, PostId},
    format_relative_date, pluralize, CommentComposer, CommentNode, CommentSection, CommentThread,
    HttpApi, Panel, ReplyIntent, Session, EDITED_MARKER,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Base url of the blog, eg. https://blog.example.org
    #[structopt(short, long, env = "QUILL_HOST")]
    host: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Show who the session cookie belongs to
    Whoami,

    /// List root comments of a post, newest first
    Comments {
        post: String,

        /// Continue after this comment
        #[structopt(long)]
        after: Option<String>,

        /// Fetch all the pages
        #[structopt(long)]
        all: bool,
    },

    /// List one page of replies to a comment, oldest first
    Replies {
        comment: String,

        /// Continue after this reply
        #[structopt(long)]
        after: Option<String>,
    },

    /// Show all comments of a post along with all their replies
    Thread { post: String },

    /// Write a comment, or a reply to an existing comment
    Post {
        post: String,
        text: String,

        #[structopt(long)]
        reply_to: Option<String>,
    },

    /// Change the text of one of your comments
    Edit {
        post: String,
        comment: String,
        text: String,
    },

    /// Delete one of your comments
    Delete { post: String, comment: String },
}

fn session_cookie() -> Option<String> {
    std::env::var("QUILL_SESSION").ok()
}

fn print_comment(c: &Comment, indent: &str) {
    let now = chrono::Utc::now();
    let edited = match c.is_edited() {
        true => format!(" {EDITED_MARKER}"),
        false => String::new(),
    };
    println!(
        "{indent}[{}] {}, {}{edited}",
        c.id,
        c.author.username,
        format_relative_date(now, c.created_at),
    );
    for line in c.text.lines() {
        println!("{indent}    {line}");
    }
    if let Some(n) = c.replies_count.filter(|n| *n > 0) {
        println!("{indent}    ({})", pluralize(n, "reply", "replies"));
    }
}

async fn load_all_comments<A>(api: &A, post: &PostId) -> anyhow::Result<CommentSection>
where
    A: CommentApi + ?Sized,
{
    let mut section = CommentSection::new(post.clone());
    section.load_next_page(api, None).await;
    loop {
        if section.is_error() {
            bail!("comments of post {post} could not be loaded");
        }
        match section.show_more() {
            None => return Ok(section),
            Some(req) => {
                let res = req.fetch(api).await;
                section.finish_load(req, res);
            }
        }
    }
}

async fn load_all_replies<A>(api: &A, root: Comment) -> anyhow::Result<CommentThread>
where
    A: CommentApi + ?Sized,
{
    let mut thread = CommentThread::new(root);
    while thread.load_replies_label().is_some() {
        thread.load_next_replies_page(api).await;
        if thread.is_error() {
            bail!("replies to comment {} could not be loaded", thread.comment().id);
        }
    }
    Ok(thread)
}

async fn find_comment<A>(api: &A, post: &PostId, id: &CommentId) -> anyhow::Result<Option<Comment>>
where
    A: CommentApi + ?Sized,
{
    let section = load_all_comments(api, post).await?;
    for root in section.comments() {
        if root.id == *id {
            return Ok(Some(root.clone()));
        }
    }
    for root in section.comments() {
        let thread = load_all_replies(api, root.clone()).await?;
        let found = thread
            .replies()
            .find(|(_, c)| c.id == *id)
            .map(|(_, c)| c.clone());
        if found.is_some() {
            return Ok(found);
        }
    }
    Ok(None)
}

async fn find_own_comment<A>(
    api: &A,
    session: &Session,
    post: &PostId,
    id: &CommentId,
) -> anyhow::Result<Option<CommentNode>>
where
    A: CommentApi + ?Sized,
{
    let node = match find_comment(api, post, id).await? {
        None => return Ok(None),
        Some(c) => CommentNode::new(c),
    };
    if !node.can_modify(session) {
        bail!("comment {id} was not written by you");
    }
    Ok(Some(node))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let api = match session_cookie() {
        None => HttpApi::new(opt.host),
        Some(cookie) => HttpApi::new(opt.host).with_session_cookie(cookie),
    };
    let session = Session::resolve(&api)
        .await
        .context("retrieving the authenticated user")?;
    tracing::debug!(user = ?session.user().map(|u| &u.username), "resolved session");

    match opt.cmd {
        Command::Whoami => match session.user() {
            None => println!("not logged in"),
            Some(u) => println!("{} ({})", u.username, u.id),
        },
        Command::Comments { post, after, all } => {
            let mut section = CommentSection::new(PostId(post));
            section
                .load_next_page(&api, after.map(CommentId))
                .await;
            while all && !section.is_error() {
                match section.show_more() {
                    None => break,
                    Some(req) => {
                        let res = req.fetch(&api).await;
                        section.finish_load(req, res);
                    }
                }
            }
            if let Some(msg) = section.footer().error_message {
                bail!("{msg}");
            }
            for c in section.comments() {
                print_comment(c, "");
            }
            if let Some(msg) = section.footer().empty_message {
                println!("{msg}");
            }
            if section.pagination_end() == Some(false) {
                if let Some(last) = section.comments().last() {
                    println!("(more comments after {})", last.id);
                }
            }
        }
        Command::Replies { comment, after } => {
            let req = quill_client::PageRequest {
                target: CommentId(comment),
                continue_after: after.map(CommentId),
            };
            let page = req
                .fetch(&api)
                .await
                .with_context(|| format!("fetching replies to comment {}", req.target))?;
            for c in &page.comments {
                print_comment(c, "");
            }
            if !page.end_of_pagination_reached {
                if let Some(last) = page.comments.last() {
                    println!("(more replies after {})", last.id);
                }
            }
        }
        Command::Thread { post } => {
            let section = load_all_comments(&api, &PostId(post)).await?;
            if let Some(msg) = section.footer().empty_message {
                println!("{msg}");
            }
            for root in section.comments() {
                print_comment(root, "");
                let thread = load_all_replies(&api, root.clone()).await?;
                for (_, reply) in thread.replies() {
                    print_comment(reply, "    ");
                }
            }
        }
        Command::Post {
            post,
            text,
            reply_to,
        } => {
            let post = PostId(post);
            if !session.is_logged_in() {
                bail!("you need to be logged in to comment, set QUILL_SESSION");
            }
            let created = match reply_to {
                None => {
                    let mut composer = CommentComposer::new_comment(post);
                    composer.draft_mut().set_text(&text);
                    composer.submit(&api).await
                }
                Some(id) => {
                    let id = CommentId(id);
                    let target = find_comment(&api, &post, &id)
                        .await?
                        .ok_or_else(|| anyhow!("comment {id} not found on post {post}"))?;
                    let mut node = CommentNode::new(target);
                    if node.reply_clicked(&session) != ReplyIntent::Compose {
                        bail!("you need to be logged in to reply");
                    }
                    if let Some(composer) = node.composer_mut() {
                        let text = format!("{}{text}", composer.draft().text());
                        composer.draft_mut().set_text(&text);
                    }
                    node.submit_reply(&api).await
                }
            };
            match created {
                None => bail!("refusing to send an empty comment"),
                Some(res) => {
                    let c = res.context("sending comment")?;
                    print_comment(&c, "");
                }
            }
        }
        Command::Edit {
            post,
            comment,
            text,
        } => {
            let (post, id) = (PostId(post), CommentId(comment));
            let mut node = find_own_comment(&api, &session, &post, &id)
                .await?
                .ok_or_else(|| anyhow!("comment {id} not found on post {post}"))?;
            node.edit_clicked(&session);
            if let Panel::Editing(draft) = node.panel_mut() {
                draft.set_text(&text);
            }
            match node.submit_edit(&api).await {
                None => bail!("refusing to set an empty text"),
                Some(res) => print_comment(&res.context("updating comment")?, ""),
            }
        }
        Command::Delete { post, comment } => {
            let (post, id) = (PostId(post), CommentId(comment));
            let mut node = match find_own_comment(&api, &session, &post, &id).await? {
                Some(node) => node,
                None => {
                    println!("comment {id} is already gone");
                    return Ok(());
                }
            };
            node.delete_clicked(&session);
            match node.delete(&api).await {
                None => bail!("deletion was not confirmed"),
                Some(res) => {
                    let id = res.context("deleting comment")?;
                    println!("deleted comment {id}");
                }
            }
        }
    }

    Ok(())
}
