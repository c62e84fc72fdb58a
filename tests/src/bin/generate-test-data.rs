use anyhow::Context;
use quill_api::{CommentPage, PostId};
use quill_mock_server::MockServer;
use tests::{populate, NUM_ROOTS, NUM_USERS};

/// Dump a randomly generated comment section as JSON, one page per line, the
/// way the server would return them: root pages first, then reply pages.
fn main() -> anyhow::Result<()> {
    let post = PostId::from(std::env::args().nth(1).as_deref().unwrap_or("test-post"));
    let mut server = MockServer::new();
    populate(&mut server, &mut rand::thread_rng(), &post, NUM_USERS, NUM_ROOTS);

    let mut roots = Vec::new();
    let mut cursor = None;
    loop {
        let page = server
            .get_comments_for_post(&post, cursor.as_ref())
            .context("listing generated comments")?;
        print_page(&page)?;
        roots.extend(page.comments.iter().cloned());
        cursor = page.comments.last().map(|c| c.id.clone());
        if page.end_of_pagination_reached {
            break;
        }
    }

    for root in roots {
        let mut cursor = None;
        loop {
            let page = server
                .get_replies_for_comment(&root.id, cursor.as_ref())
                .with_context(|| format!("listing replies to {}", root.id))?;
            print_page(&page)?;
            cursor = page.comments.last().map(|c| c.id.clone());
            if page.end_of_pagination_reached {
                break;
            }
        }
    }

    Ok(())
}

fn print_page(page: &CommentPage) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string(page).context("serializing comment page")?
    );
    Ok(())
}
