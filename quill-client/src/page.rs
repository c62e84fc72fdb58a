use crate::api::{Comment, CommentApi, CommentId, CommentPage, Error, PostId};

/// Ticket for one in-flight page load
///
/// Handed out when the load starts and given back along with its result, so
/// that a controller can recognize results meant for another post or thread.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageRequest<T> {
    pub target: T,
    pub continue_after: Option<CommentId>,
}

impl PageRequest<PostId> {
    pub async fn fetch<A>(&self, api: &A) -> Result<CommentPage, Error>
    where
        A: CommentApi + ?Sized,
    {
        api.get_comments_for_post(&self.target, self.continue_after.as_ref())
            .await
    }
}

impl PageRequest<CommentId> {
    pub async fn fetch<A>(&self, api: &A) -> Result<CommentPage, Error>
    where
        A: CommentApi + ?Sized,
    {
        api.get_replies_for_comment(&self.target, self.continue_after.as_ref())
            .await
    }
}

/// What to render below a paginated list
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListFooter {
    pub empty_message: Option<&'static str>,
    pub loading: bool,
    pub error_message: Option<&'static str>,
    pub load_more_label: Option<String>,
}

pub(crate) fn append_page(list: &mut Vec<Comment>, page: Vec<Comment>) {
    list.reserve(page.len());
    for c in page {
        if list.iter().any(|known| known.id == c.id) {
            tracing::warn!(id = %c.id, "dropping comment already present in list");
            continue;
        }
        list.push(c);
    }
}

/// Returns whether a comment with this id was found
pub(crate) fn replace_by_id(list: &mut [Comment], updated: Comment) -> bool {
    match list.iter_mut().find(|c| c.id == updated.id) {
        Some(c) => {
            *c = updated;
            true
        }
        None => false,
    }
}

pub(crate) fn remove_by_id(list: &mut Vec<Comment>, id: &CommentId) {
    list.retain(|c| c.id != *id);
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::api::{Comment, CommentAuthor, CommentId, PostId, UserId};

    pub fn comment(id: &str, parent: Option<&str>) -> Comment {
        let date = chrono::DateTime::parse_from_rfc3339("2023-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        Comment {
            id: CommentId::from(id),
            post_id: PostId::from("post"),
            parent_comment_id: parent.map(CommentId::from),
            author: CommentAuthor {
                id: UserId::from("alice"),
                username: String::from("alice"),
                display_name: None,
                profile_pic_url: None,
            },
            text: format!("text of {id}"),
            created_at: date,
            updated_at: date,
            replies_count: None,
        }
    }

    pub fn ids(list: &[Comment]) -> Vec<&str> {
        list.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn removal_is_idempotent() {
        bolero::check!()
            .with_type::<(Vec<u8>, u8)>()
            .cloned()
            .for_each(|(list, removed)| {
                let mut list = list
                    .into_iter()
                    .map(|i| format!("c{i}"))
                    .collect::<std::collections::BTreeSet<_>>()
                    .into_iter()
                    .map(|id| comment(&id, None))
                    .collect::<Vec<_>>();
                let removed = CommentId(format!("c{removed}"));
                super::remove_by_id(&mut list, &removed);
                let once = list.clone();
                super::remove_by_id(&mut list, &removed);
                assert_eq!(list, once);
                assert!(list.iter().all(|c| c.id != removed));
            });
    }
}
