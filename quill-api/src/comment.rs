use crate::{CommentId, PostId, Time, UserId};

/// Public view of a comment's author, as embedded by the server in each comment
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: CommentId,
    pub post_id: PostId,

    /// Always a root comment: replies to replies are attached to the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<CommentId>,

    pub author: CommentAuthor,
    pub text: String,
    pub created_at: Time,
    pub updated_at: Time,

    /// Number of replies as counted by the server when this comment was fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies_count: Option<u64>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_comment_id.is_some()
    }

    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }

    /// Id of the root comment whose thread this comment belongs to
    pub fn thread_root_id(&self) -> &CommentId {
        self.parent_comment_id.as_ref().unwrap_or(&self.id)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub end_of_pagination_reached: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: PostId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<CommentId>,
    pub text: String,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdate {
    pub new_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_comment() {
        let c: Comment = serde_json::from_str(
            r#"{
                "_id": "c1",
                "postId": "p1",
                "parentCommentId": "c0",
                "author": { "_id": "u1", "username": "alice" },
                "text": "hello",
                "createdAt": "2023-03-01T10:00:00Z",
                "updatedAt": "2023-03-01T11:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(c.id, CommentId::from("c1"));
        assert_eq!(c.author.username, "alice");
        assert_eq!(c.replies_count, None);
        assert!(c.is_reply());
        assert!(c.is_edited());
        assert_eq!(c.thread_root_id(), &CommentId::from("c0"));
    }

    #[test]
    fn parses_page() {
        let p: CommentPage =
            serde_json::from_str(r#"{ "comments": [], "endOfPaginationReached": true }"#).unwrap();
        assert!(p.comments.is_empty());
        assert!(p.end_of_pagination_reached);
    }

    #[test]
    fn update_body_is_camel_case() {
        let body = serde_json::to_value(CommentUpdate {
            new_text: String::from("x"),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "newText": "x" }));
    }
}
