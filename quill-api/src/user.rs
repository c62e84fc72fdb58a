use crate::{CommentAuthor, Time, UserId};

/// The authenticated viewer, as returned by the server's `users/me` endpoint
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Time>,
}

impl User {
    pub fn as_author(&self) -> CommentAuthor {
        CommentAuthor {
            id: self.id.clone(),
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            profile_pic_url: self.profile_pic_url.clone(),
        }
    }
}
