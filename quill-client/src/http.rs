use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};

use crate::api::{
    Comment, CommentApi, CommentId, CommentPage, CommentUpdate, Error, NewComment, PostId, User,
};

/// `CommentApi` implementation talking to the blog's REST server
#[derive(Clone, Debug)]
pub struct HttpApi {
    host: String,
    client: reqwest::Client,
    session_cookie: Option<String>,
}

impl HttpApi {
    pub fn new(host: impl Into<String>) -> HttpApi {
        HttpApi {
            host: host.into(),
            client: reqwest::Client::new(),
            session_cookie: None,
        }
    }

    /// Authenticate requests with this `Cookie` header value. Browsers handle
    /// cookies on their own and do not need it.
    pub fn with_session_cookie(mut self, cookie: String) -> HttpApi {
        self.session_cookie = Some(cookie);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.host.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, self.url(path));
        // the blog may live on another origin than the page, send its cookies anyway
        #[cfg(target_arch = "wasm32")]
        let req = req.fetch_credentials_include();
        match &self.session_cookie {
            None => req,
            Some(cookie) => req.header(reqwest::header::COOKIE, cookie),
        }
    }

    async fn send_raw(req: RequestBuilder) -> Result<reqwest::Response, Error> {
        let resp = req
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let err = Error::from_response(status, &body);
        tracing::debug!(%status, ?err, "server returned an error");
        Err(err)
    }

    async fn send<R>(req: RequestBuilder) -> Result<R, Error>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        HttpApi::send_raw(req)
            .await?
            .json()
            .await
            .map_err(|e| Error::Unknown(format!("failed to parse data from server: {e}")))
    }

    fn page_request(&self, path: &str, continue_after: Option<&CommentId>) -> RequestBuilder {
        let req = self.request(Method::GET, path);
        match continue_after {
            None => req,
            Some(after) => req.query(&[("continueAfterId", after.as_str())]),
        }
    }
}

#[async_trait(?Send)]
impl CommentApi for HttpApi {
    async fn get_comments_for_post(
        &self,
        post: &PostId,
        continue_after: Option<&CommentId>,
    ) -> Result<CommentPage, Error> {
        HttpApi::send(self.page_request(&format!("posts/{post}/comments"), continue_after)).await
    }

    async fn get_replies_for_comment(
        &self,
        comment: &CommentId,
        continue_after: Option<&CommentId>,
    ) -> Result<CommentPage, Error> {
        HttpApi::send(
            self.page_request(&format!("posts/comments/{comment}/replies"), continue_after),
        )
        .await
    }

    async fn create_comment(
        &self,
        post: &PostId,
        parent: Option<&CommentId>,
        text: &str,
    ) -> Result<Comment, Error> {
        let body = NewComment {
            post_id: post.clone(),
            parent_comment_id: parent.cloned(),
            text: String::from(text),
        };
        HttpApi::send(
            self.request(Method::POST, &format!("posts/{post}/comments"))
                .json(&body),
        )
        .await
    }

    async fn update_comment(&self, comment: &CommentId, text: &str) -> Result<Comment, Error> {
        let body = CommentUpdate {
            new_text: String::from(text),
        };
        HttpApi::send(
            self.request(Method::PATCH, &format!("posts/comments/{comment}"))
                .json(&body),
        )
        .await
    }

    async fn delete_comment(&self, comment: &CommentId) -> Result<(), Error> {
        HttpApi::send_raw(self.request(Method::DELETE, &format!("posts/comments/{comment}")))
            .await
            .map(|_| ())
    }

    async fn authenticated_user(&self) -> Result<Option<User>, Error> {
        match HttpApi::send(self.request(Method::GET, "users/me")).await {
            Ok(user) => Ok(Some(user)),
            Err(Error::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
