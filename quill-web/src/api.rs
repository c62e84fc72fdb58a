use std::{ops::Deref, rc::Rc};

use gloo_storage::{LocalStorage, Storage};
use quill_client::{api::PostId, HttpApi};

/// Local storage key overriding the blog's base url
pub const KEY_HOST: &str = "host";

/// Shared handle to the http client, compared by identity
#[derive(Clone, Debug)]
pub struct ApiHandle(Rc<HttpApi>);

impl ApiHandle {
    pub fn new(api: HttpApi) -> ApiHandle {
        ApiHandle(Rc::new(api))
    }

    /// Build the client for the configured host, defaulting to the page's origin
    pub fn from_storage() -> ApiHandle {
        let host = match LocalStorage::get::<String>(KEY_HOST) {
            Ok(host) => host,
            Err(_) => web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_default(),
        };
        tracing::info!(%host, "using blog api");
        ApiHandle::new(HttpApi::new(host))
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &ApiHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ApiHandle {
    type Target = HttpApi;

    fn deref(&self) -> &HttpApi {
        &self.0
    }
}

/// The post whose comments to show, from the `#<post id>` location hash
pub fn post_from_location() -> Option<PostId> {
    let hash = web_sys::window()?.location().hash().ok()?;
    let id = hash.trim_start_matches('#');
    (!id.is_empty()).then(|| PostId::from(id))
}

pub fn alert(msg: &str) {
    match web_sys::window() {
        Some(w) => {
            if w.alert_with_message(msg).is_err() {
                tracing::error!(%msg, "failed showing alert");
            }
        }
        None => tracing::error!(%msg, "no window to show alert in"),
    }
}
