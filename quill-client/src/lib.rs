mod display;
pub use display::{format_relative_date, pluralize, EDITED_MARKER};

mod draft;
pub use draft::{CommentComposer, Draft, LOGIN_TO_COMMENT};

mod http;
pub use http::HttpApi;

mod node;
pub use node::{CommentNode, Panel, ReplyIntent, CONFIRM_DELETE};

mod page;
pub use page::{ListFooter, PageRequest};

mod section;
pub use section::{CommentSection, COMMENTS_LOAD_FAILED, NO_COMMENTS_YET, SHOW_MORE_COMMENTS};

mod session;
pub use session::Session;

mod thread;
pub use thread::{CommentThread, Provenance, REPLIES_LOAD_FAILED, SHOW_MORE_REPLIES};

pub mod api {
    pub use quill_api::*;
}
