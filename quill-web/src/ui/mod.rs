mod app;
pub use app::App;

mod comment_form;
pub use comment_form::CommentForm;

mod comment_node;
pub use comment_node::CommentNodeView;

mod comment_section;
pub use comment_section::CommentSectionView;

mod comment_thread;
pub use comment_thread::CommentThreadView;

mod create_comment_box;
pub use create_comment_box::CreateCommentBox;

mod delete_confirmation;
pub use delete_confirmation::DeleteConfirmation;

mod list_footer;
pub use list_footer::ListFooterView;

mod login_prompt;
pub use login_prompt::LoginPrompt;
