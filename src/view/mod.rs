pub mod admin_form;
pub mod feed;

pub use admin_form::{AdminForm, ArticleDraft, FormMode};
pub use feed::{FeedView, PAGE_SIZE};
