//! Content module - proposal files, front-matter and markdown rendering

mod frontmatter;
mod markdown;
mod record;
pub mod source;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use record::ContentRecord;
pub use source::ContentSource;
