//! Helper functions shared by templates, the generator and the server

mod url;

pub use url::*;
