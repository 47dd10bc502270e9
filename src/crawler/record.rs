//! Record extraction for post pages

use crate::crawler::document::HtmlDocument;
use crate::crawler::selectors::{AUTHOR_LINK, HEADING, POST_DATE};
use serde::{Deserialize, Serialize};

/// One blog post as written to the output file
///
/// Absent fields serialize as `null`; all three keys are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub heading: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

/// Extracts a post record from a post document
///
/// - `heading`: text of the first `<h1>`
/// - `author`: `title` of the first anchor directly inside the author box name
/// - `date`: text of the subheadline span inside the text-content block
///
/// A field whose markup is missing is `None`. Extraction never fails.
pub fn extract(document: &HtmlDocument) -> PostRecord {
    PostRecord {
        heading: document.first_text(&HEADING),
        author: document.first_attr(&AUTHOR_LINK, "title"),
        date: document.first_text(&POST_DATE),
    }
}
