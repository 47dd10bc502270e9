//! CSS selectors for the blog's listing and post markup
//!
//! Compiled once and shared by the link collector and the record extractor.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // Listing pages: the first content row holds the post links
    pub static ref LISTING_ROW: Selector = parse_selector!(r#"div[class*="x-row-inner"]"#);
    pub static ref ROW_LINK: Selector = parse_selector!("a[href]");

    // Post pages
    pub static ref HEADING: Selector = parse_selector!("h1");
    pub static ref AUTHOR_LINK: Selector =
        parse_selector!(r#"div[class*="pp-author-boxes-name"] > a[title]"#);
    pub static ref POST_DATE: Selector = parse_selector!(
        r#"div[class="x-text-content-text"] span[class="x-text-content-text-subheadline"]"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_compile() {
        lazy_static::initialize(&LISTING_ROW);
        lazy_static::initialize(&ROW_LINK);
        lazy_static::initialize(&HEADING);
        lazy_static::initialize(&AUTHOR_LINK);
        lazy_static::initialize(&POST_DATE);
    }
}
