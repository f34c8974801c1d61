//! Page title helper.

use crate::constants::{BASE_TITLE, TITLE_SEPARATOR};
use crate::validation::is_blank;

/// Full page title: the site name alone for a blank page title, otherwise
/// `"<page title> | <site name>"`.
pub fn full_title(page_title: Option<&str>) -> String {
    match page_title {
        Some(title) if !is_blank(title) => format!("{}{}{}", title, TITLE_SEPARATOR, BASE_TITLE),
        _ => BASE_TITLE.to_string(),
    }
}
