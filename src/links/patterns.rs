// file: src/links/patterns.rs
// description: compiled regex patterns for notebook launch links
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

pub const COLAB_GITHUB_BASE: &str = "https://colab.research.google.com/github";

pub const PUBLISHED_BRANCH: &str = "gh-pages";

lazy_static! {
    // Captures org, repo and the notebook path below `website/` on master.
    // The path may contain spaces but stops at quotes, angle brackets and line ends.
    pub static ref COLAB_MASTER_LINK: Regex = Regex::new(
        r#"https://colab\.research\.google\.com/github/([^/\s"'<>]+)/([^/\s"'<>]+)/blob/master/website/([^"'<>\r\n]+)"#
    ).expect("COLAB_MASTER_LINK regex is valid");
}

pub fn is_master_link(text: &str) -> bool {
    COLAB_MASTER_LINK.is_match(text)
}
