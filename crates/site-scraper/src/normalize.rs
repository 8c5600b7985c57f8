use std::sync::LazyLock;

use regex_lite::Regex;

static WHITESPACE_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// Cleans up element text for use as a record title.
///
/// Tabs are removed outright, then every remaining run of whitespace becomes a
/// single space. Leading and trailing runs are collapsed but not trimmed, so
/// `"a\t\tb"` becomes `"ab"` rather than `"a b"`.
pub fn normalize_title(raw: &str) -> String {
    let without_tabs = raw.replace('\t', "");

    if let Some(re) = WHITESPACE_RUN.as_ref() {
        re.replace_all(&without_tabs, " ").into_owned()
    } else {
        collapse_whitespace(&without_tabs)
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}
