//! Render collaborator
//!
//! The paginator hands every applied page to a [`FeedRenderer`]. The crate
//! ships [`FeedView`], an in-memory list of rendered posts plus the "load
//! more" flag, which can be turned into escaped HTML or plain text.

use crate::types::Post;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// Receives pages from the paginator
pub trait FeedRenderer: Send {
    /// Replace everything shown with `posts` (after a reset)
    fn replace(&mut self, posts: &[Post], has_more: bool);

    /// Show `posts` after what is already there (after a continue)
    fn append(&mut self, posts: &[Post], has_more: bool);
}

/// In-memory feed view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedView {
    posts: Vec<Post>,
    has_more: bool,
}

impl FeedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts currently shown, in display order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Whether the "load more" affordance is visible
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Render the feed as HTML; post content and usernames are escaped
    pub fn render_html(&self, now: DateTime<Utc>) -> String {
        let mut out = String::new();
        for post in &self.posts {
            let user = escape_html(&post.creator_username);
            let _ = write!(
                out,
                concat!(
                    "<div class=\"post-container\"><div class=\"post\">",
                    "<div class=\"upper-content\"><a href=\"/u/{user}\" class=\"no-underline\">",
                    "<div class=\"username\">@{user}</div> - ",
                    "<div class=\"timestamp\">{ago} ago</div>",
                    "</a></div>",
                    "<div class=\"main-content\">{content}</div>",
                    "</div></div>\n"
                ),
                user = user,
                ago = time_since(post.timestamp, now),
                content = escape_html(&post.content),
            );
        }
        if self.has_more {
            out.push_str("<button id=\"more\">Load more</button>\n");
        }
        out
    }

    /// Render the feed as plain text for a terminal; control characters are replaced
    pub fn render_text(&self, now: DateTime<Utc>) -> String {
        let mut out = String::new();
        for post in &self.posts {
            let _ = writeln!(
                out,
                "@{} - {} ago  [{}]",
                sanitize_terminal(&post.creator_username),
                time_since(post.timestamp, now),
                post.post_id
            );
            for line in post.content.lines() {
                let _ = writeln!(out, "    {}", sanitize_terminal(line));
            }
            out.push('\n');
        }
        if self.posts.is_empty() {
            out.push_str("(no posts)\n");
        }
        if self.has_more {
            out.push_str("-- more posts available --\n");
        }
        out
    }
}

impl FeedRenderer for FeedView {
    fn replace(&mut self, posts: &[Post], has_more: bool) {
        self.posts.clear();
        self.posts.extend_from_slice(posts);
        self.has_more = has_more;
    }

    fn append(&mut self, posts: &[Post], has_more: bool) {
        self.posts.extend_from_slice(posts);
        self.has_more = has_more;
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Replace control characters (ESC, BEL, CR, C1...) with U+FFFD
///
/// Callers split on newlines first; a newline that reaches here is replaced too.
pub fn sanitize_terminal(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_control() { char::REPLACEMENT_CHARACTER } else { c })
        .collect()
}

/// Compact relative time: `42s`, `5m`, `3h`, `12d`, `2y`
///
/// Timestamps in the future (clock skew) read as `0s`.
pub fn time_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const YEAR: i64 = 365 * DAY;

    let secs = (now - then).num_seconds().max(0);
    match secs {
        s if s < MINUTE => format!("{s}s"),
        s if s < HOUR => format!("{}m", s / MINUTE),
        s if s < DAY => format!("{}h", s / HOUR),
        s if s < YEAR => format!("{}d", s / DAY),
        s => format!("{}y", s / YEAR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostId;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn post(id: u64, content: &str) -> Post {
        Post {
            post_id: PostId(id),
            creator_username: "alice".to_string(),
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            content: content.to_string(),
        }
    }

    #[test_case("<script>", "&lt;script&gt;" ; "script tag")]
    #[test_case("a & b", "a &amp; b" ; "ampersand")]
    #[test_case("say \"hi\"", "say &quot;hi&quot;" ; "quotes")]
    #[test_case("it's", "it&#39;s" ; "apostrophe")]
    #[test_case("plain ünïcode", "plain ünïcode" ; "untouched")]
    fn test_escape_html(input: &str, expected: &str) {
        assert_eq!(escape_html(input), expected);
    }

    #[test_case("\x1b[2J", "\u{fffd}[2J" ; "clear screen")]
    #[test_case("\x1b]0;t\x07", "\u{fffd}]0;t\u{fffd}" ; "window title")]
    #[test_case("real\rfake", "real\u{fffd}fake" ; "carriage return")]
    #[test_case("\u{9b}31m", "\u{fffd}31m" ; "c1 csi")]
    #[test_case("tab\there", "tab\u{fffd}here" ; "tab")]
    #[test_case("plain ünïcode <b>", "plain ünïcode <b>" ; "printable untouched")]
    fn test_sanitize_terminal(input: &str, expected: &str) {
        assert_eq!(sanitize_terminal(input), expected);
    }

    #[test_case(0, "0s" ; "now")]
    #[test_case(59, "59s" ; "seconds")]
    #[test_case(60, "1m" ; "one minute")]
    #[test_case(3_599, "59m" ; "minutes")]
    #[test_case(7_200, "2h" ; "hours")]
    #[test_case(86_400 * 3, "3d" ; "days")]
    #[test_case(86_400 * 800, "2y" ; "years")]
    #[test_case(-30, "0s" ; "future timestamp")]
    fn test_time_since(elapsed: i64, expected: &str) {
        let then = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let now = then + Duration::seconds(elapsed);
        assert_eq!(time_since(then, now), expected);
    }

    #[test]
    fn test_replace_and_append() {
        let mut view = FeedView::new();
        view.replace(&[post(3, "a"), post(2, "b")], true);
        assert_eq!(view.len(), 2);
        assert!(view.has_more());

        view.append(&[post(1, "c")], false);
        let ids: Vec<u64> = view.posts().iter().map(|p| p.post_id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert!(!view.has_more());

        view.replace(&[], false);
        assert!(view.is_empty());
    }

    #[test]
    fn test_render_html_escapes_content() {
        let mut view = FeedView::new();
        view.replace(&[post(1, "<script>alert(1)</script>"), post(2, "a & b")], false);

        let now = Utc.timestamp_opt(1_700_000_300, 0).unwrap();
        let html = view.render_html(now);

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("5m ago"));
        assert!(html.contains("href=\"/u/alice\""));
        assert!(!html.contains("id=\"more\""));
    }

    #[test]
    fn test_render_text() {
        let mut view = FeedView::new();
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(view.render_text(now), "(no posts)\n");

        view.replace(&[post(7, "line one\nline two")], true);
        assert_eq!(
            view.render_text(now),
            "@alice - 0s ago  [7]\n    line one\n    line two\n\n-- more posts available --\n"
        );
    }

    #[test]
    fn test_render_text_strips_control_characters() {
        let mut view = FeedView::new();
        let mut hostile = post(9, "\x1b[2J\x1b[31mfake system message\nsecond\x07 line");
        hostile.creator_username = "evil\x1b]0;pwned\x07".to_string();
        view.replace(&[hostile], false);

        let out = view.render_text(Utc.timestamp_opt(1_700_000_000, 0).unwrap());

        assert!(!out.contains('\x1b'));
        assert!(!out.contains('\x07'));
        assert!(out.contains("fake system message"));
        assert!(out.starts_with("@evil\u{fffd}]0;pwned\u{fffd} - 0s ago"));
        assert!(out.contains("    second\u{fffd} line\n"));
    }
}
