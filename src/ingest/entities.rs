// Entity extraction from raw post text.
//
// Hashtags, mentions, and URLs pulled out with regexes. Source order is
// preserved and duplicates are kept — downstream stages decide whether a
// repeated mention matters (the mention graph counts it as extra weight).

use std::sync::OnceLock;

use regex_lite::Regex;

fn hashtag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#(\w+)").expect("hashtag regex is valid"))
}

fn mention_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@(\w+)").expect("mention regex is valid"))
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").expect("url regex is valid"))
}

/// Hashtag bodies (without the `#`), in order of appearance.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    hashtag_re()
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Mentioned handles (without the `@`), in order of appearance.
pub fn extract_mentions(text: &str) -> Vec<String> {
    mention_re()
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// URLs, in order of appearance.
pub fn extract_urls(text: &str) -> Vec<String> {
    url_re()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
