use std::sync::LazyLock;

use regex::Regex;

use super::text::squash_spaces;

/// Editorial verdict markers fact-check sites put in front of headlines.
/// Alternatives are tried left to right; the whole run is anchored at the start.
static TITLE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^(
            \[?\s*(salah|keliru|hoaks?|hoax|klarifikasi|penipuan|misinformasi)\s*\]? |
            cek\s*fakta[:,]? |
            fakta[:,]? |
            klarifikasi[:,]? |
            hoaks! |
            hoax! |
            keliru! |
            salah! |
            update[:,]? |
            breaking\s*news[:,]?
        )+",
    )
    .unwrap()
});
static SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

pub fn clean_title(raw: &str) -> String {
    let title = raw.to_lowercase();
    let title = TITLE_PREFIX_RE.replace(&title, "");
    let title = SYMBOL_RE.replace_all(&title, " ");
    squash_spaces(&title)
}
