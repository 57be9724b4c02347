use std::sync::LazyLock;

use regex::Regex;

use super::noise::strip_noise;

static HTML_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+|www\S+").unwrap());
// Mis-decoded UTF-8 smart quotes and replacement chars
static ENCODING_JUNK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[�â€™]").unwrap());
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs to one space and trim.
pub fn squash_spaces(text: &str) -> String {
    SPACES_RE.replace_all(text, " ").trim().to_string()
}

/// Body/explanation cleaning shared by `narasi` and `penjelasan`.
pub fn clean_text(raw: &str) -> String {
    let text = strip_noise(&raw.to_lowercase());
    let text = HTML_RE.replace_all(&text, " ");
    let text = URL_RE.replace_all(&text, " ");
    let text = ENCODING_JUNK_RE.replace_all(&text, " ");
    let text = DIGITS_RE.replace_all(&text, " ");
    let text: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    squash_spaces(&text)
}
