use itertools::Itertools;
use tracing::trace;

use crate::lexicon::Lexicon;
use crate::stemmer::Stem;

/// Tokens longer than this are assumed to be words glued together by a
/// scraper that dropped the spaces.
pub const STUCK_TOKEN_LEN: usize = 25;
/// The splitter itself refuses anything shorter than this. Every token it
/// sees is already past `STUCK_TOKEN_LEN`, so tokens of 20..=25 chars are
/// never split.
pub const SPLIT_MIN_LEN: usize = 20;
/// Tokens of this many chars or fewer are dropped.
pub const MIN_TOKEN_LEN: usize = 2;

/// Greedy stopword-anchored split: grow a buffer one char at a time and cut
/// whenever it equals a corpus stopword. Whatever is left over becomes the
/// last piece. Words that are not bracketed by stopwords stay whole.
pub fn split_stuck_words(token: &str, lexicon: &Lexicon) -> Vec<String> {
    if token.chars().count() < SPLIT_MIN_LEN {
        return vec![token.to_string()];
    }

    let mut parts = Vec::new();
    let mut buffer = String::new();
    for ch in token.chars() {
        buffer.push(ch);
        if lexicon.in_corpus(&buffer) {
            parts.push(std::mem::take(&mut buffer));
        }
    }
    if !buffer.is_empty() {
        parts.push(buffer);
    }
    parts
}

/// Token-level stage: stuck-word splitting, stopword/length filtering and
/// stemming. Holds shared read-only state only.
pub struct Cleaner<'a> {
    lexicon: &'a Lexicon,
    stemmer: &'a (dyn Stem + Sync),
}

impl<'a> Cleaner<'a> {
    pub fn new(lexicon: &'a Lexicon, stemmer: &'a (dyn Stem + Sync)) -> Self {
        Cleaner { lexicon, stemmer }
    }

    /// Stem one sub-token, or `None` when it is filtered out or the stemmer
    /// cannot handle it.
    fn keep(&self, token: &str) -> Option<String> {
        if self.lexicon.is_stopword(token) || token.chars().count() <= MIN_TOKEN_LEN {
            return None;
        }
        match self.stemmer.stem(token) {
            Ok(stem) => Some(stem),
            Err(e) => {
                trace!(token, error = %e, "token dropped");
                None
            }
        }
    }

    pub fn normalize_text(&self, text: &str) -> String {
        text.split_whitespace()
            .flat_map(|t| {
                if t.chars().count() > STUCK_TOKEN_LEN {
                    split_stuck_words(t, self.lexicon)
                } else {
                    vec![t.to_string()]
                }
            })
            .filter_map(|s| self.keep(&s))
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stemmer::{IndonesianStemmer, StemError};

    /// Passes tokens through untouched so tests see filtering only.
    struct Identity;

    impl Stem for Identity {
        fn stem(&self, word: &str) -> Result<String, StemError> {
            Ok(word.to_string())
        }
    }

    /// Fails on any token containing 'x'.
    struct FailsOnX;

    impl Stem for FailsOnX {
        fn stem(&self, word: &str) -> Result<String, StemError> {
            if word.contains('x') {
                Err(StemError::Unstemmable(word.to_string()))
            } else {
                Ok(word.to_uppercase())
            }
        }
    }

    fn lexicon() -> Lexicon {
        Lexicon::from_words(
            ["saya", "yang", "tidak", "pertanggungjawaban", "sesungguhnya"],
            ["the", "and"],
        )
    }

    #[test]
    fn negation_retained() {
        let lex = lexicon();
        let cleaner = Cleaner::new(&lex, &Identity);
        assert_eq!(cleaner.normalize_text("saya tidak setuju"), "tidak setuju");
    }

    #[test]
    fn negation_retained_with_real_lexicon() {
        let cleaner = Cleaner::new(Lexicon::global(), &IndonesianStemmer);
        let out = cleaner.normalize_text("saya tidak setuju");
        assert!(out.split(' ').any(|t| t == "tidak"), "got {:?}", out);
    }

    #[test]
    fn stuck_stopwords_split_then_removed() {
        let lex = lexicon();
        let token = "pertanggungjawabansesungguhnya";
        assert_eq!(token.chars().count(), 30);
        assert_eq!(
            split_stuck_words(token, &lex),
            vec!["pertanggungjawaban", "sesungguhnya"]
        );
        let cleaner = Cleaner::new(&lex, &Identity);
        assert_eq!(cleaner.normalize_text(token), "");
    }

    #[test]
    fn remainder_kept_after_last_stopword() {
        let lex = lexicon();
        let parts = split_stuck_words("sesungguhnyapemerintahmenolak", &lex);
        assert_eq!(parts, vec!["sesungguhnya", "pemerintahmenolak"]);
    }

    #[test]
    fn medium_long_tokens_pass_whole() {
        let lex = lexicon();
        let cleaner = Cleaner::new(&lex, &Identity);
        // 23 chars: over the splitter minimum but not "stuck"
        let token = "sesungguhnyapemerintahx";
        assert!(token.chars().count() <= STUCK_TOKEN_LEN);
        assert_eq!(cleaner.normalize_text(token), token);
    }

    #[test]
    fn glued_words_survive_with_real_lexicon() {
        let lex = Lexicon::global();
        let glued = "bagipemerintahyangmenolakvaksin";
        assert!(glued.chars().count() > STUCK_TOKEN_LEN);
        assert_eq!(
            split_stuck_words(glued, lex),
            vec!["bagi", "pemerintahyangmenolakvaksin"]
        );

        let cleaner = Cleaner::new(lex, &IndonesianStemmer);
        assert_eq!(cleaner.normalize_text(glued), "pemerintahyangmenolakvaksin");
        assert_eq!(
            cleaner.normalize_text("pertanggungjawabanmasyarakatx"),
            "pertanggungjawabanmasyarakatx"
        );
        let out = cleaner.normalize_text("kementeriankesehatanrepublikindonesia");
        assert!(out.contains("kesehatanrepublikindonesia"), "got {:?}", out);
    }

    #[test]
    fn short_tokens_dropped() {
        let lex = lexicon();
        let cleaner = Cleaner::new(&lex, &Identity);
        assert_eq!(cleaner.normalize_text("di ke ya bisa"), "bisa");
    }

    #[test]
    fn failed_stems_are_omitted() {
        let lex = lexicon();
        let cleaner = Cleaner::new(&lex, &FailsOnX);
        assert_eq!(cleaner.normalize_text("vaksin xenon aman"), "VAKSIN AMAN");
    }

    #[test]
    fn order_is_preserved() {
        let lex = lexicon();
        let cleaner = Cleaner::new(&lex, &Identity);
        assert_eq!(
            cleaner.normalize_text("warga yang panik membeli the masker"),
            "warga panik membeli masker"
        );
    }
}
