//! Dictionary-backed Indonesian stemmer.
//!
//! Confix stripping in the order particle → possessive pronoun →
//! derivational suffix → up to three derivational prefixes. A removal only
//! counts when what is left is a known root; a word that never reaches a
//! root is returned unchanged. Prefix rules that lose a letter (`meny-`,
//! `mem-`, `men-`, `meng-`, `ber-`, ...) try each recoding against the
//! dictionary.

use std::collections::HashSet;
use std::sync::LazyLock;

use thiserror::Error;

/// One root per line.
static ROOT_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("data/kata_dasar.txt")
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect()
});

const PARTICLES: &[&str] = &["kah", "lah", "pun"];
const POSSESSIVES: &[&str] = &["nya", "ku", "mu"];
const MAX_PREFIXES: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StemError {
    #[error("no stemmable characters in {0:?}")]
    Unstemmable(String),
}

pub trait Stem {
    fn stem(&self, word: &str) -> Result<String, StemError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IndonesianStemmer;

fn is_root(word: &str) -> bool {
    ROOT_WORDS.contains(word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    None,
    Kan,
    An,
    I,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Be,
    Di,
    Ke,
    Me,
    Pe,
    Se,
    Te,
}

/// Confixes Indonesian morphology does not form (`ke-…-i`, `di-…-an`, ...).
fn disallowed(prefix: Prefix, suffix: Suffix) -> bool {
    matches!(
        (prefix, suffix),
        (Prefix::Be, Suffix::I)
            | (Prefix::Di, Suffix::An)
            | (Prefix::Ke, Suffix::I)
            | (Prefix::Ke, Suffix::Kan)
            | (Prefix::Me, Suffix::An)
            | (Prefix::Se, Suffix::I)
            | (Prefix::Se, Suffix::Kan)
            | (Prefix::Te, Suffix::An)
    )
}

fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn strip_any<'a>(word: &'a str, suffixes: &[&str]) -> Option<&'a str> {
    suffixes
        .iter()
        .find_map(|s| word.strip_suffix(*s))
        .filter(|rest| rest.len() > 2)
}

/// Suffix-stripped forms of `word`, most stripped first, ending with the
/// word itself.
fn suffix_variants(word: &str) -> Vec<(String, Suffix)> {
    let mut inflected = vec![word];
    let mut inf = word;
    if let Some(w) = strip_any(inf, PARTICLES) {
        inflected.push(w);
        inf = w;
    }
    if let Some(w) = strip_any(inf, POSSESSIVES) {
        inflected.push(w);
        inf = w;
    }

    let mut out = Vec::new();
    if inf.len() > 5 && inf.ends_with("kan") {
        out.push((inf[..inf.len() - 3].to_string(), Suffix::Kan));
        out.push((inf[..inf.len() - 2].to_string(), Suffix::An));
    } else if inf.len() > 4 && inf.ends_with("an") {
        out.push((inf[..inf.len() - 2].to_string(), Suffix::An));
    } else if inf.len() > 3 && inf.ends_with('i') {
        out.push((inf[..inf.len() - 1].to_string(), Suffix::I));
    }
    out.extend(inflected.iter().rev().map(|w| (w.to_string(), Suffix::None)));
    out
}

/// Every way to take one prefix off `word`, with recodings.
fn prefix_removals(word: &str) -> Vec<(String, Prefix)> {
    let b = word.as_bytes();
    let vowel_at = |i: usize| b.get(i).is_some_and(|c| is_vowel(*c));
    let consonant_at = |i: usize| b.get(i).is_some_and(|c| !is_vowel(*c));
    let tail = |n: usize| word[n..].to_string();
    let one = |n: usize, p: Prefix| vec![(tail(n), p)];
    // drop `n` bytes, then try the rest both bare and with `lost` restored
    let recode = |n: usize, bare: &str, lost: &str, p: Prefix| {
        vec![
            (format!("{}{}", bare, tail(n)), p),
            (format!("{}{}", lost, tail(n)), p),
        ]
    };

    if word.starts_with("di") {
        return one(2, Prefix::Di);
    }
    if word.starts_with("ke") {
        return one(2, Prefix::Ke);
    }
    if word.starts_with("se") {
        return one(2, Prefix::Se);
    }
    if word.starts_with("ter") {
        return if vowel_at(3) {
            recode(3, "", "r", Prefix::Te)
        } else {
            one(3, Prefix::Te)
        };
    }
    if word.starts_with("belajar") {
        return vec![(format!("ajar{}", tail(7)), Prefix::Be)];
    }
    if word.starts_with("ber") {
        return if vowel_at(3) {
            recode(3, "", "r", Prefix::Be)
        } else {
            one(3, Prefix::Be)
        };
    }
    // be-kerja, be-serta
    if word.starts_with("be") && consonant_at(2) && b.get(3..5) == Some(b"er".as_slice()) {
        return one(2, Prefix::Be);
    }
    if word.starts_with("pelajar") {
        return vec![(format!("ajar{}", tail(7)), Prefix::Pe)];
    }

    for (head, p) in [("me", Prefix::Me), ("pe", Prefix::Pe)] {
        if !word.starts_with(head) {
            continue;
        }
        let rest = &word[2..];
        if rest.starts_with("ny") && vowel_at(4) {
            return vec![(format!("s{}", tail(4)), p)];
        }
        if rest.starts_with("ng") {
            return if vowel_at(4) {
                recode(4, "", "k", p)
            } else {
                one(4, p)
            };
        }
        if rest.starts_with('m') {
            if vowel_at(3) {
                return recode(3, "m", "p", p);
            }
            if matches!(b.get(3), Some(b'b' | b'f' | b'v' | b'p')) {
                return one(3, p);
            }
        }
        if rest.starts_with('n') {
            if vowel_at(3) {
                return recode(3, "n", "t", p);
            }
            if matches!(b.get(3), Some(b'c' | b'd' | b'j' | b's' | b't' | b'z')) {
                return one(3, p);
            }
        }
        if p == Prefix::Pe && rest.starts_with('r') {
            return if vowel_at(3) {
                recode(3, "", "r", p)
            } else {
                one(3, p)
            };
        }
        if consonant_at(2) {
            return one(2, p);
        }
    }
    Vec::new()
}

fn find_root(word: &str, depth: usize, suffix: Suffix) -> Option<String> {
    for (rest, prefix) in prefix_removals(word) {
        if depth == 0 && disallowed(prefix, suffix) {
            continue;
        }
        if rest.len() < 3 {
            continue;
        }
        if is_root(&rest) {
            return Some(rest);
        }
        if depth + 1 < MAX_PREFIXES {
            if let Some(root) = find_root(&rest, depth + 1, suffix) {
                return Some(root);
            }
        }
    }
    None
}

impl Stem for IndonesianStemmer {
    fn stem(&self, word: &str) -> Result<String, StemError> {
        let normalized: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        if normalized.is_empty() {
            return Err(StemError::Unstemmable(word.to_string()));
        }
        if normalized.len() <= 3 || is_root(&normalized) {
            return Ok(normalized);
        }

        let variants = suffix_variants(&normalized);
        if let Some((root, _)) = variants.iter().find(|(w, _)| is_root(w)) {
            return Ok(root.clone());
        }
        for (w, suffix) in &variants {
            if let Some(root) = find_root(w, 0, *suffix) {
                return Ok(root);
            }
        }
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(word: &str) -> String {
        IndonesianStemmer.stem(word).unwrap()
    }

    #[test]
    fn short_roots_untouched() {
        assert_eq!(stem("tidak"), "tidak");
        assert_eq!(stem("buku"), "buku");
        assert_eq!(stem("makan"), "makan");
    }

    #[test]
    fn roots_that_look_prefixed_stay_whole() {
        for word in [
            "berita",
            "media",
            "menteri",
            "terima",
            "kemarin",
            "perempuan",
            "peristiwa",
            "pesawat",
        ] {
            assert_eq!(stem(word), word);
        }
    }

    #[test]
    fn first_order_prefixes() {
        assert_eq!(stem("menyebabkan"), "sebab");
        assert_eq!(stem("membaca"), "baca");
        assert_eq!(stem("memukul"), "pukul");
        assert_eq!(stem("dimakan"), "makan");
        assert_eq!(stem("pembangunan"), "bangun");
        assert_eq!(stem("kebersihan"), "bersih");
        assert_eq!(stem("dikabarkan"), "kabar");
    }

    #[test]
    fn recoded_prefixes() {
        assert_eq!(stem("pemerintah"), "perintah");
        assert_eq!(stem("penyakit"), "sakit");
        assert_eq!(stem("menari"), "tari");
        assert_eq!(stem("pemain"), "main");
        assert_eq!(stem("bekerja"), "kerja");
    }

    #[test]
    fn confixes() {
        assert_eq!(stem("kementerian"), "menteri");
        assert_eq!(stem("kesehatan"), "sehat");
        assert_eq!(stem("memberikan"), "beri");
        assert_eq!(stem("memperbaiki"), "baik");
    }

    #[test]
    fn possessive_and_particle() {
        assert_eq!(stem("bukunya"), "buku");
        assert_eq!(stem("rumahnyalah"), "rumah");
    }

    #[test]
    fn second_order_prefixes() {
        assert_eq!(stem("belajar"), "ajar");
        assert_eq!(stem("bermainan"), "main");
        assert_eq!(stem("perbaikan"), "baik");
    }

    #[test]
    fn unknown_words_returned_unchanged() {
        assert_eq!(stem("dinosaurus"), "dinosaurus");
        assert_eq!(
            stem("pertanggungjawabanmasyarakatx"),
            "pertanggungjawabanmasyarakatx"
        );
    }

    #[test]
    fn non_letters_are_an_error() {
        assert_eq!(
            IndonesianStemmer.stem("日本語"),
            Err(StemError::Unstemmable("日本語".to_string()))
        );
        assert_eq!(stem("café"), "caf");
    }
}
