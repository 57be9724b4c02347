use std::collections::HashSet;
use std::sync::LazyLock;

use stop_words::LANGUAGE;

/// Negations flip the polarity of a claim; they stay in the text even
/// though the Indonesian corpus lists them.
pub const NEGATION_WORDS: &[&str] = &["tidak", "bukan", "belum", "tanpa"];

/// Indonesian function words (Sastrawi's stopword list).
pub const INDONESIAN_STOPWORDS: &[&str] = &[
    "yang", "untuk", "pada", "ke", "para", "namun", "menurut", "antara", "dia", "dua",
    "ia", "seperti", "jika", "sehingga", "kembali", "dan", "tidak", "ini", "karena",
    "kepada", "oleh", "saat", "harus", "sementara", "setelah", "belum", "kami",
    "sekitar", "bagi", "serta", "di", "dari", "telah", "sebagai", "masih", "hal",
    "ketika", "adalah", "itu", "dalam", "bisa", "bahwa", "atau", "hanya", "kita",
    "dengan", "akan", "juga", "ada", "mereka", "sudah", "saya", "terhadap", "secara",
    "agar", "lain", "anda", "begitu", "mengapa", "kenapa", "yaitu", "yakni", "daripada",
    "itulah", "lagi", "maka", "tentang", "demi", "dimana", "kemana", "pula", "sambil",
    "sebelum", "sesudah", "supaya", "guna", "kah", "pun", "sampai", "sedangkan",
    "selagi", "tetapi", "apakah", "kecuali", "sebab", "selain", "seolah", "seraya",
    "seterusnya", "tanpa", "agak", "boleh", "dapat", "dsb", "dst", "dll", "dahulu",
    "dulunya", "anu", "demikian", "tapi", "ingin", "nggak", "mari", "nanti",
    "melainkan", "oh", "ok", "seharusnya", "sebetulnya", "setiap", "setidaknya",
    "sesuatu", "pasti", "saja", "toh", "ya", "walau", "tolong", "tentu", "amat",
    "apalagi", "bagaimanapun",
];

static LEXICON: LazyLock<Lexicon> = LazyLock::new(Lexicon::load);

/// Stopword sets for both corpus languages plus the negation exceptions.
#[derive(Debug, Clone)]
pub struct Lexicon {
    indonesian: HashSet<String>,
    english: HashSet<String>,
    stopwords: HashSet<String>,
}

impl Lexicon {
    /// Process-wide lexicon, built on first use.
    pub fn global() -> &'static Lexicon {
        &LEXICON
    }

    fn load() -> Self {
        // NLTK list (crate feature `nltk`)
        let english = stop_words::get(LANGUAGE::English);
        let lexicon = Self::from_words(INDONESIAN_STOPWORDS, english);
        tracing::debug!(
            indonesian = lexicon.indonesian.len(),
            english = lexicon.english.len(),
            effective = lexicon.stopwords.len(),
            "lexicon loaded"
        );
        lexicon
    }

    pub fn from_words<I, E, S, T>(indonesian: I, english: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let indonesian: HashSet<String> = indonesian
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        let english: HashSet<String> = english
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        let stopwords = build_stopwords(&indonesian, &english);
        Lexicon {
            indonesian,
            english,
            stopwords,
        }
    }

    /// Effective stopword test: negations never match.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Membership in either raw corpus, negations included.
    /// The stuck-word splitter anchors on these.
    pub fn in_corpus(&self, word: &str) -> bool {
        self.indonesian.contains(word) || self.english.contains(word)
    }
}

/// `(indonesian ∪ english) − negations`.
pub fn build_stopwords(indonesian: &HashSet<String>, english: &HashSet<String>) -> HashSet<String> {
    indonesian
        .union(english)
        .filter(|w| !NEGATION_WORDS.contains(&w.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negations_survive_union() {
        let lex = Lexicon::from_words(["yang", "tidak", "bukan"], ["the", "tanpa"]);
        assert!(lex.is_stopword("yang"));
        assert!(lex.is_stopword("the"));
        for neg in NEGATION_WORDS {
            assert!(!lex.is_stopword(neg), "{} must not be a stopword", neg);
        }
        assert!(lex.in_corpus("tidak"));
        assert!(lex.in_corpus("tanpa"));
        assert_eq!(lex.stopwords.len(), 2);
    }

    #[test]
    fn global_lexicon_has_both_languages() {
        let lex = Lexicon::global();
        assert!(lex.is_stopword("yang"));
        assert!(lex.is_stopword("the"));
        assert!(!lex.is_stopword("tidak"));
        assert!(!lex.is_stopword("belum"));
    }

    #[test]
    fn global_corpus_has_no_stray_letters() {
        let lex = Lexicon::global();
        for letter in ["b", "k", "p", "e", "n"] {
            assert!(!lex.in_corpus(letter), "{} should not be in the corpus", letter);
        }
        assert!(lex.in_corpus("ke"));
        assert!(lex.in_corpus("bagi"));
        assert!(lex.english.len() < 200);
        assert!(lex.indonesian.len() < 200);
    }

    #[test]
    fn words_are_normalized() {
        let lex = Lexicon::from_words([" Dan ", ""], Vec::<String>::new());
        assert!(lex.is_stopword("dan"));
        assert_eq!(lex.stopwords.len(), 1);
    }
}
