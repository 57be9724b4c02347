pub const MIN_TITLE_WORDS: usize = 3;
pub const MIN_BODY_WORDS: usize = 10;
pub const MIN_EXPLANATION_WORDS: usize = 5;

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True when a cleaned row is too thin to be a usable sample. An empty
/// explanation never rejects a row on its own.
pub fn is_weird(title: &str, body: &str, explanation: &str) -> bool {
    word_count(title) < MIN_TITLE_WORDS
        || word_count(body) < MIN_BODY_WORDS
        || (!explanation.is_empty() && word_count(explanation) < MIN_EXPLANATION_WORDS)
}
