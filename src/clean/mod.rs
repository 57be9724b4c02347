pub mod noise;
pub mod quality;
pub mod text;
pub mod title;
pub mod tokens;

pub use quality::is_weird;
pub use text::clean_text;
pub use title::clean_title;
pub use tokens::Cleaner;

impl Cleaner<'_> {
    /// Two-pass body pipeline: text cleaning → tokens/stopwords/stems.
    pub fn clean_body(&self, raw: &str) -> String {
        self.normalize_text(&clean_text(raw))
    }
}
