use std::sync::LazyLock;

use regex::Regex;

/// Ad-tag scripts, tracker calls and trailing boilerplate left in the
/// article bodies of Indonesian news portals. Applied in this order.
pub const MEDIA_NOISE_PATTERNS: &[&str] = &[
    r"let gptinline.*?passback",
    r"window\.googletag.*?enableservices",
    r"gptinline",
    r"googletag",
    r"pubads",
    r"defineslot",
    r"enableservices",
    r"collapseemptydivs",
    r"cmdpushfunction",
    r"tirtodesktopinline",
    // "baca juga" / "tangkap layar" and friends swallow the rest of the text
    r"baca juga.*",
    r"advertisement.*",
    r"video bagi tampil.*",
    r"tangkap layar.*",
];

static NOISE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MEDIA_NOISE_PATTERNS
        .iter()
        .map(|p| Regex::new(&format!("(?is){}", p)).unwrap())
        .collect()
});

/// Blank out every noise pattern match in a lowercased copy of `text`.
pub fn strip_noise(text: &str) -> String {
    let mut out = text.to_lowercase();
    for re in NOISE_RES.iter() {
        out = re.replace_all(&out, " ").into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(NOISE_RES.len(), MEDIA_NOISE_PATTERNS.len());
    }

    #[test]
    fn ad_script_removed() {
        let raw = "Polisi menangkap pelaku. let gptInline = x;\n googletag.display(); passback lalu diperiksa.";
        let out = strip_noise(raw);
        assert!(!out.contains("gptinline"));
        assert!(!out.contains("passback"));
        assert!(out.starts_with("polisi menangkap pelaku."));
        assert!(out.ends_with("lalu diperiksa."));
    }

    #[test]
    fn trailing_boilerplate_cut_to_end() {
        let out = strip_noise("Isi berita utama.\nBaca Juga: Berita lain\nparagraf terakhir");
        assert_eq!(out.trim(), "isi berita utama.");
    }

    #[test]
    fn tracker_calls_blanked() {
        let out = strip_noise("window.googletag.cmd.push(function() { pubads().enableServices(); }) teks");
        assert!(!out.contains("googletag"));
        assert!(!out.contains("pubads"));
        assert!(out.trim_end().ends_with("}) teks"));
    }

    #[test]
    fn clean_text_unchanged_apart_from_case() {
        assert_eq!(strip_noise("Vaksin Aman Digunakan"), "vaksin aman digunakan");
    }
}
