//! Identifier normalization for table and column names taken from sheet text.
use regex::Regex;
use std::sync::LazyLock;

/// Maps arbitrary sheet text to an identifier-safe string.
pub trait IdentifierNormalizer {
    fn normalize(&self, text: &str) -> String;
}

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t]+").expect("Hardcode regex pattern"));
static UNSAFE_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}_ .\-]").expect("Hardcode regex pattern"));
static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("Hardcode regex pattern"));

/// Default normalizer.
///
/// Line breaks and tabs become spaces, characters other than letters, digits,
/// space, `_`, `-` and `.` are removed, space runs collapse, ends are trimmed.
/// The result never contains the backtick used to delimit identifiers.
#[derive(Copy, Clone, Debug, Default)]
pub struct CleanIdentifier;

impl IdentifierNormalizer for CleanIdentifier {
    fn normalize(&self, text: &str) -> String {
        let text = LINE_BREAKS.replace_all(text, " ");
        let text = UNSAFE_CHARACTERS.replace_all(&text, "");
        let text = SPACES.replace_all(&text, " ");
        text.trim().to_owned()
    }
}
