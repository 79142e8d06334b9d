use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];

/// Turns any label into a lowercase, hyphen separated, ASCII token
/// that is safe to use as a file or folder name.
pub fn slugify(text: &str) -> String {
    lazy_static! {
        static ref NON_WORD_REGEX: Regex = Regex::new(r"[^\w\s-]").unwrap();
        static ref SEPARATOR_REGEX: Regex = Regex::new(r"[-\s]+").unwrap();
    }

    let ascii = unidecode::unidecode(text);
    let cleaned = NON_WORD_REGEX.replace_all(&ascii, "");
    let joined = SEPARATOR_REGEX.replace_all(&cleaned, "-");
    joined.trim_matches('-').to_lowercase()
}

/// Export slugs come percent-encoded when the title has non-ASCII characters.
pub fn decode_slug(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Calendar part of an export date, `2025-03-15 10:00:00` -> `2025-03-15`
pub fn publish_day(date: &str) -> &str {
    match date.char_indices().nth(10) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get((month as usize).checked_sub(1)?).copied()
}

/// Plain text teaser of an HTML body. Tags are dropped, whitespace collapsed
/// and the text cut at `max_chars` characters.
pub fn excerpt(html: &str, max_chars: usize) -> String {
    lazy_static! {
        static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
        static ref SPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
        static ref UNFINISHED_ENTITY_REGEX: Regex = Regex::new(r"&#?[A-Za-z0-9]*$").unwrap();
    }

    let text = TAG_REGEX.replace_all(html, " ");
    let text = SPACE_REGEX.replace_all(&text, " ");
    let text = text.trim().replace('<', "&lt;");

    if text.chars().count() <= max_chars {
        return text;
    }

    let mut cut: String = text.chars().take(max_chars).collect();
    // do not leave half of an entity behind
    if let Some(m) = UNFINISHED_ENTITY_REGEX.find(&cut) {
        let start = m.start();
        cut.truncate(start);
    }
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Festa Anual"), "festa-anual");
        assert_eq!(slugify("Eventos"), "eventos");
        assert_eq!(slugify("Ação Social -- 2024!"), "acao-social-2024");
        assert_eq!(slugify("  Educação   e Cultura "), "educacao-e-cultura");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_is_stable() {
        let once = slugify("Jovem Candango: 2024 / Inscrições");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_decode_slug() {
        assert_eq!(decode_slug("doa%c3%a7%c3%a3o"), "doação");
        assert_eq!(decode_slug("festa-anual"), "festa-anual");
    }

    #[test]
    fn test_publish_day() {
        assert_eq!(publish_day("2025-03-15 10:42:00"), "2025-03-15");
        assert_eq!(publish_day("2025"), "2025");
        assert_eq!(publish_day(""), "");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), Some("Janeiro"));
        assert_eq!(month_name(3), Some("Março"));
        assert_eq!(month_name(12), Some("Dezembro"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("<p>Hello <b>world</b></p>", 200), "Hello world");
        assert_eq!(excerpt("<p>abcdef</p>", 3), "abc...");
        assert_eq!(excerpt("ab &amp; cd", 4), "ab...");
        assert_eq!(excerpt("", 10), "");
        assert_eq!(excerpt("açúcar", 3), "açú...");
    }

    #[test]
    fn test_excerpt_keeps_plain_ampersands() {
        assert_eq!(excerpt("R&D: a long sentence about research", 20), "R&D: a long sentence...");
        assert_eq!(excerpt("Tom & Jerry are friends", 10), "Tom & Jerr...");
        assert_eq!(excerpt("Tom &amp; Jerry", 7), "Tom...");
        assert_eq!(excerpt("Tom &amp; Jerry", 9), "Tom &amp;...");
        assert_eq!(excerpt("x &#8211; y", 5), "x...");
        assert_eq!(excerpt("Tom & Jerry", 5), "Tom...");
    }
}
