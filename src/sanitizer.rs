use lazy_static::lazy_static;
use regex::Regex;

/// Targeted textual cleanup of post bodies. This is not an HTML sanitizer:
/// only script and style blocks and known absolute URL prefixes are touched.
#[derive(Clone, Debug, Default)]
pub struct Sanitizer {
    known_urls: Vec<String>,
}

impl Sanitizer {
    pub fn new(known_urls: &[String]) -> Sanitizer {
        let mut known_urls: Vec<String> = known_urls.iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .collect();
        // longest first, so `https://a.org/blog` wins over `https://a.org`
        known_urls.sort_by(|a, b| b.len().cmp(&a.len()));
        known_urls.dedup();

        Sanitizer { known_urls }
    }

    pub fn has_known_urls(&self) -> bool {
        !self.known_urls.is_empty()
    }

    pub fn clean(&self, body: Option<&str>) -> String {
        let Some(body) = body else {
            return String::new();
        };

        // Removing a block or prefix can glue two fragments into a new
        // match, so keep going until nothing changes.
        let mut current = body.to_string();
        loop {
            let next = self.relativize(&remove_blocks(&current));
            if next == current {
                break;
            }
            current = next;
        }

        current.trim().to_string()
    }

    fn relativize(&self, html: &str) -> String {
        let mut res = html.to_string();
        for url in &self.known_urls {
            res = res.replace(url.as_str(), "");
        }
        res
    }
}

fn remove_blocks(html: &str) -> String {
    lazy_static! {
        static ref SCRIPT_REGEX: Regex = Regex::new(r"(?is)<script[^>]*>.*?</script\s*>").unwrap();
        static ref STYLE_REGEX: Regex = Regex::new(r"(?is)<style[^>]*>.*?</style\s*>").unwrap();
    }

    let html = SCRIPT_REGEX.replace_all(html, "");
    STYLE_REGEX.replace_all(&html, "").into_owned()
}
