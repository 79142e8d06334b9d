use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use spdlog::{debug, info};

use crate::config;
use crate::export::xml_tree::{parse_document, Element, Vocabulary};
use crate::export::{Author, Category, ContentItem, Export, ItemKind, Site};
use crate::sanitizer::Sanitizer;
use crate::text_utils::{decode_slug, slugify};

const PUBLISHED: &str = "publish";
const LAST_RESORT_SLUG: &str = "sem-titulo";

pub struct ExportParser {
    sanitizer: Sanitizer,
    fallback_title: String,
    untitled: String,
}

impl ExportParser {
    pub fn new(sanitizer: Sanitizer, site: &config::Site) -> ExportParser {
        ExportParser {
            sanitizer,
            fallback_title: site.fallback_title.clone(),
            untitled: site.untitled.clone(),
        }
    }

    pub fn parse_file(&self, path: &Path) -> io::Result<Export> {
        let xml = match fs::read_to_string(path) {
            Ok(xml) => xml,
            Err(e) => return Err(io::Error::new(e.kind(), format!("Error reading export {}: {}", path.display(), e))),
        };
        self.parse(&xml)
    }

    pub fn parse(&self, xml: &str) -> io::Result<Export> {
        let root = parse_document(xml)?;
        let Some(channel) = root.child(Vocabulary::Rss, "channel") else {
            return Err(io::Error::new(ErrorKind::InvalidData, "Export has no <channel> element"));
        };

        let site = Site {
            title: text_or(channel.child_text(Vocabulary::Rss, "title"), &self.fallback_title),
            url: text_or(channel.child_text(Vocabulary::Rss, "link"), ""),
        };

        // without configured prefixes, links to the exported site itself are relativized
        let site_sanitizer;
        let sanitizer = if self.sanitizer.has_known_urls() || site.url.is_empty() {
            &self.sanitizer
        } else {
            debug!("No known URLs configured, using the export link {}", site.url);
            site_sanitizer = Sanitizer::new(&[site.url.trim_end_matches('/').to_string()]);
            &site_sanitizer
        };

        let authors = parse_authors(channel);
        let categories = parse_categories(channel);

        let mut posts = vec![];
        let mut pages = vec![];
        let mut skipped = 0;

        let items: Vec<&Element> = channel.children_named(Vocabulary::Rss, "item").collect();
        info!("Processing {} items...", items.len());

        for item in items {
            match self.parse_item(sanitizer, item) {
                Some(content) if content.kind == ItemKind::Post => posts.push(content),
                Some(content) => pages.push(content),
                None => skipped += 1,
            }
        }

        info!("Found {} posts and {} pages ({} items skipped)", posts.len(), pages.len(), skipped);

        Ok(Export {
            site,
            authors,
            categories,
            posts,
            pages,
            skipped,
        })
    }

    /// `None` for anything that is not a published post or page.
    fn parse_item(&self, sanitizer: &Sanitizer, item: &Element) -> Option<ContentItem> {
        let id = text_or(item.child_text(Vocabulary::Export, "post_id"), "");

        let post_type = item.child_text(Vocabulary::Export, "post_type")?.trim();
        let Some(kind) = ItemKind::from_export(post_type) else {
            debug!("Skipping item {} of type {}", id, post_type);
            return None;
        };

        let status = item.child_text(Vocabulary::Export, "status").map(str::trim);
        if status != Some(PUBLISHED) {
            debug!("Skipping {} {} with status {:?}", kind, id, status);
            return None;
        }

        let raw_title = item.child_text(Vocabulary::Rss, "title");
        let title = text_or(raw_title, &self.untitled);
        let body = sanitizer.clean(
            item.child(Vocabulary::Content, "encoded").map(|e| e.text.as_str()));
        let slug = item_slug(item.child_text(Vocabulary::Export, "post_name"), raw_title, &id);
        let date = text_or(item.child_text(Vocabulary::Export, "post_date"), "");
        let author = text_or(item.child_text(Vocabulary::DublinCore, "creator"), "");

        let categories = item.children_named(Vocabulary::Rss, "category")
            .filter(|c| c.attribute("domain") == Some("category"))
            .map(|c| c.text.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        Some(ContentItem {
            id,
            title,
            body,
            slug,
            date,
            author,
            categories,
            kind,
        })
    }
}

fn text_or(text: Option<&str>, default: &str) -> String {
    text.map(str::trim).unwrap_or(default).to_string()
}

/// Declared slug first, then one derived from the title, then from the id.
fn item_slug(declared: Option<&str>, title: Option<&str>, id: &str) -> String {
    let candidates = [
        declared.map(|s| slugify(&decode_slug(s.trim()))),
        title.map(slugify),
        Some(slugify(&format!("item-{}", id))).filter(|_| !id.is_empty()),
    ];

    candidates.into_iter()
        .flatten()
        .find(|slug| !slug.is_empty())
        .unwrap_or_else(|| LAST_RESORT_SLUG.to_string())
}

fn parse_authors(channel: &Element) -> BTreeMap<String, Author> {
    let mut authors = BTreeMap::new();
    for author in channel.children_named(Vocabulary::Export, "author") {
        let id = author.child_text(Vocabulary::Export, "author_id");
        let login = author.child(Vocabulary::Export, "author_login");
        let (Some(id), Some(login)) = (id, login) else {
            continue;
        };

        let login = login.text.trim().to_string();
        let display_name = text_or(author.child_text(Vocabulary::Export, "author_display_name"), &login);
        authors.insert(id.trim().to_string(), Author {
            id: id.trim().to_string(),
            login,
            display_name,
        });
    }
    authors
}

fn parse_categories(channel: &Element) -> BTreeMap<String, Category> {
    let mut categories = BTreeMap::new();
    for category in channel.children_named(Vocabulary::Export, "category") {
        let id = category.child_text(Vocabulary::Export, "term_id");
        let name = category.child_text(Vocabulary::Export, "cat_name");
        let (Some(id), Some(name)) = (id, name) else {
            continue;
        };

        let slug = category.child_text(Vocabulary::Export, "category_nicename")
            .map(|s| decode_slug(s.trim()))
            .unwrap_or_default();
        categories.insert(id.trim().to_string(), Category {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            slug,
        });
    }
    categories
}
