use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::text_utils::publish_day;

pub mod parser;
pub mod xml_tree;

pub use parser::ExportParser;

#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: String,
    pub login: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Post,
    Page,
}

impl ItemKind {
    pub fn from_export(post_type: &str) -> Option<ItemKind> {
        match post_type {
            "post" => Some(ItemKind::Post),
            "page" => Some(ItemKind::Page),
            _ => None,
        }
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Post => write!(f, "post"),
            ItemKind::Page => write!(f, "page"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    /// Already sanitized
    pub body: String,
    pub slug: String,
    pub date: String,
    pub author: String,
    pub categories: Vec<String>,
    pub kind: ItemKind,
}

impl ContentItem {
    pub fn publish_day(&self) -> &str {
        publish_day(&self.date)
    }

    pub fn file_name(&self) -> String {
        format!("{}.html", self.slug)
    }
}

impl Display for ContentItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} id={}, slug={}, date={}, title={}", self.kind, self.id, self.slug, self.date, self.title)
    }
}

/// Normalized content of one export document.
#[derive(Debug, Clone)]
pub struct Export {
    pub site: Site,
    /// Keyed by export author id
    pub authors: BTreeMap<String, Author>,
    /// Keyed by export term id
    pub categories: BTreeMap<String, Category>,
    pub posts: Vec<ContentItem>,
    pub pages: Vec<ContentItem>,
    /// Items dropped because of their type or status
    pub skipped: usize,
}

impl Export {
    /// Declared slug of the category with this display name, if any.
    pub fn declared_category_slug(&self, name: &str) -> Option<&str> {
        self.categories.values()
            .find(|c| c.name == name && !c.slug.is_empty())
            .map(|c| c.slug.as_str())
    }
}
