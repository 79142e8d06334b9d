use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use lazy_static::lazy_static;
use regex::Regex;

use crate::export::{ContentItem, Export};
use crate::text_utils::{month_name, slugify};

pub const UNCATEGORIZED: &str = "sem-categoria";
pub const UNCATEGORIZED_NAME: &str = "Sem Categoria";
/// Two levels, so undated pages live as deep as `<year>/<month>` ones
pub const UNDATED: &str = "sem-data/sem-data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    Month { year: u32, month: u32 },
    Undated,
}

impl PeriodKey {
    /// Year and month from the `YYYY-MM` prefix of an export date.
    pub fn from_date(date: &str) -> PeriodKey {
        lazy_static! {
            static ref PERIOD_REGEX: Regex = Regex::new(r"^(\d{4})-(\d{2})").unwrap();
        }

        let Some(caps) = PERIOD_REGEX.captures(date.trim()) else {
            return PeriodKey::Undated;
        };
        let year = caps[1].parse::<u32>();
        let month = caps[2].parse::<u32>();
        match (year, month) {
            (Ok(year), Ok(month)) if (1..=12).contains(&month) => PeriodKey::Month { year, month },
            _ => PeriodKey::Undated,
        }
    }

    /// Folder below `posts/datas`
    pub fn folder(&self) -> String {
        match self {
            PeriodKey::Month { year, month } => format!("{:04}/{:02}", year, month),
            PeriodKey::Undated => UNDATED.to_string(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            PeriodKey::Month { year, month } => {
                let name = month_name(*month).unwrap_or_default();
                format!("Posts de {} de {}", name, year)
            }
            PeriodKey::Undated => "Posts sem data".to_string(),
        }
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder())
    }
}

#[derive(Debug)]
pub struct CategoryBucket<'a> {
    /// Folder name below `posts/categorias`
    pub key: String,
    pub name: String,
    pub posts: Vec<&'a ContentItem>,
}

#[derive(Debug)]
pub struct PeriodBucket<'a> {
    pub key: PeriodKey,
    pub posts: Vec<&'a ContentItem>,
}

/// Three independent views over the posts of an export. Items are borrowed,
/// never copied or changed.
#[derive(Debug)]
pub struct Taxonomy<'a> {
    /// Every post, newest first
    pub recent: Vec<&'a ContentItem>,
    pub categories: BTreeMap<String, CategoryBucket<'a>>,
    pub periods: BTreeMap<PeriodKey, PeriodBucket<'a>>,
}

impl<'a> Taxonomy<'a> {
    pub fn build(export: &'a Export) -> Taxonomy<'a> {
        let mut recent: Vec<&ContentItem> = export.posts.iter().collect();
        sort_newest_first(&mut recent);

        let mut categories: BTreeMap<String, CategoryBucket> = BTreeMap::new();
        let mut periods: BTreeMap<PeriodKey, PeriodBucket> = BTreeMap::new();

        for post in recent.iter().copied() {
            let (key, name) = primary_category(export, post);
            categories.entry(key.clone())
                .or_insert_with(|| CategoryBucket { key, name, posts: vec![] })
                .posts.push(post);

            let key = PeriodKey::from_date(&post.date);
            periods.entry(key)
                .or_insert_with(|| PeriodBucket { key, posts: vec![] })
                .posts.push(post);
        }

        Taxonomy {
            recent,
            categories,
            periods,
        }
    }

    pub fn latest(&self, count: usize) -> &[&'a ContentItem] {
        &self.recent[..count.min(self.recent.len())]
    }

    /// Months newest first, the undated bucket last.
    pub fn periods_newest_first(&self) -> Vec<&PeriodBucket<'a>> {
        let mut periods: Vec<&PeriodBucket> = self.periods.values()
            .filter(|p| p.key != PeriodKey::Undated)
            .rev()
            .collect();
        periods.extend(self.periods.get(&PeriodKey::Undated));
        periods
    }
}

/// Folder key and display name of the first category of a post. The
/// category list of the export is consulted for a declared slug.
pub fn primary_category(export: &Export, post: &ContentItem) -> (String, String) {
    let Some(name) = post.categories.first() else {
        return (UNCATEGORIZED.to_string(), UNCATEGORIZED_NAME.to_string());
    };

    let key = export.declared_category_slug(name)
        .map(slugify)
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| slugify(name));

    if key.is_empty() {
        (UNCATEGORIZED.to_string(), UNCATEGORIZED_NAME.to_string())
    } else {
        (key, name.clone())
    }
}

/// Export dates are `YYYY-MM-DD hh:mm:ss`, so text order is date order.
/// The sort is stable: ties keep the export order.
pub fn sort_newest_first(items: &mut [&ContentItem]) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use crate::config;
    use crate::export::ExportParser;
    use crate::sanitizer::Sanitizer;
    use crate::test_data::{EXPORT_DATA, SINGLE_POST_EXPORT};

    use super::*;

    fn parse(xml: &str) -> Export {
        ExportParser::new(Sanitizer::default(), &config::Site::default()).parse(xml).unwrap()
    }

    #[test]
    fn test_period_key() {
        assert_eq!(PeriodKey::from_date("2025-03-15 10:00:00"), PeriodKey::Month { year: 2025, month: 3 });
        assert_eq!(PeriodKey::from_date("2025-03"), PeriodKey::Month { year: 2025, month: 3 });
        assert_eq!(PeriodKey::from_date("0000-00-00 00:00:00"), PeriodKey::Undated);
        assert_eq!(PeriodKey::from_date("15/03/2025"), PeriodKey::Undated);
        assert_eq!(PeriodKey::from_date(""), PeriodKey::Undated);

        assert_eq!(PeriodKey::Month { year: 2025, month: 3 }.folder(), "2025/03");
        assert_eq!(PeriodKey::Undated.folder(), "sem-data/sem-data");
        assert_eq!(PeriodKey::Month { year: 2025, month: 3 }.title(), "Posts de Março de 2025");
    }

    #[test]
    fn test_recent_view() {
        let export = parse(EXPORT_DATA);
        let taxonomy = Taxonomy::build(&export);
        let ids: Vec<&str> = taxonomy.recent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["100", "102", "101", "103"]);

        assert_eq!(taxonomy.latest(2).len(), 2);
        assert_eq!(taxonomy.latest(10).len(), 4);
    }

    #[test]
    fn test_category_view() {
        let export = parse(EXPORT_DATA);
        let taxonomy = Taxonomy::build(&export);

        let keys: Vec<&str> = taxonomy.categories.keys().map(|k| k.as_str()).collect();
        // `Ação Social` uses its declared slug, `Geral` is never primary
        assert_eq!(keys, ["acao", "eventos", "sem-categoria"]);

        let eventos = &taxonomy.categories["eventos"];
        assert_eq!(eventos.name, "Eventos");
        let ids: Vec<&str> = eventos.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["100", "102"]);

        assert_eq!(taxonomy.categories["acao"].name, "Ação Social");
        assert_eq!(taxonomy.categories["sem-categoria"].name, "Sem Categoria");
    }

    #[test]
    fn test_period_view() {
        let export = parse(EXPORT_DATA);
        let taxonomy = Taxonomy::build(&export);

        let march = &taxonomy.periods[&PeriodKey::Month { year: 2025, month: 3 }];
        let ids: Vec<&str> = march.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["100", "102"]);

        let folders: Vec<String> = taxonomy.periods_newest_first().iter().map(|p| p.key.folder()).collect();
        assert_eq!(folders, ["2025/03", "2024/11", "sem-data/sem-data"]);
    }

    #[test]
    fn test_every_post_in_exactly_one_bucket() {
        let export = parse(EXPORT_DATA);
        let taxonomy = Taxonomy::build(&export);

        for post in &export.posts {
            let in_categories = taxonomy.categories.values()
                .filter(|b| b.posts.iter().any(|p| p.id == post.id))
                .count();
            let in_periods = taxonomy.periods.values()
                .filter(|b| b.posts.iter().any(|p| p.id == post.id))
                .count();
            assert_eq!(in_categories, 1, "{}", post);
            assert_eq!(in_periods, 1, "{}", post);
        }

        let total: usize = taxonomy.categories.values().map(|b| b.posts.len()).sum();
        assert_eq!(total, export.posts.len());
        let total: usize = taxonomy.periods.values().map(|b| b.posts.len()).sum();
        assert_eq!(total, export.posts.len());
    }

    #[test]
    fn test_primary_category_only() {
        let export = parse(SINGLE_POST_EXPORT);
        let taxonomy = Taxonomy::build(&export);
        assert_eq!(taxonomy.categories.len(), 1);
        assert!(taxonomy.categories.contains_key("eventos"));
        assert!(!taxonomy.categories.contains_key("geral"));
    }

    #[test]
    fn test_empty_export() {
        let export = parse("<rss><channel/></rss>");
        let taxonomy = Taxonomy::build(&export);
        assert!(taxonomy.recent.is_empty());
        assert!(taxonomy.categories.is_empty());
        assert!(taxonomy.periods.is_empty());
        assert!(taxonomy.latest(10).is_empty());
    }
}
