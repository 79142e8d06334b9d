use std::io;

use ramhorns::Template;

use crate::export::ContentItem;
use crate::taxonomy::{CategoryBucket, PeriodBucket, Taxonomy};
use crate::text_utils::excerpt;
use crate::view::templates::{compile, TemplateSources};

pub const ALL_POSTS_DIR: &str = "posts/todos";
pub const CATEGORIES_DIR: &str = "posts/categorias";
pub const PERIODS_DIR: &str = "posts/datas";
pub const ALL_PAGES_DIR: &str = "pages/todas";
pub const INDEX_FILE: &str = "index.html";

#[derive(ramhorns::Content)]
struct PostEntry {
    link: String,
    title: String,
    date: String,
    author: String,
    excerpt: String,
    has_tags: bool,
    tags: Vec<ViewTag>,
}

#[derive(ramhorns::Content)]
struct ViewTag {
    tag: String,
}

#[derive(ramhorns::Content)]
struct CategorySection {
    index_link: String,
    name: String,
    count: usize,
    entries: Vec<PostEntry>,
}

#[derive(ramhorns::Content)]
struct PeriodEntry {
    period_link: String,
    period_title: String,
    period_count: usize,
}

#[derive(ramhorns::Content)]
struct PageEntry {
    link: String,
    title: String,
}

#[derive(ramhorns::Content)]
struct HomePage<'a> {
    site_title: &'a str,
    post_count: usize,
    category_count: usize,
    posts: Vec<PostEntry>,
}

#[derive(ramhorns::Content)]
struct RecentPage {
    posts: Vec<PostEntry>,
}

#[derive(ramhorns::Content)]
struct PostsPage {
    has_posts: bool,
    categories: Vec<CategorySection>,
    periods: Vec<PeriodEntry>,
    all_posts: Vec<PostEntry>,
}

#[derive(ramhorns::Content)]
struct PagesPage {
    pages: Vec<PageEntry>,
}

#[derive(ramhorns::Content)]
struct BucketPage<'a> {
    heading: &'a str,
    posts: Vec<PostEntry>,
}

/// Title and inner HTML of a page, ready for the page chrome.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub title: String,
    pub content: String,
}

pub struct ListRenderer {
    home: Template<'static>,
    recent: Template<'static>,
    posts: Template<'static>,
    pages: Template<'static>,
    bucket: Template<'static>,
    pub latest_count: usize,
    pub excerpt_chars: usize,
    pub listing_excerpt_chars: usize,
}

impl ListRenderer {
    pub fn new(sources: TemplateSources, latest_count: usize, excerpt_chars: usize, listing_excerpt_chars: usize) -> io::Result<ListRenderer> {
        Ok(ListRenderer {
            home: compile("home", sources.home)?,
            recent: compile("recent", sources.recent)?,
            posts: compile("posts", sources.posts)?,
            pages: compile("pages", sources.pages)?,
            bucket: compile("bucket", sources.bucket)?,
            latest_count,
            excerpt_chars,
            listing_excerpt_chars,
        })
    }

    pub fn home(&self, site_title: &str, taxonomy: &Taxonomy) -> Fragment {
        let posts = taxonomy.latest(self.latest_count).iter()
            .map(|p| entry(p, root_post_link(p), self.excerpt_chars))
            .collect();

        Fragment {
            title: "Início".to_string(),
            content: self.home.render(&HomePage {
                site_title,
                post_count: taxonomy.recent.len(),
                category_count: taxonomy.categories.len(),
                posts,
            }),
        }
    }

    pub fn recent_news(&self, taxonomy: &Taxonomy) -> Fragment {
        let posts = taxonomy.latest(self.latest_count).iter()
            .map(|p| entry(p, root_post_link(p), self.excerpt_chars))
            .collect();

        Fragment {
            title: "Últimas Notícias e Atividades".to_string(),
            content: self.recent.render(&RecentPage { posts }),
        }
    }

    pub fn posts_index(&self, taxonomy: &Taxonomy) -> Fragment {
        let categories = taxonomy.categories.values()
            .map(|bucket| CategorySection {
                index_link: format!("{}/{}/{}", CATEGORIES_DIR, bucket.key, INDEX_FILE),
                name: bucket.name.clone(),
                count: bucket.posts.len(),
                entries: bucket.posts.iter()
                    .map(|p| entry(p, root_post_link(p), self.listing_excerpt_chars))
                    .collect(),
            })
            .collect();

        let periods = taxonomy.periods_newest_first().into_iter()
            .map(|bucket| PeriodEntry {
                period_link: format!("{}/{}/{}", PERIODS_DIR, bucket.key.folder(), INDEX_FILE),
                period_title: bucket.key.title(),
                period_count: bucket.posts.len(),
            })
            .collect();

        let all_posts = taxonomy.recent.iter()
            .map(|p| entry(p, root_post_link(p), 0))
            .collect();

        Fragment {
            title: "Posts".to_string(),
            content: self.posts.render(&PostsPage {
                has_posts: !taxonomy.recent.is_empty(),
                categories,
                periods,
                all_posts,
            }),
        }
    }

    pub fn pages_index(&self, pages: &[ContentItem]) -> Fragment {
        let mut sorted: Vec<&ContentItem> = pages.iter().collect();
        sorted.sort_by(|a, b| a.title.cmp(&b.title));

        let pages = sorted.into_iter()
            .map(|p| PageEntry {
                link: format!("{}/{}", ALL_PAGES_DIR, p.file_name()),
                title: p.title.clone(),
            })
            .collect();

        Fragment {
            title: "Páginas".to_string(),
            content: self.pages.render(&PagesPage { pages }),
        }
    }

    /// Index of one category folder; links stay inside the folder.
    pub fn category_index(&self, bucket: &CategoryBucket) -> Fragment {
        let title = format!("Categoria: {}", bucket.name);
        let heading = format!("Posts da categoria: {}", bucket.name);
        self.bucket_index(title, &heading, &bucket.posts)
    }

    /// Index of one year-month folder; links stay inside the folder.
    pub fn period_index(&self, bucket: &PeriodBucket) -> Fragment {
        let title = bucket.key.title();
        self.bucket_index(title.clone(), &title, &bucket.posts)
    }

    fn bucket_index(&self, title: String, heading: &str, posts: &[&ContentItem]) -> Fragment {
        let posts = posts.iter()
            .map(|p| entry(p, p.file_name(), self.listing_excerpt_chars))
            .collect();

        Fragment {
            title,
            content: self.bucket.render(&BucketPage { heading, posts }),
        }
    }
}

fn root_post_link(post: &ContentItem) -> String {
    format!("{}/{}", ALL_POSTS_DIR, post.file_name())
}

fn entry(post: &ContentItem, link: String, excerpt_chars: usize) -> PostEntry {
    PostEntry {
        link,
        title: post.title.clone(),
        date: post.publish_day().to_string(),
        author: post.author.clone(),
        excerpt: excerpt(&post.body, excerpt_chars),
        has_tags: !post.categories.is_empty(),
        tags: post.categories.iter().map(|c| ViewTag { tag: c.clone() }).collect(),
    }
}
