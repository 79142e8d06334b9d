use std::path::Path;

const PARENT_DIR: &str = "../";

pub const STYLESHEET: &str = "css/style.css";
pub const SCRIPT: &str = "js/main.js";
pub const HOME_PAGE: &str = "index.html";
pub const POSTS_PAGE: &str = "posts.html";
pub const PAGES_PAGE: &str = "pages.html";
pub const RECENT_PAGE: &str = "ultimas-noticias.html";

/// Links from a page to the site root, for a page living `depth` folders
/// below it. Depth 0 is the root itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    prefix: String,
}

impl PathResolver {
    pub fn new(depth: usize) -> PathResolver {
        PathResolver {
            prefix: PARENT_DIR.repeat(depth),
        }
    }

    /// Depth of `file` as seen from `root`, `None` when it is not below it.
    pub fn for_file(root: &Path, file: &Path) -> Option<PathResolver> {
        let relative = file.strip_prefix(root).ok()?;
        let depth = relative.parent()
            .map(|p| p.components().count())
            .unwrap_or(0);
        Some(PathResolver::new(depth))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn resolve(&self, root_relative: &str) -> String {
        format!("{}{}", self.prefix, root_relative)
    }

    pub fn stylesheet(&self) -> String {
        self.resolve(STYLESHEET)
    }

    pub fn script(&self) -> String {
        self.resolve(SCRIPT)
    }

    pub fn home(&self) -> String {
        self.resolve(HOME_PAGE)
    }

    pub fn posts(&self) -> String {
        self.resolve(POSTS_PAGE)
    }

    pub fn pages(&self) -> String {
        self.resolve(PAGES_PAGE)
    }

    pub fn logo(&self, logo_file: &str) -> String {
        self.resolve(logo_file)
    }
}
