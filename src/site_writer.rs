use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use chrono::{Datelike, Local};
use spdlog::{debug, error, info};

use crate::config::Config;
use crate::export::{Export, ExportParser};
use crate::path_resolver::{HOME_PAGE, PAGES_PAGE, POSTS_PAGE, RECENT_PAGE, SCRIPT, STYLESHEET};
use crate::sanitizer::Sanitizer;
use crate::taxonomy::Taxonomy;
use crate::view::list_renderer::{Fragment, ListRenderer, ALL_PAGES_DIR, ALL_POSTS_DIR, CATEGORIES_DIR, INDEX_FILE, PERIODS_DIR};
use crate::view::page_renderer::{PageRenderer, SiteContext};
use crate::view::templates::{TemplateSources, SCRIPT_SRC, STYLESHEET_SRC};

/// One file of the generated site, path relative to the output root.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub path: PathBuf,
    pub content: String,
    /// What produced the file, for conflict reports
    pub origin: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub posts: usize,
    pub pages: usize,
    pub categories: usize,
    pub periods: usize,
    pub files: usize,
}

/// Folders between a root relative path and the root.
pub fn depth_of(path: &Path) -> usize {
    path.parent()
        .map(|p| p.components().count())
        .unwrap_or(0)
}

pub struct SiteWriter {
    output_dir: PathBuf,
    page_renderer: PageRenderer,
    list_renderer: ListRenderer,
}

impl SiteWriter {
    pub fn new(output_dir: &Path, page_renderer: PageRenderer, list_renderer: ListRenderer) -> SiteWriter {
        SiteWriter {
            output_dir: output_dir.to_path_buf(),
            page_renderer,
            list_renderer,
        }
    }

    /// Renders everything, then writes. Nothing is written when two
    /// producers claim the same output path.
    pub fn materialize(&self, export: &Export) -> io::Result<BuildReport> {
        let taxonomy = Taxonomy::build(export);
        let files = self.plan(export, &taxonomy)?;
        let written = self.write(&files)?;

        let report = BuildReport {
            posts: export.posts.len(),
            pages: export.pages.len(),
            categories: taxonomy.categories.len(),
            periods: taxonomy.periods.len(),
            files: written,
        };

        info!("Files saved in {}", self.output_dir.display());
        info!("{} posts, {} pages", report.posts, report.pages);
        info!("Organized in {} categories and {} periods (year/month)", report.categories, report.periods);

        Ok(report)
    }

    pub fn plan(&self, export: &Export, taxonomy: &Taxonomy) -> io::Result<Vec<OutputFile>> {
        let mut files = vec![
            asset(STYLESHEET, STYLESHEET_SRC),
            asset(SCRIPT, SCRIPT_SRC),
        ];

        let lists = &self.list_renderer;
        let site_title = self.page_renderer.site().title.as_str();
        files.push(self.page(HOME_PAGE, lists.home(site_title, taxonomy), "home page"));
        files.push(self.page(POSTS_PAGE, lists.posts_index(taxonomy), "post listing"));
        files.push(self.page(PAGES_PAGE, lists.pages_index(&export.pages), "page listing"));
        files.push(self.page(RECENT_PAGE, lists.recent_news(taxonomy), "recent news"));

        // Each post lives in three places: its category, its period and the flat folder
        for bucket in taxonomy.categories.values() {
            let dir = format!("{}/{}", CATEGORIES_DIR, bucket.key);
            for post in &bucket.posts {
                files.push(self.item_page(&dir, post.file_name(), &post.title, &post.body, &format!("post {}", post.id)));
            }
            files.push(self.page(&format!("{}/{}", dir, INDEX_FILE), lists.category_index(bucket),
                                 &format!("category index {}", bucket.key)));
        }

        for bucket in taxonomy.periods.values() {
            let dir = format!("{}/{}", PERIODS_DIR, bucket.key.folder());
            for post in &bucket.posts {
                files.push(self.item_page(&dir, post.file_name(), &post.title, &post.body, &format!("post {}", post.id)));
            }
            files.push(self.page(&format!("{}/{}", dir, INDEX_FILE), lists.period_index(bucket),
                                 &format!("period index {}", bucket.key)));
        }

        for post in &export.posts {
            files.push(self.item_page(ALL_POSTS_DIR, post.file_name(), &post.title, &post.body, &format!("post {}", post.id)));
        }

        for page in &export.pages {
            files.push(self.item_page(ALL_PAGES_DIR, page.file_name(), &page.title, &page.body, &format!("page {}", page.id)));
        }

        check_conflicts(&files)?;
        debug!("Planned {} files", files.len());

        Ok(files)
    }

    pub fn write(&self, files: &[OutputFile]) -> io::Result<usize> {
        // Flat folders exist even without content
        for dir in [ALL_POSTS_DIR, ALL_PAGES_DIR] {
            fs::create_dir_all(self.output_dir.join(dir))?;
        }

        for file in files {
            let path = self.output_dir.join(&file.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            debug!("Writing {}", path.display());
            if let Err(e) = fs::write(&path, &file.content) {
                return Err(io::Error::new(e.kind(), format!("Error writing {}: {}", path.display(), e)));
            }
        }

        Ok(files.len())
    }

    fn page(&self, path: &str, fragment: Fragment, origin: &str) -> OutputFile {
        let path = PathBuf::from(path);
        let content = self.page_renderer.render(&fragment.title, &fragment.content, depth_of(&path));
        OutputFile {
            path,
            content,
            origin: origin.to_string(),
        }
    }

    fn item_page(&self, dir: &str, file_name: String, title: &str, body: &str, origin: &str) -> OutputFile {
        let path = Path::new(dir).join(file_name);
        let content = self.page_renderer.render(title, body, depth_of(&path));
        OutputFile {
            path,
            content,
            origin: origin.to_string(),
        }
    }
}

fn asset(path: &str, content: &str) -> OutputFile {
    OutputFile {
        path: PathBuf::from(path),
        content: content.to_string(),
        origin: format!("asset {}", path),
    }
}

fn check_conflicts(files: &[OutputFile]) -> io::Result<()> {
    let mut by_path: BTreeMap<&Path, Vec<&str>> = BTreeMap::new();
    for file in files {
        by_path.entry(file.path.as_path()).or_default().push(file.origin.as_str());
    }

    let conflicts: Vec<String> = by_path.iter()
        .filter(|(_, origins)| origins.len() > 1)
        .map(|(path, origins)| format!("{} ({})", path.display(), origins.join(", ")))
        .collect();

    if conflicts.is_empty() {
        return Ok(());
    }

    for conflict in &conflicts {
        error!("Output path produced more than once: {}", conflict);
    }
    Err(io::Error::new(
        ErrorKind::AlreadyExists,
        format!("{} output paths produced more than once: {}", conflicts.len(), conflicts.join("; "))))
}

/// Full run: read the export, render every view and write the site.
pub fn build_site(config: &Config) -> io::Result<BuildReport> {
    info!("Reading export {}", config.paths.input_file.display());
    let parser = ExportParser::new(Sanitizer::new(&config.site.known_urls), &config.site);
    let export = parser.parse_file(&config.paths.input_file)?;

    let sources = TemplateSources::load(config.paths.template_dir.as_deref())?;
    let site = SiteContext {
        title: export.site.title.clone(),
        year: Local::now().year(),
        logo_file: config.site.logo_file.clone(),
        logo_alt: config.site.logo_alt.clone(),
    };

    let page_renderer = PageRenderer::new(sources.page.clone(), site)?;
    let list_renderer = ListRenderer::new(
        sources,
        config.site.latest_count,
        config.site.excerpt_chars,
        config.site.listing_excerpt_chars,
    )?;

    SiteWriter::new(&config.paths.output_dir, page_renderer, list_renderer).materialize(&export)
}

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;
    use regex::Regex;
    use tempfile::TempDir;

    use crate::config;
    use crate::test_data::{EMPTY_EXPORT, EXPORT_DATA, SINGLE_POST_EXPORT};

    use super::*;

    fn writer(output_dir: &Path) -> SiteWriter {
        let sources = TemplateSources::embedded();
        let site = SiteContext {
            title: "Obras Sociais".to_string(),
            year: 2025,
            logo_file: "logo.png".to_string(),
            logo_alt: "Logo".to_string(),
        };
        let page_renderer = PageRenderer::new(sources.page.clone(), site).unwrap();
        let list_renderer = ListRenderer::new(sources, 10, 200, 150).unwrap();
        SiteWriter::new(output_dir, page_renderer, list_renderer)
    }

    fn parse(xml: &str) -> Export {
        let parser = ExportParser::new(Sanitizer::new(&["https://example.org".to_string()]), &config::Site::default());
        parser.parse(xml).unwrap()
    }

    fn html_files(dir: &Path) -> Vec<PathBuf> {
        let mut files = vec![];
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                files.extend(html_files(&path));
            } else if path.extension().is_some_and(|e| e == "html") {
                files.push(path);
            }
        }
        files.sort();
        files
    }

    /// Follows a relative link the way a browser would.
    fn follow(file: &Path, href: &str) -> PathBuf {
        let mut target = file.parent().unwrap().to_path_buf();
        for part in href.split('/') {
            match part {
                ".." => { target.pop(); }
                "." | "" => {}
                x => target.push(x),
            }
        }
        target
    }

    #[test]
    fn test_single_post_scenario() {
        let out = TempDir::new().unwrap();
        let export = parse(SINGLE_POST_EXPORT);
        let report = writer(out.path()).materialize(&export).unwrap();

        let expected = [
            "posts/todos/festa-anual.html",
            "posts/categorias/eventos/festa-anual.html",
            "posts/categorias/eventos/index.html",
            "posts/datas/2025/03/festa-anual.html",
            "posts/datas/2025/03/index.html",
        ];
        for path in expected {
            let content = fs::read_to_string(out.path().join(path)).unwrap();
            assert!(content.contains("Festa Anual"), "{}", path);
        }

        let under_posts: Vec<PathBuf> = html_files(&out.path().join("posts"));
        assert_eq!(under_posts.len(), 5);
        assert!(!out.path().join("posts/categorias/geral").exists());

        let index = fs::read_to_string(out.path().join("posts/categorias/eventos/index.html")).unwrap();
        assert!(index.contains(r#"<a href="festa-anual.html">Festa Anual</a>"#));
        assert!(!index.contains("Categoria: Geral"));

        // the same rendered body in the three copies
        let flat = fs::read_to_string(out.path().join("posts/todos/festa-anual.html")).unwrap();
        let in_category = fs::read_to_string(out.path().join("posts/categorias/eventos/festa-anual.html")).unwrap();
        assert!(flat.contains("<p>Todos convidados.</p>"));
        assert!(in_category.contains("<p>Todos convidados.</p>"));

        assert_eq!(report, BuildReport {
            posts: 1,
            pages: 0,
            categories: 1,
            periods: 1,
            files: 2 + 4 + 5,
        });
    }

    #[test]
    fn test_no_posts_scenario() {
        let out = TempDir::new().unwrap();
        let export = parse(EMPTY_EXPORT);
        writer(out.path()).materialize(&export).unwrap();

        let posts = fs::read_to_string(out.path().join("posts.html")).unwrap();
        assert!(posts.contains("Nenhum post encontrado."));
        assert!(!out.path().join("posts/categorias").exists());
        assert!(!out.path().join("posts/datas").exists());
        assert!(out.path().join("posts/todos").is_dir());
        assert!(out.path().join("pages/todas").is_dir());

        for path in ["index.html", "pages.html", "ultimas-noticias.html", "css/style.css", "js/main.js"] {
            assert!(out.path().join(path).is_file(), "{}", path);
        }
    }

    #[test]
    fn test_full_export_layout() {
        let out = TempDir::new().unwrap();
        let export = parse(EXPORT_DATA);
        let report = writer(out.path()).materialize(&export).unwrap();

        for path in [
            "posts/categorias/acao/doacao-de-enxovais.html",
            "posts/datas/2024/11/doacao-de-enxovais.html",
            "posts/categorias/sem-categoria/item-103.html",
            "posts/datas/sem-data/sem-data/item-103.html",
            "posts/datas/sem-data/sem-data/index.html",
            "pages/todas/contato.html",
        ] {
            assert!(out.path().join(path).is_file(), "{}", path);
        }

        assert_eq!(report.posts, 4);
        assert_eq!(report.pages, 1);
        assert_eq!(report.categories, 3);
        assert_eq!(report.periods, 3);
        assert_eq!(report.files, html_files(out.path()).len() + 2);
    }

    #[test]
    fn test_relative_links_resolve_at_every_depth() {
        lazy_static! {
            static ref LINK_REGEX: Regex = Regex::new(r##"(?:href|src)="([^"#:]+\.(?:css|js|png))""##).unwrap();
        }

        let out = TempDir::new().unwrap();
        let export = parse(EXPORT_DATA);
        writer(out.path()).materialize(&export).unwrap();
        fs::write(out.path().join("logo.png"), b"png").unwrap();

        for file in html_files(out.path()) {
            let html = fs::read_to_string(&file).unwrap();
            let mut links = 0;
            for cap in LINK_REGEX.captures_iter(&html) {
                let target = follow(&file, &cap[1]);
                assert!(target.is_file(), "{} -> {}", file.display(), &cap[1]);
                links += 1;
            }
            assert_eq!(links, 3, "{}", file.display());
        }
    }

    #[test]
    fn test_navigation_resolves() {
        let out = TempDir::new().unwrap();
        let export = parse(EXPORT_DATA);
        writer(out.path()).materialize(&export).unwrap();

        let file = out.path().join("posts/datas/2025/03/index.html");
        let html = fs::read_to_string(&file).unwrap();
        assert!(html.contains(r#"href="../../../../posts.html""#));
        assert!(follow(&file, "../../../../posts.html").is_file());
        assert!(follow(&file, "festa-anual.html").is_file());
    }

    #[test]
    fn test_slug_collision_is_reported() {
        let out = TempDir::new().unwrap();
        let mut export = parse(EXPORT_DATA);
        export.posts[2].slug = "festa-anual".to_string();

        let err = writer(out.path()).materialize(&export).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        let msg = err.to_string();
        assert!(msg.contains("festa-anual.html"));
        assert!(msg.contains("post 100"));
        assert!(msg.contains("post 102"));

        // nothing was written
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rerun_overwrites() {
        let out = TempDir::new().unwrap();
        let mut export = parse(SINGLE_POST_EXPORT);
        writer(out.path()).materialize(&export).unwrap();

        export.posts[0].body = "<p>Novo texto.</p>".to_string();
        writer(out.path()).materialize(&export).unwrap();

        let flat = fs::read_to_string(out.path().join("posts/todos/festa-anual.html")).unwrap();
        assert!(flat.contains("<p>Novo texto.</p>"));
        assert!(!flat.contains("Todos convidados."));
    }

    #[test]
    fn test_build_site() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("export.xml");
        let xml = SINGLE_POST_EXPORT.replace(
            "<p>Todos convidados.</p>",
            r#"<p><a href="https://example.org/festa">Todos convidados.</a></p>"#);
        fs::write(&input, xml).unwrap();

        let mut config = Config::default();
        config.paths.input_file = input;
        config.paths.output_dir = dir.path().join("site");

        let report = build_site(&config).unwrap();
        assert_eq!(report.posts, 1);

        // no known URLs configured, the export link is used
        let flat = fs::read_to_string(dir.path().join("site/posts/todos/festa-anual.html")).unwrap();
        assert!(flat.contains(r#"<a href="/festa">Todos convidados.</a>"#));
        assert!(!flat.contains("https://example.org"));

        let home = fs::read_to_string(dir.path().join("site/index.html")).unwrap();
        assert!(home.contains("<title>Início - Obras Sociais</title>"));
        assert!(home.contains(r#"<a href="posts/todos/festa-anual.html">Festa Anual</a>"#));
    }

    #[test]
    fn test_build_site_fails_before_writing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("export.xml");
        fs::write(&input, "<rss><channel>").unwrap();

        let mut config = Config::default();
        config.paths.input_file = input;
        config.paths.output_dir = dir.path().join("site");

        let err = build_site(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(!dir.path().join("site").exists());
    }

    #[test]
    fn test_depth_of() {
        assert_eq!(depth_of(Path::new("index.html")), 0);
        assert_eq!(depth_of(Path::new("posts/todos/a.html")), 2);
        assert_eq!(depth_of(Path::new("posts/datas/2025/03/a.html")), 4);
    }
}
