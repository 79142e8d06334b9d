use std::io;

use ramhorns::Template;

use crate::path_resolver::PathResolver;
use crate::view::templates::compile;

/// Site wide values every page needs, passed explicitly to each render.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteContext {
    pub title: String,
    /// Shown in the footer
    pub year: i32,
    pub logo_file: String,
    pub logo_alt: String,
}

#[derive(ramhorns::Content)]
struct ViewPage<'a> {
    title: &'a str,
    site_title: &'a str,
    year: i32,
    logo_alt: &'a str,
    css_path: String,
    script_path: String,
    logo_path: String,
    home_path: String,
    posts_path: String,
    pages_path: String,
    content: &'a str,
}

/// Wraps a content fragment in the site chrome. Titles are escaped, the
/// fragment goes in as is.
pub struct PageRenderer {
    template: Template<'static>,
    site: SiteContext,
}

impl PageRenderer {
    pub fn new(page_tpl_src: String, site: SiteContext) -> io::Result<PageRenderer> {
        Ok(PageRenderer {
            template: compile("page", page_tpl_src)?,
            site,
        })
    }

    pub fn site(&self) -> &SiteContext {
        &self.site
    }

    pub fn render(&self, title: &str, content: &str, depth: usize) -> String {
        let paths = PathResolver::new(depth);
        self.template.render(&ViewPage {
            title,
            site_title: self.site.title.as_str(),
            year: self.site.year,
            logo_alt: self.site.logo_alt.as_str(),
            css_path: paths.stylesheet(),
            script_path: paths.script(),
            logo_path: paths.logo(&self.site.logo_file),
            home_path: paths.home(),
            posts_path: paths.posts(),
            pages_path: paths.pages(),
            content,
        })
    }
}
