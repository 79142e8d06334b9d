use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use ramhorns::Template;
use spdlog::debug;

pub const STYLESHEET_SRC: &str = include_str!("../../res/static/style.css");
pub const SCRIPT_SRC: &str = include_str!("../../res/static/main.js");

const PAGE_TPL: &str = include_str!("../../res/templates/page.html");
const HOME_TPL: &str = include_str!("../../res/templates/home.html");
const RECENT_TPL: &str = include_str!("../../res/templates/recent.html");
const POSTS_TPL: &str = include_str!("../../res/templates/posts.html");
const PAGES_TPL: &str = include_str!("../../res/templates/pages.html");
const BUCKET_TPL: &str = include_str!("../../res/templates/bucket.html");

/// Template sources, embedded by default. A template directory may replace
/// any of them by holding a file with the same name.
#[derive(Clone, Debug)]
pub struct TemplateSources {
    pub page: String,
    pub home: String,
    pub recent: String,
    pub posts: String,
    pub pages: String,
    pub bucket: String,
}

impl TemplateSources {
    pub fn embedded() -> TemplateSources {
        TemplateSources {
            page: PAGE_TPL.to_string(),
            home: HOME_TPL.to_string(),
            recent: RECENT_TPL.to_string(),
            posts: POSTS_TPL.to_string(),
            pages: PAGES_TPL.to_string(),
            bucket: BUCKET_TPL.to_string(),
        }
    }

    pub fn load(template_dir: Option<&Path>) -> io::Result<TemplateSources> {
        let Some(dir) = template_dir else {
            return Ok(Self::embedded());
        };

        let read = |name: &str, default: &str| -> io::Result<String> {
            let path = dir.join(name);
            if !path.is_file() {
                return Ok(default.to_string());
            }
            debug!("Using template {}", path.display());
            fs::read_to_string(&path)
                .map_err(|e| io::Error::new(e.kind(), format!("Error reading template {}: {}", path.display(), e)))
        };

        Ok(TemplateSources {
            page: read("page.html", PAGE_TPL)?,
            home: read("home.html", HOME_TPL)?,
            recent: read("recent.html", RECENT_TPL)?,
            posts: read("posts.html", POSTS_TPL)?,
            pages: read("pages.html", PAGES_TPL)?,
            bucket: read("bucket.html", BUCKET_TPL)?,
        })
    }
}

pub fn compile(name: &str, source: String) -> io::Result<Template<'static>> {
    match Template::new(source) {
        Ok(x) => Ok(x),
        Err(e) => {
            Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing {} template: {}", name, e)))
        }
    }
}
