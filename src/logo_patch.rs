use std::path::{Path, PathBuf};
use std::{fs, io};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use spdlog::{debug, info, warn};

use crate::path_resolver::PathResolver;

/// Swaps text-only logo placeholders for the logo image in already
/// generated pages. Links follow each page's depth below `site_dir`.
pub struct LogoPatcher {
    logo_file: String,
    logo_alt: String,
}

impl LogoPatcher {
    pub fn new(logo_file: &str, logo_alt: &str) -> LogoPatcher {
        LogoPatcher {
            logo_file: logo_file.to_string(),
            logo_alt: logo_alt.to_string(),
        }
    }

    /// Returns how many files were rewritten.
    pub fn patch_site(&self, site_dir: &Path) -> io::Result<usize> {
        let mut files = vec![];
        collect_html(site_dir, &mut files)?;
        files.sort();

        let mut updated = 0;
        for file in &files {
            let Some(paths) = PathResolver::for_file(site_dir, file) else {
                continue;
            };

            let html = match fs::read_to_string(file) {
                Ok(html) => html,
                Err(e) => {
                    warn!("Skipping {}: {}", file.display(), e);
                    continue;
                }
            };

            if let Some(patched) = self.patch(&html, &paths) {
                fs::write(file, patched)?;
                debug!("Logo updated in {}", file.display());
                updated += 1;
            }
        }

        info!("Logo updated in {} of {} files", updated, files.len());
        Ok(updated)
    }

    /// `None` when the page has no placeholder left.
    pub fn patch(&self, html: &str, paths: &PathResolver) -> Option<String> {
        lazy_static! {
            // only text and line breaks inside, so image logos are left alone
            static ref PLACEHOLDER_REGEX: Regex =
                Regex::new(r#"(?i)<div class="logo-circle">((?:[^<]|<br\s*/?>)*)</div>"#).unwrap();
        }

        if !PLACEHOLDER_REGEX.is_match(html) {
            return None;
        }

        let logo = paths.logo(&self.logo_file);
        let patched = PLACEHOLDER_REGEX.replace_all(html, |_: &Captures| {
            format!(r#"<div class="logo-circle"><img src="{}" alt="{}" /></div>"#, logo, self.logo_alt)
        });
        Some(patched.into_owned())
    }
}

fn collect_html(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_html(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "html") {
            files.push(path);
        }
    }
    Ok(())
}
