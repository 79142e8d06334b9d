use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Paths {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub template_dir: Option<PathBuf>,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            input_file: PathBuf::from("export.xml"),
            output_dir: PathBuf::from("site"),
            template_dir: None,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Site {
    pub logo_file: String,
    pub logo_alt: String,
    /// Absolute URL prefixes removed from bodies so links become site-relative
    pub known_urls: Vec<String>,
    pub latest_count: usize,
    pub excerpt_chars: usize,
    pub listing_excerpt_chars: usize,
    pub fallback_title: String,
    pub untitled: String,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            logo_file: "logo.png".to_string(),
            logo_alt: "Logo".to_string(),
            known_urls: vec![],
            latest_count: 10,
            excerpt_chars: 200,
            listing_excerpt_chars: 150,
            fallback_title: "Site".to_string(),
            untitled: "Sem título".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub site: Site,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };

    if !str_path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        input_file: parse_path(cfg.paths.input_file)?,
        output_dir: parse_path(cfg.paths.output_dir)?,
        template_dir: cfg.paths.template_dir.map(parse_path).transpose()?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
