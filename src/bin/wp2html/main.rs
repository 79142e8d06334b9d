use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use spdlog::{info, warn};

use wp2html::config::Config;
use wp2html::logger::configure_logger;
use wp2html::logo_patch::LogoPatcher;
use wp2html::site_writer::build_site;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "wp2html.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Command {
    /// Converts a WordPress export into a static site
    Convert(ConvertArgs),
    /// Replaces text logo placeholders with the logo image in a generated site
    UpdateLogos(UpdateLogosArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Export XML file, overrides the configured one
    #[arg(short, long)]
    input: Option<String>,

    /// Output directory, overrides the configured one
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args, Debug)]
struct UpdateLogosArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Generated site directory, overrides the configured one
    #[arg(short, long)]
    output: Option<String>,
}

fn load_config(config_path: Option<String>) -> Result<Config> {
    let config = match open_config(config_path.map(PathBuf::from)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Please run wp2html --help");
            anyhow::bail!(err);
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    Ok(config)
}

fn convert_cmd(args: ConvertArgs) -> Result<()> {
    let mut config = load_config(args.config_path)?;
    if let Some(input) = args.input {
        config.paths.input_file = PathBuf::from(input);
    }
    if let Some(output) = args.output {
        config.paths.output_dir = PathBuf::from(output);
    }

    info!("Converting {} into {}", config.paths.input_file.display(), config.paths.output_dir.display());

    let report = build_site(&config)
        .with_context(|| format!("Could not convert {}", config.paths.input_file.display()))?;

    info!("Conversion finished: {} posts, {} pages, {} categories, {} periods, {} files written",
        report.posts, report.pages, report.categories, report.periods, report.files);
    info!("Open {} in a browser to see the site",
        config.paths.output_dir.join("index.html").display());

    Ok(())
}

fn update_logos_cmd(args: UpdateLogosArgs) -> Result<()> {
    let mut config = load_config(args.config_path)?;
    if let Some(output) = args.output {
        config.paths.output_dir = PathBuf::from(output);
    }

    let patcher = LogoPatcher::new(&config.site.logo_file, &config.site.logo_alt);
    let updated = patcher.patch_site(&config.paths.output_dir)
        .with_context(|| format!("Could not update logos in {}", config.paths.output_dir.display()))?;

    info!("{} files updated with the logo {}", updated, config.site.logo_file);

    Ok(())
}

fn main() -> Result<()> {
    match Command::parse() {
        Command::Convert(args) => convert_cmd(args),
        Command::UpdateLogos(args) => update_logos_cmd(args),
    }
}
