pub mod config;
pub mod logger;
pub mod text_utils;
pub mod sanitizer;
pub mod export;
pub mod taxonomy;
pub mod path_resolver;
pub mod view;
pub mod site_writer;
pub mod logo_patch;
mod test_data;
