pub mod list_renderer;
pub mod page_renderer;
pub mod templates;
