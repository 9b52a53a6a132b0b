pub mod editor;
pub mod genrow;
pub mod viewer;

use crate::models::record::Table;

/// What an app hands back for one request/response cycle. The front-end only
/// prints it; nothing here knows how it gets rendered.
#[derive(Debug)]
pub struct RenderPage {
    pub heading: String,
    pub secret_line: String,
    pub table: Table,
}
