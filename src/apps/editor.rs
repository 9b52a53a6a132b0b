use crate::apps::{RenderPage, genrow};
use crate::models::sheet::SheetInfo;
use crate::sheets::connection::{SheetConnection, SheetSession};

pub enum EditorAction {
    Render,
    UpdateWorksheet,
}

/// The read-write app. Every render bypasses the cache (ttl 0) and shows the
/// newest rows first; the update action appends one generated row and writes
/// the whole worksheet back.
///
/// The update is not idempotent (two triggers append two rows) and there is
/// no locking: concurrent sessions race and the backing store keeps whichever
/// write lands last.
pub struct EditorApp<C: SheetConnection> {
    session: SheetSession<C>,
    sheet: SheetInfo,
    secret_word: String,
}

impl<C: SheetConnection> EditorApp<C> {
    pub fn new(conn: C, sheet: SheetInfo, secret_word: String) -> Self {
        EditorApp { session: SheetSession::new(conn), sheet, secret_word }
    }

    /// Handle one action and return the page to show for it. UpdateWorksheet
    /// ends in a fresh render so the caller always sees the new state.
    pub async fn handle(&mut self, action: EditorAction) -> Result<RenderPage, String> {
        if let EditorAction::UpdateWorksheet = action {
            // Re-fetch uncached right before writing, so rows added by other
            // sessions since our last render make it into the write-back.
            let mut table = self.session.read(&self.sheet.worksheet, 0).await?;

            table.rows.push(genrow::generate_record());

            self.session.update(&self.sheet.worksheet, &table).await?;
            self.session.invalidate_reads();
        }

        self.render_page().await
    }

    async fn render_page(&mut self) -> Result<RenderPage, String> {
        let mut table = self.session.read(&self.sheet.worksheet, 0).await?;
        table.sort_desc_by_added();

        Ok(RenderPage {
            heading: String::from("HSMA merchandise worksheet (editor)"),
            secret_line: format!("The secret word is: {}", self.secret_word),
            table,
        })
    }

    #[cfg(test)]
    pub fn connection(&self) -> &C {
        self.session.connection()
    }
}
