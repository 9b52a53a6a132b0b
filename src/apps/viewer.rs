use crate::apps::RenderPage;
use crate::models::sheet::SheetInfo;
use crate::sheets::connection::{SheetConnection, SheetSession};

/// The read-only app: fetch worksheet contents and hand them to the caller
/// for display. There is deliberately no code path to `update` here.
pub struct ViewerApp<C: SheetConnection> {
    session: SheetSession<C>,
    sheet: SheetInfo,
    secret_word: String,
}

impl<C: SheetConnection> ViewerApp<C> {
    pub fn new(conn: C, sheet: SheetInfo, secret_word: String) -> Self {
        ViewerApp { session: SheetSession::new(conn), sheet, secret_word }
    }

    /// One request/response cycle: read (through the cache, at the configured
    /// ttl) and return the page as-is, in sheet order.
    pub async fn render(&mut self) -> Result<RenderPage, String> {
        let table = self
            .session
            .read(&self.sheet.worksheet, self.sheet.ttl_read_secs)
            .await?;

        Ok(RenderPage {
            heading: String::from("HSMA merchandise worksheet"),
            secret_line: format!("The secret word is: {}", self.secret_word),
            table,
        })
    }

    #[cfg(test)]
    pub fn connection(&self) -> &C {
        self.session.connection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sheet::WorksheetRef;
    use crate::sheets::testconn::FakeSheet;

    fn sheet_info() -> SheetInfo {
        SheetInfo {
            spreadsheet: "fake-spreadsheet".to_string(),
            worksheet: WorksheetRef::Index(0),
            ttl_read_secs: 600,
        }
    }

    #[tokio::test]
    async fn renders_the_rows_in_sheet_order() {
        let fake = FakeSheet::with_rows(3);
        let seeded = fake.rows();

        let mut app = ViewerApp::new(fake, sheet_info(), "squirrel".to_string());
        let page = app.render().await.unwrap();

        assert_eq!(page.table.rows, seeded);
        assert_eq!(page.secret_line, "The secret word is: squirrel");
    }

    #[tokio::test]
    async fn never_writes_to_the_worksheet() {
        let mut app = ViewerApp::new(FakeSheet::with_rows(2), sheet_info(), "squirrel".to_string());

        app.render().await.unwrap();
        app.render().await.unwrap();

        assert_eq!(app.connection().update_calls(), 0);
    }

    #[tokio::test]
    async fn repeat_renders_inside_the_ttl_reuse_the_cached_read() {
        let mut app = ViewerApp::new(FakeSheet::with_rows(2), sheet_info(), "squirrel".to_string());

        app.render().await.unwrap();
        app.render().await.unwrap();

        assert_eq!(app.connection().read_calls(), 1);
    }
}
