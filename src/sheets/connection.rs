use crate::models::{record::Table, sheet::WorksheetRef};
use crate::sheets::cache::{CacheKey, ReadCache};

/// The two operations the apps consume from the remote tabular source.
///
/// The real implementation is [`super::gsheets::GsheetsConnection`]; tests
/// swap in an in-memory fake behind this seam.
pub trait SheetConnection {
    /// Stable identifier of the backing spreadsheet, used as the cache key.
    fn source_id(&self) -> &str;

    async fn read(&self, worksheet: &WorksheetRef) -> Result<Table, String>;

    /// Replaces the whole worksheet with `data` and returns what was written.
    async fn update(&self, worksheet: &WorksheetRef, data: &Table) -> Result<Table, String>;
}

/// One connection plus its caller-held read cache.
pub struct SheetSession<C: SheetConnection> {
    conn: C,
    cache: ReadCache,
}

impl<C: SheetConnection> SheetSession<C> {
    pub fn new(conn: C) -> Self {
        SheetSession { conn, cache: ReadCache::new() }
    }

    /// Read through the cache. `ttl_secs` 0 always refetches.
    pub async fn read(&mut self, worksheet: &WorksheetRef, ttl_secs: u64) -> Result<Table, String> {
        let index = worksheet.index()?;
        let key = CacheKey {
            source: self.conn.source_id().to_string(),
            worksheet: index,
            ttl_secs,
        };

        if let Some(table) = self.cache.get(&key) {
            return Ok(table);
        }

        let table = self.conn.read(worksheet).await?;
        self.cache.store(key, table.clone());
        Ok(table)
    }

    pub async fn update(&mut self, worksheet: &WorksheetRef, data: &Table) -> Result<Table, String> {
        self.conn.update(worksheet, data).await
    }

    pub fn invalidate_reads(&mut self) {
        self.cache.invalidate_all();
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::testconn::FakeSheet;

    #[tokio::test]
    async fn cached_read_only_hits_the_connection_once() {
        let mut session = SheetSession::new(FakeSheet::with_rows(2));
        let worksheet = WorksheetRef::Index(0);

        let first = session.read(&worksheet, 600).await.unwrap();
        let second = session.read(&worksheet, 600).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(session.conn.read_calls(), 1);
    }

    #[tokio::test]
    async fn ttl_zero_refetches_every_time() {
        let mut session = SheetSession::new(FakeSheet::with_rows(1));
        let worksheet = WorksheetRef::Index(0);

        session.read(&worksheet, 0).await.unwrap();
        session.read(&worksheet, 0).await.unwrap();

        assert_eq!(session.conn.read_calls(), 2);
    }

    #[tokio::test]
    async fn invalidation_forces_a_refetch() {
        let mut session = SheetSession::new(FakeSheet::with_rows(1));
        let worksheet = WorksheetRef::Index(0);

        session.read(&worksheet, 600).await.unwrap();
        session.invalidate_reads();
        session.read(&worksheet, 600).await.unwrap();

        assert_eq!(session.conn.read_calls(), 2);
    }

    #[tokio::test]
    async fn name_addressing_is_rejected_before_the_connection() {
        let mut session = SheetSession::new(FakeSheet::with_rows(1));

        let err = session
            .read(&WorksheetRef::Name("Sheet1".to_string()), 0)
            .await
            .unwrap_err();

        assert!(err.contains("Sheet1"));
        assert_eq!(session.conn.read_calls(), 0);
    }
}
