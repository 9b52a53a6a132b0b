use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::models::{
    record::{Record, Table},
    sheet::WorksheetRef,
};
use crate::sheets::connection::SheetConnection;

/// In-memory stand-in for the remote sheet, with call counters so tests can
/// assert who read and who wrote.
pub struct FakeSheet {
    rows: Mutex<Vec<Record>>,
    read_count: AtomicUsize,
    update_count: AtomicUsize,
}

impl FakeSheet {
    pub fn empty() -> Self {
        FakeSheet {
            rows: Mutex::new(Vec::new()),
            read_count: AtomicUsize::new(0),
            update_count: AtomicUsize::new(0),
        }
    }

    pub fn with_rows(n: usize) -> Self {
        let fake = Self::empty();
        {
            let mut rows = fake.rows.lock().unwrap();
            for i in 0..n {
                rows.push(Record {
                    item: format!("Seeded merch {}", i),
                    category: "Stickers".to_string(),
                    units: 100 + i as u32,
                    unit_cost: 1.5,
                    total: (100 + i as u32) as f64 * 1.5,
                    added: format!("{:02}/01/2025 09:00:00", (i % 27) + 1),
                });
            }
        }
        fake
    }

    pub fn rows(&self) -> Vec<Record> {
        self.rows.lock().unwrap().clone()
    }

    pub fn read_calls(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_count.load(Ordering::SeqCst)
    }
}

impl SheetConnection for FakeSheet {
    fn source_id(&self) -> &str {
        "fake-spreadsheet"
    }

    async fn read(&self, worksheet: &WorksheetRef) -> Result<Table, String> {
        worksheet.index()?;
        self.read_count.fetch_add(1, Ordering::SeqCst);
        Ok(Table::new(self.rows()))
    }

    async fn update(&self, worksheet: &WorksheetRef, data: &Table) -> Result<Table, String> {
        worksheet.index()?;
        self.update_count.fetch_add(1, Ordering::SeqCst);
        *self.rows.lock().unwrap() = data.rows.clone();
        Ok(data.clone())
    }
}
