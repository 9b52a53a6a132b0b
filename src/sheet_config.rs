use std::{path::PathBuf, sync::LazyLock};

use crate::models::sheet::{SheetInfo, WorksheetRef};

pub static SHEET: LazyLock<SheetInfo> = LazyLock::new(|| {
    SheetInfo {
        spreadsheet: String::from(
            "https://docs.google.com/spreadsheets/d/1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms/edit#gid=0",
        ),
        // Passing the tab name ('Sheet1') returns a 400 resource not found,
        // the zero-based index works
        worksheet: WorksheetRef::Index(0),
        ttl_read_secs: 600,
    }
});

pub static SECRETS_DB_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Ok(custom) = std::env::var("MERCH2SHEET_SECRETS") {
        return PathBuf::from(custom);
    }
    PathBuf::from(format!("/home/{}/.merch2sheet/secrets.db", whoami::username()))
});
