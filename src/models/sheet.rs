use serde::{Deserialize, Serialize};

/// How a worksheet inside the spreadsheet is addressed.
///
/// The backing service answers "400 resource not found" when a worksheet is
/// addressed by its tab name, so only the zero-based index is supported.
/// `Name` exists so a caller holding one gets a readable rejection instead of
/// the service's 400.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub enum WorksheetRef {
    Index(u32),
    Name(String),
}
impl WorksheetRef {
    pub fn index(&self) -> Result<u32, String> {
        match self {
            WorksheetRef::Index(i) => Ok(*i),
            WorksheetRef::Name(n) => Err(format!(
                "Worksheet addressed by name ({}) is not supported, the sheets service returns 400 resource not found for names. Use the zero-based index instead.",
                n
            )),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SheetInfo {
    pub spreadsheet: String, // Full docs.google.com URL or the bare spreadsheet id
    pub worksheet: WorksheetRef,
    pub ttl_read_secs: u64, // Viewer reads; the editor always bypasses with 0
}
