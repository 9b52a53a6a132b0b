pub mod sheet_url;
pub mod table_values;
