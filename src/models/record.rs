use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Format of the `Added` column, matching what the sheet already holds.
pub const ADDED_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

pub const GENERATED_ITEM_NAME: &str = "Additional HSMA Merchandise";

/// One row of the merchandise worksheet.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Record {
    pub item: String,
    pub category: String, // Free text on the sheet, Category for generated rows
    pub units: u32,
    pub unit_cost: f64,
    pub total: f64,
    pub added: String,
}

#[derive(Debug, Deserialize, Serialize, EnumIter, PartialEq, Clone, Copy)]
pub enum Category {
    Stickers,
    Pets,
    Clothing,
    Mugs,
}
impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Stickers => "Stickers",
            Category::Pets => "Pets",
            Category::Clothing => "Clothing",
            Category::Mugs => "Mugs",
        }
    }
}
impl fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "stickers" => Ok(Self::Stickers),
            "pets" => Ok(Self::Pets),
            "clothing" => Ok(Self::Clothing),
            "mugs" => Ok(Self::Mugs),
            _ => Err(format!("{} is not a merchandise category.", s)),
        }
    }
}

/// Ordered rows of one worksheet. The remote store is the source of truth,
/// this is only ever a snapshot of it.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Record>,
}
impl Table {
    pub fn new(rows: Vec<Record>) -> Self {
        Table { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Newest rows first. Rows whose `Added` cell does not parse sink to the
    /// bottom; equal timestamps keep their sheet order.
    pub fn sort_desc_by_added(&mut self) {
        self.rows
            .sort_by(|a, b| parse_added(&b.added).cmp(&parse_added(&a.added)));
    }
}

pub fn parse_added(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), ADDED_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn row(added: &str) -> Record {
        Record {
            item: "HSMA Merchandise".to_string(),
            category: "Mugs".to_string(),
            units: 100,
            unit_cost: 2.5,
            total: 250.0,
            added: added.to_string(),
        }
    }

    #[test]
    fn category_round_trips_through_as_str() {
        for cat in Category::iter() {
            assert_eq!(Category::from_str(cat.as_str()).unwrap(), cat);
        }
        assert!(Category::from_str("Posters").is_err());
    }

    #[test]
    fn added_parses_day_first() {
        let ts = parse_added("02/01/2025 13:37:00").unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-01-02 13:37:00");
        assert!(parse_added("2025-01-02 13:37:00").is_none());
    }

    #[test]
    fn sort_is_descending_with_bad_timestamps_last() {
        let mut table = Table::new(vec![
            row("01/01/2024 09:00:00"),
            row("not a date"),
            row("15/06/2025 12:00:00"),
            row("01/01/2025 09:00:00"),
        ]);
        table.sort_desc_by_added();

        let order: Vec<&str> = table.rows.iter().map(|r| r.added.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "15/06/2025 12:00:00",
                "01/01/2025 09:00:00",
                "01/01/2024 09:00:00",
                "not a date"
            ]
        );
    }
}
