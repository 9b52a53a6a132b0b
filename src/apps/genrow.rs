use chrono::Local;
use strum::IntoEnumIterator;

use crate::models::record::{ADDED_FORMAT, Category, GENERATED_ITEM_NAME, Record};

/// One synthetic merchandise row: units uniform in [100, 5000], unit cost
/// uniform in [1, 11] rounded to 2 decimals, category picked from the 4
/// labels, stamped with local time.
pub fn generate_record() -> Record {
    let units: u32 = rand::random_range(100..=5000);
    let unit_cost: f64 =
        ((rand::random::<f64>() + rand::random_range(1..=10) as f64) * 100.0).round() / 100.0;

    let categories: Vec<Category> = Category::iter().collect();
    let category = categories[rand::random_range(0..categories.len())];

    Record {
        item: GENERATED_ITEM_NAME.to_string(),
        category: category.as_str().to_string(),
        units,
        unit_cost,
        total: units as f64 * unit_cost,
        added: Local::now().format(ADDED_FORMAT).to_string(),
    }
}
