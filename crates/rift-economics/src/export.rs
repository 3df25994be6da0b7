//! CSV export of allocation results

use crate::result::{Allocation, RewardResult};
use rift_core::Currency;

/// Column names, in output order
pub const CSV_HEADERS: [&str; 6] = ["name", "damage", "token", "dust", "contract", "tome"];

/// Quote a text field, doubling embedded quotes
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn csv_row(allocation: &Allocation) -> String {
    let mut fields = vec![
        quote(&allocation.name),
        quote(&format!("{}%", allocation.damage)),
    ];
    fields.extend(
        Currency::ALL
            .iter()
            .map(|currency| allocation.rewards[*currency].to_string()),
    );
    fields.join(",")
}

/// Render a result as CSV, one row per participant in result order.
///
/// An empty result renders as an empty string (no header).
pub fn to_csv(result: &RewardResult) -> String {
    if result.is_empty() {
        return String::new();
    }

    let mut rows = Vec::with_capacity(result.len() + 1);
    rows.push(CSV_HEADERS.join(","));
    rows.extend(result.rewards.iter().map(csv_row));
    rows.join("\n")
}
