//! Canned rows used across harnesses.

use origins_core::ResultRecord;

/// Two rows in the order the server returns them.
pub const TWO_ROWS: &[(&str, &str)] = &[
    ("Gene A", "http://ex/a"),
    ("Gene B", "http://ex/b"),
];

/// A label and uri carrying HTML-significant characters.
pub const MARKUP_ROW: &[(&str, &str)] = &[("<b>bold</b> & co", "http://ex/?a=1&b=\"2\"")];

pub fn records(rows: &[(&str, &str)]) -> Vec<ResultRecord> {
    rows.iter().map(|(l, u)| ResultRecord::new(*l, *u)).collect()
}

/// Expected HTML fragment for one row with escaping off.
pub fn fragment(label: &str, uri: &str) -> String {
    format!(
        "<div class=\"list-group-item\">\
         <h4 class=\"list-group-item-heading\" title=\"{label}\">{label}</h4>\
         <div class=\"list-group-item-text\" title=\"{uri}\">{uri}</div>\
         </div>"
    )
}
