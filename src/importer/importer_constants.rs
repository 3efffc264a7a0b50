//! Column headings for the two spreadsheet export formats. The extended
//! format is semicolon-delimited and adds per-category flag columns; the
//! legacy format is tab-delimited. Rows are addressed by header name, never
//! by position.

/// Date column candidates, probed in order
pub const DATE_COLUMNS: [&str; 2] = ["Date (MM-DD-YYYY)", "Date"];

pub const VENDOR_COLUMN: &str = "Store / Vendor";

pub const CATEGORY_COLUMN: &str = "Expense Category";

pub const SUBCATEGORY_COLUMN: &str = "SubCategory";

pub const NOTES_COLUMN: &str = "Notes (Optional)";

/// Amount column candidates, probed in order; the first strictly positive
/// value wins
pub const AMOUNT_COLUMNS: [&str; 3] = ["$ Amount", "INDISPENSABILE", "EVITABILE"];

/// Flag column candidates per boolean field, one per header schema
pub const EXCLUDE_COLUMNS: [&str; 2] = ["Escludi", "Escludi Spesa Da analysts"];
pub const INDISPENSABLE_COLUMNS: [&str; 2] = ["Spesa indispensabile", "INDISPENSABILE"];
pub const AVOIDABLE_COLUMNS: [&str; 2] = ["Spesa evitabile", "EVITABILE"];

/// Category flag columns evaluated in priority order when the explicit
/// category column is blank; each maps to a category name
pub const CATEGORY_FLAG_COLUMNS: [(&str, &str); 6] = [
    ("Holidays", "Holidays"),
    ("Regali", "Regali"),
    ("Mediche", "Mediche"),
    ("Abbigl.", "Abbigliamento"),
    ("Bollette", "Bollette"),
    ("Affitto", "Affitto"),
];

/// Category assigned when no explicit value and no flag is set
pub const FALLBACK_CATEGORY: &str = "Other";

/// Vendor label substituted for blank vendor cells; vendor is part of the
/// natural key and cannot be empty
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

/// Placeholder token spreadsheets use for "no amount"
pub const AMOUNT_PLACEHOLDER: &str = "--";

/// Tokens treated as true when normalizing boolean cells (case-insensitive)
pub const TRUTHY_TOKENS: [&str; 3] = ["true", "1", "yes"];
