use chrono::NaiveDate;
use csv::StringRecord;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;
use std::sync::Arc;

use crate::categories::{CategoryError, CategoryServiceTrait};
use crate::errors::Result;
use crate::expenses::{ExpenseRepositoryTrait, NewExpense};
use crate::importer::importer_constants::*;
use crate::importer::importer_errors::ImportError;
use crate::importer::importer_model::ImportReport;

/// Trait defining the contract for the CSV import service
pub trait ImportServiceTrait: Send + Sync {
    fn import_expenses(&self, input: &mut dyn Read, user_id: &str) -> Result<ImportReport>;
}

/// Imports spreadsheet CSV exports into one user's expenses. Rows are
/// normalized through a chain of format heuristics and upserted on the
/// (user, date, vendor, amount) natural key, so re-running the same file is
/// idempotent.
pub struct ImportService {
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
}

impl ImportService {
    pub fn new(
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
    ) -> Self {
        Self {
            expense_repository,
            category_service,
        }
    }
}

impl ImportServiceTrait for ImportService {
    fn import_expenses(&self, input: &mut dyn Read, user_id: &str) -> Result<ImportReport> {
        // The whole file is buffered before any row is committed; an
        // unreadable stream is fatal, a bad row is not.
        let mut contents = String::new();
        input
            .read_to_string(&mut contents)
            .map_err(ImportError::from)?;

        let delimiter = sniff_delimiter(&contents);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(contents.as_bytes());

        let headers = header_index(reader.headers().map_err(ImportError::from)?);
        if headers.is_empty() {
            return Err(ImportError::MissingHeader.into());
        }

        let date_column = DATE_COLUMNS
            .iter()
            .find(|c| headers.contains_key(**c))
            .ok_or_else(|| ImportError::MissingColumn(DATE_COLUMNS[0].to_string()))?;
        if !headers.contains_key(VENDOR_COLUMN) {
            return Err(ImportError::MissingColumn(VENDOR_COLUMN.to_string()).into());
        }

        let mut report = ImportReport::default();

        for record in reader.records() {
            // Quoted fields may span physical lines, so the parser's own
            // position is the only reliable line number.
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    let line = e.position().map_or(0, |p| p.line());
                    report.record_error(line, format!("malformed row: {}", e));
                    continue;
                }
            };
            let line = record.position().map_or(0, |p| p.line());

            let raw_date = field(&headers, &record, date_column).unwrap_or("");
            let date = match parse_row_date(raw_date) {
                Some(d) => d,
                None => {
                    report.record_error(line, format!("invalid date format: '{}'", raw_date));
                    continue;
                }
            };

            let amount = match resolve_amount(&headers, &record) {
                Some(a) => a,
                None => {
                    warn!("No valid amount found on line {}", line);
                    report.record_error(line, "no usable amount, row not imported");
                    continue;
                }
            };

            let vendor = match field(&headers, &record, VENDOR_COLUMN) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => UNKNOWN_VENDOR.to_string(),
            };

            let category = resolve_category(&headers, &record);
            let subcategory = field(&headers, &record, SUBCATEGORY_COLUMN)
                .unwrap_or("")
                .to_string();
            let notes = field(&headers, &record, NOTES_COLUMN)
                .unwrap_or("")
                .to_string();

            let new_expense = NewExpense {
                id: None,
                user_id: user_id.to_string(),
                date,
                vendor,
                amount,
                category: category.clone(),
                subcategory: subcategory.clone(),
                exclude: resolve_flag(&headers, &record, &EXCLUDE_COLUMNS),
                indispensable: resolve_flag(&headers, &record, &INDISPENSABLE_COLUMNS),
                avoidable: resolve_flag(&headers, &record, &AVOIDABLE_COLUMNS),
                notes,
            };

            let expense = self.expense_repository.upsert(new_expense)?;
            report.imported += 1;

            // Best-effort registry sync; the expense keeps its own strings.
            self.category_service
                .ensure_category(user_id, &expense.category)?;
            if !subcategory.trim().is_empty() {
                match self
                    .category_service
                    .ensure_subcategory(user_id, &expense.category, &subcategory)
                {
                    Ok(_) | Err(CategoryError::NotFound(_)) => {}
                    Err(e) => return Err(e.into()),
                }
            }

            debug!("Imported: {} - {} - {}", date, expense.vendor, expense.amount);
        }

        Ok(report)
    }
}

fn sniff_delimiter(contents: &str) -> u8 {
    let header_line = contents.lines().next().unwrap_or("");
    if header_line.contains(';') {
        b';'
    } else {
        b'\t'
    }
}

fn header_index(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_string(), i))
        .collect()
}

fn field<'r>(
    headers: &HashMap<String, usize>,
    record: &'r StringRecord,
    column: &str,
) -> Option<&'r str> {
    headers
        .get(column)
        .and_then(|&i| record.get(i))
        .map(str::trim)
}

/// Dates come in as slash-delimited `DD/MM/YY(YY)` or dash-delimited
/// `MM-DD-YYYY`; a slash means day-first, with 2-digit years padded to 20YY.
fn parse_row_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.contains('/') {
        let mut parts = raw.split('/');
        let day: u32 = parts.next()?.trim().parse().ok()?;
        let month: u32 = parts.next()?.trim().parse().ok()?;
        let year_part = parts.next()?.trim();
        if parts.next().is_some() {
            return None;
        }
        let year: i32 = if year_part.len() == 2 {
            format!("20{}", year_part).parse().ok()?
        } else {
            year_part.parse().ok()?
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    NaiveDate::parse_from_str(raw, "%m-%d-%Y").ok()
}

/// Strips currency symbols and thousands separators; the `--` placeholder
/// reads as zero.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned = raw
        .replace('$', "")
        .replace(',', "")
        .replace(AMOUNT_PLACEHOLDER, "0");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}

/// Probes the amount columns in order and takes the first strictly positive
/// value. Zero or unparseable everywhere means the row has no usable amount.
fn resolve_amount(headers: &HashMap<String, usize>, record: &StringRecord) -> Option<Decimal> {
    for column in AMOUNT_COLUMNS {
        if let Some(raw) = field(headers, record, column) {
            if raw.is_empty() {
                continue;
            }
            if let Some(amount) = parse_amount(raw) {
                if amount > Decimal::ZERO {
                    return Some(amount);
                }
            }
        }
    }
    None
}

/// Explicit category column wins; otherwise the first truthy category flag
/// decides, in fixed priority order; otherwise the fallback category.
fn resolve_category(headers: &HashMap<String, usize>, record: &StringRecord) -> String {
    if let Some(explicit) = field(headers, record, CATEGORY_COLUMN) {
        if !explicit.is_empty() {
            return explicit.to_string();
        }
    }

    for (column, category) in CATEGORY_FLAG_COLUMNS {
        if let Some(raw) = field(headers, record, column) {
            if is_truthy(raw) {
                return category.to_string();
            }
        }
    }

    FALLBACK_CATEGORY.to_string()
}

fn resolve_flag(
    headers: &HashMap<String, usize>,
    record: &StringRecord,
    candidates: &[&str],
) -> bool {
    candidates
        .iter()
        .filter_map(|column| field(headers, record, column))
        .any(is_truthy)
}

fn is_truthy(raw: &str) -> bool {
    let normalized = raw.trim().to_lowercase();
    TRUTHY_TOKENS.contains(&normalized.as_str())
}
