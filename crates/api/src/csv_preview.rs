// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV preview and validation for bulk meter onboarding.
//!
//! This module provides CSV parsing and validation for meter data without
//! persisting or mutating anything. Operators upload the utility's meter
//! roll, review the per-row verdicts, then register the valid rows.

use csv::StringRecord;
use std::collections::{HashMap, HashSet};
use tirta_billing_domain::{Meter, TariffGroup};
use tirta_billing_persistence::Persistence;

/// Errors raised while reading the CSV itself (not per-row problems).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvImportError {
    /// The header row is missing required columns.
    #[error("missing required headers: {missing}")]
    MissingHeaders {
        /// Comma-separated list of the missing headers.
        missing: String,
    },
    /// The CSV could not be read at all.
    #[error("failed to read CSV: {reason}")]
    Unreadable {
        /// The underlying parser error.
        reason: String,
    },
}

/// A single row result from CSV preview validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CsvRowResult {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// The parsed meter number (if present).
    pub meter_number: Option<String>,
    /// The parsed account number (if present).
    pub account_number: Option<String>,
    /// The parsed tariff group id (if valid).
    pub tariff_group_id: Option<i64>,
    /// The row status.
    pub status: CsvRowStatus,
    /// Zero or more validation errors.
    pub errors: Vec<String>,
}

/// Status of a CSV row validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvRowStatus {
    /// Row is valid and can be registered.
    Valid,
    /// Row has validation errors and cannot be registered.
    Invalid,
}

/// Result of CSV preview validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CsvPreviewResult {
    /// Per-row validation results.
    pub rows: Vec<CsvRowResult>,
    /// Total number of rows.
    pub total_rows: usize,
    /// Number of valid rows.
    pub valid_count: usize,
    /// Number of invalid rows.
    pub invalid_count: usize,
}

/// Required CSV column headers (case-insensitive, normalized).
const REQUIRED_HEADERS: &[&str] = &["meter_number", "account_number", "tariff_group_id"];

/// Normalizes a CSV header string for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Validates that all required headers are present in the CSV.
fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, CsvImportError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();

    for (idx, header) in headers.iter().enumerate() {
        let normalized: String = normalize_header(header);
        header_map.insert(normalized, idx);
    }

    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !header_map.contains_key(**required))
        .map(|required| String::from(*required))
        .collect();

    if !missing.is_empty() {
        return Err(CsvImportError::MissingHeaders {
            missing: missing.join(", "),
        });
    }

    Ok(header_map)
}

/// Validates one parsed row against existing registry state and the rows
/// seen earlier in the same file.
fn validate_row(
    meter: &Meter,
    known_tariff_groups: &HashSet<i64>,
    existing_meter_numbers: &HashSet<String>,
    existing_account_numbers: &HashSet<String>,
    seen_meter_numbers: &HashSet<String>,
) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();

    if let Err(e) = meter.validate() {
        errors.push(format!("validation: {e}"));
    }

    if !known_tariff_groups.contains(&meter.tariff_group_id) {
        errors.push(format!(
            "tariff_group_id: tariff group {} does not exist",
            meter.tariff_group_id
        ));
    }

    if existing_meter_numbers.contains(meter.meter_number()) {
        errors.push(format!(
            "meter_number: '{}' is already registered",
            meter.meter_number()
        ));
    }

    if existing_account_numbers.contains(meter.account_number()) {
        errors.push(format!(
            "account_number: '{}' is already registered",
            meter.account_number()
        ));
    }

    if seen_meter_numbers.contains(meter.meter_number()) {
        errors.push(format!(
            "meter_number: duplicate within CSV - '{}' appears multiple times",
            meter.meter_number()
        ));
    }

    errors
}

/// Previews and validates CSV meter data without persisting.
///
/// # Arguments
///
/// * `csv_content` - The raw CSV content as a string
/// * `persistence` - The persistence layer for checking existing meters
///   and tariff groups
///
/// # Returns
///
/// * `Ok(CsvPreviewResult)` with per-row validation results
/// * `Err(CsvImportError)` if the CSV format itself is invalid
///
/// # Errors
///
/// Returns an error if headers are missing or the CSV cannot be read.
pub fn preview_meter_csv(
    csv_content: &str,
    persistence: &mut Persistence,
) -> Result<CsvPreviewResult, CsvImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| CsvImportError::Unreadable {
            reason: e.to_string(),
        })?
        .clone();

    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let known_tariff_groups: HashSet<i64> = persistence
        .list_tariff_groups()
        .map_err(|e| CsvImportError::Unreadable {
            reason: format!("failed to load tariff groups: {e}"),
        })?
        .iter()
        .filter_map(TariffGroup::tariff_group_id)
        .collect();

    let existing_meters: Vec<Meter> =
        persistence
            .list_meters()
            .map_err(|e| CsvImportError::Unreadable {
                reason: format!("failed to load meters: {e}"),
            })?;
    let existing_meter_numbers: HashSet<String> = existing_meters
        .iter()
        .map(|m| m.meter_number().to_string())
        .collect();
    let existing_account_numbers: HashSet<String> = existing_meters
        .iter()
        .map(|m| m.account_number().to_string())
        .collect();

    let mut results: Vec<CsvRowResult> = Vec::new();
    let mut seen_meter_numbers: HashSet<String> = HashSet::new();

    for (idx, record) in reader.records().enumerate() {
        let row_number: usize = idx + 1;

        let record: StringRecord = match record {
            Ok(rec) => rec,
            Err(e) => {
                results.push(CsvRowResult {
                    row_number,
                    meter_number: None,
                    account_number: None,
                    tariff_group_id: None,
                    status: CsvRowStatus::Invalid,
                    errors: vec![format!("CSV parse error: {e}")],
                });
                continue;
            }
        };

        let get_field = |name: &str| -> Option<String> {
            header_map
                .get(name)
                .and_then(|&idx| record.get(idx))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut errors: Vec<String> = Vec::new();
        let meter_number: Option<String> = get_field("meter_number");
        let account_number: Option<String> = get_field("account_number");
        if meter_number.is_none() {
            errors.push(String::from("meter_number: required field is missing or empty"));
        }
        if account_number.is_none() {
            errors.push(String::from(
                "account_number: required field is missing or empty",
            ));
        }

        let tariff_group_id: Option<i64> = match get_field("tariff_group_id") {
            Some(val) => match val.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(format!("tariff_group_id: invalid number '{val}'"));
                    None
                }
            },
            None => {
                errors.push(String::from(
                    "tariff_group_id: required field is missing or empty",
                ));
                None
            }
        };

        let (Some(meter_number), Some(account_number), Some(tariff_group_id), true) = (
            meter_number.clone(),
            account_number.clone(),
            tariff_group_id,
            errors.is_empty(),
        ) else {
            results.push(CsvRowResult {
                row_number,
                meter_number,
                account_number,
                tariff_group_id,
                status: CsvRowStatus::Invalid,
                errors,
            });
            continue;
        };

        let meter: Meter = Meter::new(&meter_number, &account_number, tariff_group_id);
        let validation_errors: Vec<String> = validate_row(
            &meter,
            &known_tariff_groups,
            &existing_meter_numbers,
            &existing_account_numbers,
            &seen_meter_numbers,
        );

        let status: CsvRowStatus = if validation_errors.is_empty() {
            CsvRowStatus::Valid
        } else {
            CsvRowStatus::Invalid
        };

        seen_meter_numbers.insert(meter.meter_number().to_string());

        results.push(CsvRowResult {
            row_number,
            meter_number: Some(meter.meter_number().to_string()),
            account_number: Some(meter.account_number().to_string()),
            tariff_group_id: Some(tariff_group_id),
            status,
            errors: validation_errors,
        });
    }

    let total_rows: usize = results.len();
    let valid_count: usize = results
        .iter()
        .filter(|r| r.status == CsvRowStatus::Valid)
        .count();
    let invalid_count: usize = total_rows - valid_count;

    Ok(CsvPreviewResult {
        rows: results,
        total_rows,
        valid_count,
        invalid_count,
    })
}
