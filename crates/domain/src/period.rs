// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Billing period identification.
//!
//! A billing period is a calendar year-month. At most one bill exists per
//! meter per period; the persistence layer enforces this with a unique
//! index keyed on the period's canonical `YYYY-MM` string form.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Earliest year accepted for a billing period.
const MIN_YEAR: u16 = 1990;

/// Latest year accepted for a billing period.
const MAX_YEAR: u16 = 2100;

/// A calendar year-month identifying which cycle's consumption a bill covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// The calendar year (e.g., 2025).
    year: u16,
    /// The calendar month (1-12).
    month: u8,
}

impl BillingPeriod {
    /// Creates a new `BillingPeriod`.
    ///
    /// # Arguments
    ///
    /// * `year` - The calendar year (1990-2100)
    /// * `month` - The calendar month (1-12)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPeriod` if the year or month is out of range.
    pub fn new(year: u16, month: u8) -> Result<Self, DomainError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DomainError::InvalidPeriod(format!(
                "year {year} is out of range ({MIN_YEAR}-{MAX_YEAR})"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidPeriod(format!(
                "month {month} is out of range (1-12)"
            )));
        }
        Ok(Self { year, month })
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the calendar month (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Parses a period from its canonical `YYYY-MM` string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPeriod` if the string is malformed
    /// or the components are out of range.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        let (year_part, month_part) = s
            .split_once('-')
            .ok_or_else(|| DomainError::InvalidPeriod(format!("'{s}' is not in YYYY-MM form")))?;

        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(DomainError::InvalidPeriod(format!(
                "'{s}' is not in YYYY-MM form"
            )));
        }

        let year: u16 = year_part
            .parse()
            .map_err(|_| DomainError::InvalidPeriod(format!("'{year_part}' is not a year")))?;
        let month: u8 = month_part
            .parse()
            .map_err(|_| DomainError::InvalidPeriod(format!("'{month_part}' is not a month")))?;

        Self::new(year, month)
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BillingPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
