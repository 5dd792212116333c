// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use internal_error::{InternalError, ResultIntoInternal};
use thiserror::Error;

use crate::DatasetId;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Feed status value that grants access; any other status never does.
pub const STATUS_ACTIVE: &str = "active";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Feed column layout
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// display name, external login, role, email, phone, status, dataset-version
// string, use-category, request date, approval date, expiration date, comment
const FEED_COLUMNS: usize = 12;

const COL_LOGIN: usize = 1;
const COL_STATUS: usize = 5;
const COL_DATASET: usize = 6;
const COL_EXPIRATION: usize = 10;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One row of the external authorization feed, reduced to the fields the
/// reconciliation pass consumes. Discarded after one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistEntry {
    pub external_login: String,
    pub dataset_id: DatasetId,
    pub status: String,
    pub expires_at: DateTime<Utc>,
}

impl WhitelistEntry {
    /// The authorization-validity predicate: an entry grants access iff its
    /// status is active and it expires strictly after the evaluation instant.
    pub fn is_currently_valid(&self, now: DateTime<Utc>) -> bool {
        self.status == STATUS_ACTIVE && self.expires_at > now
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct FeedFormat {
    pub has_header: bool,
}

impl Default for FeedFormat {
    fn default() -> Self {
        Self { has_header: true }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct Whitelist {
    entries: Vec<WhitelistEntry>,
}

impl Whitelist {
    pub fn new(entries: Vec<WhitelistEntry>) -> Self {
        Self { entries }
    }

    /// Parses a tabular feed. Structural problems (a header with missing
    /// columns, an unreadable stream) are fatal; anything wrong with an
    /// individual row drops that row with a warning so one bad row never
    /// aborts the whole feed.
    pub fn parse<R: std::io::Read>(
        reader: R,
        format: FeedFormat,
    ) -> Result<ParsedWhitelist, FeedFormatError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        let mut warnings = Vec::new();
        let mut saw_header = !format.has_header;

        for record in csv_reader.records() {
            let record = record.int_err()?;
            let line = record.position().map_or(0, csv::Position::line);

            if !saw_header {
                saw_header = true;
                if record.len() < FEED_COLUMNS {
                    return Err(FeedFormatError::MissingColumns {
                        expected: FEED_COLUMNS,
                        actual: record.len(),
                    });
                }
                continue;
            }

            match Self::parse_row(&record) {
                Ok(entry) => entries.push(entry),
                Err(issue) => {
                    tracing::warn!(line, %issue, "Dropping malformed whitelist row");
                    warnings.push(FeedRowWarning { line, issue });
                }
            }
        }

        Ok(ParsedWhitelist {
            whitelist: Self { entries },
            warnings,
        })
    }

    fn parse_row(record: &csv::StringRecord) -> Result<WhitelistEntry, FeedRowIssue> {
        if record.len() < FEED_COLUMNS {
            return Err(FeedRowIssue::TooFewFields);
        }

        let external_login = record[COL_LOGIN].to_string();
        if external_login.is_empty() {
            return Err(FeedRowIssue::EmptyLogin);
        }

        let dataset_id = DatasetId::from_versioned_token(&record[COL_DATASET])
            .map_err(|e| FeedRowIssue::MalformedDatasetToken(e.token))?;

        let expires_at = parse_feed_timestamp(&record[COL_EXPIRATION])
            .ok_or_else(|| FeedRowIssue::MalformedTimestamp(record[COL_EXPIRATION].to_string()))?;

        Ok(WhitelistEntry {
            external_login,
            dataset_id,
            status: record[COL_STATUS].to_string(),
            expires_at,
        })
    }

    pub fn entries(&self) -> &[WhitelistEntry] {
        &self.entries
    }

    /// Groups entries by external login in deterministic order. Grouping is
    /// the unit of work of the access-control update pass: each group is
    /// resolved and applied independently of the others.
    pub fn entries_by_login(&self) -> BTreeMap<&str, Vec<&WhitelistEntry>> {
        let mut groups: BTreeMap<&str, Vec<&WhitelistEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups
                .entry(entry.external_login.as_str())
                .or_default()
                .push(entry);
        }
        groups
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct ParsedWhitelist {
    pub whitelist: Whitelist,
    pub warnings: Vec<FeedRowWarning>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRowWarning {
    pub line: u64,
    pub issue: FeedRowIssue,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedRowIssue {
    #[error("row has too few fields")]
    TooFewFields,

    #[error("external login is empty")]
    EmptyLogin,

    #[error("malformed dataset token: '{0}'")]
    MalformedDatasetToken(String),

    #[error("malformed timestamp: '{0}'")]
    MalformedTimestamp(String),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FeedFormatError {
    #[error("Feed header has {actual} columns, expected at least {expected}")]
    MissingColumns { expected: usize, actual: usize },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The feed writes instants as `2017-06-11 00:00:00.000` but date-only
/// values have been observed too. Both are interpreted as UTC.
fn parse_feed_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap().and_utc())
}
