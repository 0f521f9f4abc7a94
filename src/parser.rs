//! Record parser and the matching serializer.
//!
//! Input is newline-delimited text with a header line and nine
//! comma-separated positional fields per row. There is no quoting: a comma
//! inside a value is a field boundary.
//!
//! Parsing is lossy by policy. Numeric cells that are empty or not a finite
//! number become `0`; categorical cells are passed through as
//! [`Categorical`]. Only the `id` column can reject a row.
//!
//! Every numeric column is a count or a frequency, so a negative cell is
//! out of domain and also becomes `0`. This keeps each parsed record inside
//! the non-negative domain that scaling and the class means assume.

use serde::{Deserialize, Serialize};

use crate::error::{RowError, RowErrorKind};
use crate::record::{sanitize_numeric, Categorical, PersonalityRecord};

/// Field delimiter.
pub const DELIMITER: char = ',';

/// Header written by [`to_text`].
pub const HEADER: &str = "id,Time_spent_Alone,Stage_fear,Social_event_attendance,Going_outside,Drained_after_socializing,Friends_circle_size,Post_frequency,Personality";

/// Number of positional fields in a data row.
pub const FIELD_COUNT: usize = 9;

/// Records that parsed plus the rows that were rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOutput {
    /// Parsed records, in source order.
    pub records: Vec<PersonalityRecord>,
    /// Rejected rows, in source order.
    pub errors: Vec<RowError>,
}

impl ParseOutput {
    /// Returns true if every data row parsed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses survey text into records.
///
/// The first line is always treated as a header and skipped. Blank lines
/// are skipped silently. A row whose `id` is missing or not an integer is
/// reported in [`ParseOutput::errors`] and produces no record; every other
/// row produces exactly one record.
///
/// # Example
/// ```
/// let text = "header\n7,,No,3,2,Yes,5,1,Introvert\nabc,3,No,3,2,Yes,5,1,Introvert\n";
/// let out = persona::parse(text);
/// assert_eq!(out.records.len(), 1);
/// assert_eq!(out.records[0].time_spent_alone, 0.0);
/// assert_eq!(out.errors[0].line, 3);
/// ```
#[must_use]
pub fn parse(raw: &str) -> ParseOutput {
    let mut out = ParseOutput::default();

    for (idx, line) in raw.split('\n').enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(record) => out.records.push(record),
            Err(kind) => {
                let err = RowError {
                    line: idx + 1,
                    raw: line.to_string(),
                    kind,
                };
                log::debug!("skipping row: {err}");
                out.errors.push(err);
            }
        }
    }

    log::trace!(
        "parsed {} records, rejected {} rows",
        out.records.len(),
        out.errors.len()
    );
    out
}

/// Parses one data row.
///
/// Missing trailing fields take their default; fields past the ninth are
/// ignored.
pub fn parse_line(line: &str) -> Result<PersonalityRecord, RowErrorKind> {
    let mut fields = line.trim().split(DELIMITER).map(str::trim);
    let mut next = || fields.next().unwrap_or("");

    let id = parse_id(next())?;
    Ok(PersonalityRecord {
        id,
        time_spent_alone: parse_numeric(next()),
        stage_fear: Categorical::from_raw(next()),
        social_event_attendance: parse_numeric(next()),
        going_outside: parse_numeric(next()),
        drained_after_socializing: Categorical::from_raw(next()),
        friends_circle_size: parse_numeric(next()),
        post_frequency: parse_numeric(next()),
        personality: Categorical::from_raw(next()),
    })
}

fn parse_id(cell: &str) -> Result<i64, RowErrorKind> {
    if cell.is_empty() {
        return Err(RowErrorKind::MissingId);
    }
    cell.parse::<i64>().map_err(|_| RowErrorKind::InvalidId)
}

fn parse_numeric(cell: &str) -> f64 {
    cell.parse::<f64>().map_or(0.0, sanitize_numeric)
}

/// Formats one record as a data row.
#[must_use]
pub fn to_line(record: &PersonalityRecord) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{}",
        record.id,
        record.time_spent_alone,
        record.stage_fear.as_raw(),
        record.social_event_attendance,
        record.going_outside,
        record.drained_after_socializing.as_raw(),
        record.friends_circle_size,
        record.post_frequency,
        record.personality.as_raw(),
    )
}

/// Serializes records back into parser input, header included.
///
/// `parse(&to_text(&records)).records == records` holds for any records
/// the parser produced.
#[must_use]
pub fn to_text(records: &[PersonalityRecord]) -> String {
    let mut text = String::with_capacity(HEADER.len() + 1 + records.len() * 48);
    text.push_str(HEADER);
    text.push('\n');
    for record in records {
        text.push_str(&to_line(record));
        text.push('\n');
    }
    text
}
