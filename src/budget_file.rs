//! CSV input for budget phase tables and CSV output for forecasts
//!
//! Budget files have a header row and one row per phase:
//!
//! ```text
//! phase,planned,actual
//! design,10000,9000
//! build,20000,22000
//! testing,8000,
//! ```
//!
//! An empty `actual` means nothing has been spent on that phase yet.

use csv::{Reader, Writer};
use std::io::{Read, Write};
use std::path::Path;

use crate::error::BudgetFileError;
use crate::financial::ForecastEntry;
use crate::request::BudgetVarianceRequest;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct BudgetRow {
    phase: String,
    planned: f64,
    actual: Option<f64>,
}

/// Load a budget table from a CSV file
pub fn load_budget_csv(path: &Path) -> Result<BudgetVarianceRequest, BudgetFileError> {
    let file = std::fs::File::open(path)?;
    read_budget_csv(file)
}

/// Parse a budget table from any reader
pub fn read_budget_csv<R: Read>(source: R) -> Result<BudgetVarianceRequest, BudgetFileError> {
    let mut reader = Reader::from_reader(source);
    let mut request = BudgetVarianceRequest::default();

    for row in reader.deserialize() {
        let row: BudgetRow = row?;
        let phase = row.phase.trim().to_string();

        if row.planned < 0.0 {
            return Err(BudgetFileError::NegativeAmount { phase, amount: row.planned });
        }
        if request.planned.contains_key(&phase) {
            return Err(BudgetFileError::DuplicatePhase(phase));
        }

        if let Some(actual) = row.actual {
            if actual < 0.0 {
                return Err(BudgetFileError::NegativeAmount { phase, amount: actual });
            }
            request.actual.insert(phase.clone(), actual);
        }
        request.planned.insert(phase, row.planned);
    }

    Ok(request)
}

/// Write forecast rows as CSV with a header
pub fn write_forecast_csv<W: Write>(sink: W, entries: &[ForecastEntry]) -> Result<(), BudgetFileError> {
    let mut writer = Writer::from_writer(sink);
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}
