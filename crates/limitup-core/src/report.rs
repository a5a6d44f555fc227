//! Run result shape and its dated JSON artifact.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{Segment, SegmentWinner, TradeDate};

/// Errors raised while persisting a run result.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize run result: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Winners of one run keyed by segment label. Segments without a winner are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    #[serde(rename = "KOSPI", default, skip_serializing_if = "Option::is_none")]
    pub kospi: Option<SegmentWinner>,
    #[serde(rename = "KOSDAQ", default, skip_serializing_if = "Option::is_none")]
    pub kosdaq: Option<SegmentWinner>,
}

impl RunResult {
    pub fn get(&self, segment: Segment) -> Option<&SegmentWinner> {
        match segment {
            Segment::Kospi => self.kospi.as_ref(),
            Segment::Kosdaq => self.kosdaq.as_ref(),
        }
    }

    pub fn insert(&mut self, segment: Segment, winner: SegmentWinner) {
        match segment {
            Segment::Kospi => self.kospi = Some(winner),
            Segment::Kosdaq => self.kosdaq = Some(winner),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kospi.is_none() && self.kosdaq.is_none()
    }

    pub fn len(&self) -> usize {
        Segment::ALL
            .iter()
            .filter(|segment| self.get(**segment).is_some())
            .count()
    }

    /// Two-space indented JSON with non-ASCII text kept verbatim.
    pub fn to_pretty_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Artifact file name for `date`, e.g. `up_stocks_20250618.json`.
pub fn output_file_name(date: &TradeDate) -> String {
    format!("up_stocks_{}.json", date.as_compact())
}

/// Write `result` into `dir`, replacing any artifact already there for `date`.
///
/// The file is staged next to its destination and renamed into place, so a
/// reader never observes a half-written artifact.
pub fn write_report(
    dir: &Path,
    date: &TradeDate,
    result: &RunResult,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(output_file_name(date));
    let json = result.to_pretty_json()?;
    let io_error = |source| ReportError::Io {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(io_error)?;
    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    staged.write_all(json.as_bytes()).map_err(io_error)?;
    staged.flush().map_err(io_error)?;
    staged
        .persist(&path)
        .map_err(|error| io_error(error.error))?;

    info!(path = %path.display(), segments = result.len(), "run result saved");
    Ok(path)
}
