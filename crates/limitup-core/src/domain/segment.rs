use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Ticker;

/// Exchange listing board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    /// Primary board.
    #[serde(rename = "KOSPI")]
    Kospi,
    /// Growth board.
    #[serde(rename = "KOSDAQ")]
    Kosdaq,
}

impl Segment {
    /// Output order of segments in a run result.
    pub const ALL: [Self; 2] = [Self::Kospi, Self::Kosdaq];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Kospi => "KOSPI",
            Self::Kosdaq => "KOSDAQ",
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps an instrument to its listing board.
pub trait SegmentClassifier: Send + Sync {
    fn classify(&self, ticker: &Ticker) -> Segment;
}

/// Approximates the board from the ticker's leading character.
///
/// Codes starting with `0`..=`5` are treated as primary-board listings and
/// everything else as growth-board. This is a heuristic: some codes are
/// misclassified, and exchange metadata should replace it where available.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingDigitClassifier;

impl LeadingDigitClassifier {
    const PRIMARY_LEADS: [char; 6] = ['0', '1', '2', '3', '4', '5'];
}

impl SegmentClassifier for LeadingDigitClassifier {
    fn classify(&self, ticker: &Ticker) -> Segment {
        if Self::PRIMARY_LEADS.contains(&ticker.leading_char()) {
            Segment::Kospi
        } else {
            Segment::Kosdaq
        }
    }
}
