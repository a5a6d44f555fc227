use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identifiers of the upstream providers a run may consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// KRX data portal (market data).
    Krx,
    /// Naver Finance (news headlines).
    Naver,
    /// Built-in deterministic sample data.
    Fixture,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Krx => "krx",
            Self::Naver => "naver",
            Self::Fixture => "fixture",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
