use serde::{Deserialize, Serialize};

/// How Paperless automatically assigns a correspondent or tag to new documents.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MatchingAlgorithm {
    None = 0,
    AnyWord = 1,
    AllWords = 2,
    ExactMatch = 3,
    RegularExpression = 4,
    Fuzzy = 5,
    #[default]
    Automatic = 6,
}

impl TryFrom<u8> for MatchingAlgorithm {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MatchingAlgorithm::None),
            1 => Ok(MatchingAlgorithm::AnyWord),
            2 => Ok(MatchingAlgorithm::AllWords),
            3 => Ok(MatchingAlgorithm::ExactMatch),
            4 => Ok(MatchingAlgorithm::RegularExpression),
            5 => Ok(MatchingAlgorithm::Fuzzy),
            6 => Ok(MatchingAlgorithm::Automatic),
            _ => Err(format!("Invalid matching algorithm: {}", value)),
        }
    }
}

impl From<MatchingAlgorithm> for u8 {
    fn from(algorithm: MatchingAlgorithm) -> Self {
        algorithm as u8
    }
}
