use serde::{Deserialize, Serialize};

/// Odometer checkpoint tag: trip start, mid-trip, trip end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Start,
    Mid,
    End,
}

impl Position {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Position::Start => "start",
            Position::Mid => "mid",
            Position::End => "end",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "start" => Some(Position::Start),
            "mid" => Some(Position::Mid),
            "end" => Some(Position::End),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI or SMS text (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        Position::from_db_str(&code.to_lowercase())
    }

    pub fn is_start(&self) -> bool {
        matches!(self, Position::Start)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Position::End)
    }
}
