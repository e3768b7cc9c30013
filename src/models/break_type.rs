use serde::{Deserialize, Serialize};

/// Kind of break taken inside an attendance session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    Lunch,
    Coffee,
    Bathroom,
    Personal,
    Other,
}

impl BreakType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            BreakType::Lunch => "lunch",
            BreakType::Coffee => "coffee",
            BreakType::Bathroom => "bathroom",
            BreakType::Personal => "personal",
            BreakType::Other => "other",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "lunch" => Some(BreakType::Lunch),
            "coffee" => Some(BreakType::Coffee),
            "bathroom" => Some(BreakType::Bathroom),
            "personal" => Some(BreakType::Personal),
            "other" => Some(BreakType::Other),
            _ => None,
        }
    }

    /// Helper: accept CLI input in any case
    pub fn from_code(code: &str) -> Option<Self> {
        BreakType::from_db_str(&code.trim().to_lowercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            BreakType::Lunch => "Lunch",
            BreakType::Coffee => "Coffee",
            BreakType::Bathroom => "Bathroom",
            BreakType::Personal => "Personal",
            BreakType::Other => "Other",
        }
    }

    pub fn is_lunch(&self) -> bool {
        matches!(self, BreakType::Lunch)
    }
}
