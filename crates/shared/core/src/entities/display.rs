use serde::{Deserialize, Serialize};

/// How clock faces render the hour
///
/// Purely presentational: switching format never touches timekeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayFormat {
    /// `h:MM:SS AM/PM`
    #[default]
    TwelveHour,
    /// `HH:MM:SS`
    TwentyFourHour,
}

impl DisplayFormat {
    pub fn from_24_hour(use_24_hour: bool) -> Self {
        if use_24_hour {
            DisplayFormat::TwentyFourHour
        } else {
            DisplayFormat::TwelveHour
        }
    }

    pub fn is_24_hour(&self) -> bool {
        matches!(self, DisplayFormat::TwentyFourHour)
    }

    /// chrono `strftime` pattern for this format
    pub fn pattern(&self) -> &'static str {
        match self {
            DisplayFormat::TwelveHour => "%-I:%M:%S %p",
            DisplayFormat::TwentyFourHour => "%H:%M:%S",
        }
    }
}
