//! Layout options shared by the engine and its renderers.

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

/// How occupant names are printed on seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatLabelStyle {
    /// First letters of the member's name parts
    #[default]
    Initials,
    /// Full name, word-wrapped
    Full,
}

/// Options for seat layout and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Seat diameter in pixels
    #[serde(default = "default_seat_size")]
    pub seat_size: f64,
    /// Space between seats as a multiple of the seat size
    #[serde(default = "default_seat_gap")]
    pub seat_gap: f64,
    /// Whether alignment padding seats are drawn
    #[serde(default)]
    pub implicit_seats_visible: bool,
    /// Label style for occupied seats
    #[serde(default)]
    pub seat_name_labels: SeatLabelStyle,
    /// Render the audience-facing edge at the top
    #[serde(default)]
    pub downstage_top: bool,
}

fn default_seat_size() -> f64 {
    32.0
}

fn default_seat_gap() -> f64 {
    1.0
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            seat_size: default_seat_size(),
            seat_gap: default_seat_gap(),
            implicit_seats_visible: false,
            seat_name_labels: SeatLabelStyle::default(),
            downstage_top: false,
        }
    }
}

impl LayoutOptions {
    pub fn with_seat_size(mut self, seat_size: f64) -> Self {
        self.seat_size = seat_size;
        self
    }

    pub fn with_seat_gap(mut self, seat_gap: f64) -> Self {
        self.seat_gap = seat_gap;
        self
    }

    pub fn with_downstage_top(mut self, downstage_top: bool) -> Self {
        self.downstage_top = downstage_top;
        self
    }

    /// Distance between neighbouring seat origins, and between rows.
    pub fn seat_pitch(&self) -> f64 {
        self.seat_size * (1.0 + self.seat_gap)
    }

    /// Vertical gap between stacked regions.
    pub fn region_gap(&self) -> f64 {
        2.0 * self.seat_size
    }

    /// Reject sizes that would produce non-finite coordinates.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.seat_size.is_finite() || self.seat_size <= 0.0 {
            return Err(LayoutError::InvalidOptions {
                field: "seatSize",
                value: self.seat_size,
            });
        }
        if !self.seat_gap.is_finite() || self.seat_gap < 0.0 {
            return Err(LayoutError::InvalidOptions {
                field: "seatGap",
                value: self.seat_gap,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LayoutOptions::default();
        assert_eq!(options.seat_size, 32.0);
        assert_eq!(options.seat_gap, 1.0);
        assert_eq!(options.seat_pitch(), 64.0);
        assert_eq!(options.region_gap(), 64.0);
        assert_eq!(options.seat_name_labels, SeatLabelStyle::Initials);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let options: LayoutOptions =
            serde_json::from_str(r#"{"seatSize": 40, "seatNameLabels": "full"}"#).unwrap();
        assert_eq!(options.seat_size, 40.0);
        assert_eq!(options.seat_gap, 1.0);
        assert_eq!(options.seat_name_labels, SeatLabelStyle::Full);
        assert!(!options.downstage_top);
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        assert!(LayoutOptions::default().with_seat_size(0.0).validate().is_err());
        assert!(LayoutOptions::default().with_seat_size(f64::NAN).validate().is_err());
        assert!(LayoutOptions::default().with_seat_gap(-0.5).validate().is_err());
        assert!(LayoutOptions::default().with_seat_gap(0.0).validate().is_ok());
    }
}
