/// A label confidence score with exactly two fractional digits.
///
/// Held as integer hundredths so that the value written to the metadata table is the
/// rounded decimal and not the nearest binary float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Confidence(u32);

impl Confidence {
    /// The largest confidence the detector can report
    pub const MAX: Confidence = Confidence(100_00);

    /// Rounds a raw score half away from zero to two decimal places, clamped to `[0, 100]`.
    /// Non finite input becomes zero.
    pub fn from_f64(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self::default();
        }

        let hundredths = (raw * 100.0).round().clamp(0.0, f64::from(Self::MAX.0));
        Self(hundredths as u32)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A single label returned by label detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLabel {
    pub name: String,
    pub confidence: Confidence,
}

impl DetectedLabel {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence: Confidence::from_f64(confidence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimal_places() {
        assert_eq!(Confidence::from_f64(87.456).to_string(), "87.46");
        assert_eq!(Confidence::from_f64(87.454).to_string(), "87.45");
        assert_eq!(Confidence::from_f64(f64::from(87.456_f32)).to_string(), "87.46");
    }

    #[test]
    fn keeps_trailing_zeros() {
        assert_eq!(Confidence::from_f64(91.2).to_string(), "91.20");
        assert_eq!(Confidence::from_f64(80.0).to_string(), "80.00");
        assert_eq!(Confidence::from_f64(0.05).to_string(), "0.05");
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(Confidence::from_f64(100.001), Confidence::MAX);
        assert_eq!(Confidence::MAX.to_string(), "100.00");
        assert_eq!(Confidence::from_f64(-3.0).to_string(), "0.00");
        assert_eq!(Confidence::from_f64(f64::NAN), Confidence::default());
    }

    #[test]
    fn label_new_rounds_confidence() {
        let label = DetectedLabel::new("Cat", 91.234);
        assert_eq!(label.name, "Cat");
        assert_eq!(label.confidence.to_string(), "91.23");
    }
}
