use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One sampled instant: channel name to reading.
pub type Frame = BTreeMap<String, f64>;

/// A named motion that recordings and evaluations refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionType {
    pub name: String,
    pub description: String,
}

impl MotionType {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Which calibration anchor a stored recording belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreCategory {
    /// Exemplary execution; scores 100.
    Reference,
    /// Deliberately failed execution; scores 0.
    ZeroScore,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 2] = [ScoreCategory::Reference, ScoreCategory::ZeroScore];

    /// External name as used in stored files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreCategory::Reference => "reference",
            ScoreCategory::ZeroScore => "zero_score",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown score category '{}' (expected 'reference' or 'zero_score')",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for ScoreCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reference" => Ok(ScoreCategory::Reference),
            "zero_score" => Ok(ScoreCategory::ZeroScore),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A stored baseline recording. The frame count is always derived from
/// `frames`, never stored separately.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRecording {
    pub id: u64,
    pub category: ScoreCategory,
    pub frames: Vec<Frame>,
}

impl SensorRecording {
    pub fn new(id: u64, category: ScoreCategory, frames: Vec<Frame>) -> Self {
        Self {
            id,
            category,
            frames,
        }
    }

    #[inline]
    pub fn data_frames(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_external_names() {
        for c in ScoreCategory::ALL {
            assert_eq!(c.as_str().parse::<ScoreCategory>(), Ok(c));
        }
        assert!("Reference".parse::<ScoreCategory>().is_err());
    }

    #[test]
    fn data_frames_tracks_frame_count() {
        let mut rec = SensorRecording::new(1, ScoreCategory::Reference, Vec::new());
        assert_eq!(rec.data_frames(), 0);
        rec.frames.push(Frame::from([("x".to_string(), 1.0)]));
        assert_eq!(rec.data_frames(), 1);
    }
}
