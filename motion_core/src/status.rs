//! Evaluation stages. An evaluation walks these in order and ends in either
//! `Done` or `Failed`; nothing is carried between calls.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    FetchBaselines,
    Normalize,
    AlignAndScore,
    Calibrate,
    Done,
    Failed,
}

impl Stage {
    /// Successor on the success path. Terminal stages stay put.
    pub fn next(self) -> Stage {
        match self {
            Stage::Start => Stage::FetchBaselines,
            Stage::FetchBaselines => Stage::Normalize,
            Stage::Normalize => Stage::AlignAndScore,
            Stage::AlignAndScore => Stage::Calibrate,
            Stage::Calibrate => Stage::Done,
            Stage::Done => Stage::Done,
            Stage::Failed => Stage::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::FetchBaselines => "fetch_baselines",
            Stage::Normalize => "normalize",
            Stage::AlignAndScore => "align_and_score",
            Stage::Calibrate => "calibrate",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
