//! Dense frames × channels matrix produced by the normalizer.

use crate::error::EvalError;

/// Row-major matrix of readings: one row per frame, one column per channel.
/// Column order is the configured channel order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMatrix {
    channels: Vec<String>,
    values: Vec<f64>,
    frames: usize,
}

impl FrameMatrix {
    /// Build from explicit rows. Every row must have one value per channel.
    pub fn from_rows(channels: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, EvalError> {
        let width = channels.len();
        let frames = rows.len();
        let mut values = Vec::with_capacity(width * frames);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(EvalError::Schema(format!(
                    "frame {i} has {} values, expected {width}",
                    row.len()
                )));
            }
            values.extend(row);
        }
        Ok(Self {
            channels,
            values,
            frames,
        })
    }

    /// Build from a flat row-major buffer; `values.len()` must equal
    /// `channels.len() * frames`.
    pub(crate) fn from_flat(channels: Vec<String>, values: Vec<f64>, frames: usize) -> Self {
        debug_assert_eq!(values.len(), channels.len() * frames);
        Self {
            channels,
            values,
            frames,
        }
    }

    #[inline]
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let w = self.channels.len();
        &self.values[i * w..(i + 1) * w]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.frames).map(move |i| self.row(i))
    }

    /// All readings of one channel, in frame order.
    pub fn column(&self, c: usize) -> impl Iterator<Item = f64> + '_ {
        let w = self.channels.len();
        (0..self.frames).map(move |i| self.values[i * w + c])
    }

    #[inline]
    pub fn value(&self, frame: usize, channel: usize) -> f64 {
        self.values[frame * self.channels.len() + channel]
    }

    /// Position of the first non-finite reading, if any, as (frame, channel).
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        let w = self.channels.len().max(1);
        self.values
            .iter()
            .position(|v| !v.is_finite())
            .map(|idx| (idx / w, idx % w))
    }
}
