//! Pixel state machine
//!
//! Shared vocabulary of the three flood engines. Every pixel is in exactly
//! one [`PixelState`]; a pixel moves
//!
//! ```text
//! INIT -> MASKED -> QUEUED -> { BASIN, WATERSHED }
//! ```
//!
//! and never regresses, except for the `WATERSHED -> BASIN` correction that
//! [`FloodState::resolve_against`] permits while the propagation `flag` is set.
//!
//! # Transition table
//!
//! For a dequeued pixel `c` examining neighbor `n`:
//!
//! | `state[n]`  | condition on `c`                          | effect on `c` |
//! |-------------|-------------------------------------------|---------------|
//! | `BASIN`     | `QUEUED`, or `WATERSHED` with `flag` set  | adopt `label[n]`, become `BASIN` |
//! | `BASIN`     | then `BASIN` with `label[c] != label[n]`  | become `WATERSHED`, clear `flag` |
//! | `WATERSHED` | `QUEUED`                                  | become `WATERSHED`, set `flag` |
//! | other       |                                           | none |
//!
//! Promotion of `MASKED` neighbors to `QUEUED` belongs to the level-ordered
//! engines and lives there.

use catchment_core::Grid;

/// Value of a watershed pixel in a line grid
pub const WATERSHED_VALUE: u8 = 0;

/// Value of a basin pixel in a line grid
pub const BASIN_VALUE: u8 = 255;

/// Label meaning "no basin"
pub const NO_LABEL: u32 = 0;

/// Per-pixel flood state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelState {
    /// Untouched
    #[default]
    Init,
    /// Marked for processing at the current level, not yet classified
    Masked,
    /// On the frontier, awaiting basin/watershed resolution
    Queued,
    /// On a divide between two or more basins
    Watershed,
    /// Belongs to a labeled basin
    Basin,
}

impl PixelState {
    /// `BASIN` or `WATERSHED`
    #[inline]
    pub fn is_resolved(self) -> bool {
        matches!(self, PixelState::Basin | PixelState::Watershed)
    }
}

/// What happens to the label of a pixel reclassified as `WATERSHED`
/// after a labeling conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConflictLabel {
    /// Keep the stale label internally (level-ordered engines)
    Keep,
    /// Reset the label to [`NO_LABEL`] (priority-ordered engine)
    Clear,
}

/// State and label arrays for one invocation, indexed by flat pixel index
#[derive(Debug, Clone)]
pub(crate) struct FloodState {
    pub(crate) state: Vec<PixelState>,
    pub(crate) label: Vec<u32>,
}

impl FloodState {
    /// All pixels `INIT`, unlabeled
    pub(crate) fn new(len: usize) -> Self {
        Self {
            state: vec![PixelState::Init; len],
            label: vec![NO_LABEL; len],
        }
    }

    /// Nonzero markers start as `BASIN` with their marker value as label
    pub(crate) fn seeded(markers: &Grid<u32>) -> Self {
        let mut fs = Self::new(markers.len());
        for (i, &m) in markers.data().iter().enumerate() {
            if m != NO_LABEL {
                fs.state[i] = PixelState::Basin;
                fs.label[i] = m;
            }
        }
        fs
    }

    /// Apply the transition table to pixel `c` against its neighbor `n`.
    ///
    /// `flag` belongs to the enclosing propagation loop and carries over
    /// from one neighbor (and one pixel) to the next.
    #[inline]
    pub(crate) fn resolve_against(
        &mut self,
        c: usize,
        n: usize,
        flag: &mut bool,
        on_conflict: ConflictLabel,
    ) {
        match self.state[n] {
            PixelState::Basin => {
                let sc = self.state[c];
                if sc == PixelState::Queued || (sc == PixelState::Watershed && *flag) {
                    self.label[c] = self.label[n];
                    self.state[c] = PixelState::Basin;
                }
                if self.state[c] == PixelState::Basin && self.label[c] != self.label[n] {
                    if on_conflict == ConflictLabel::Clear {
                        self.label[c] = NO_LABEL;
                    }
                    self.state[c] = PixelState::Watershed;
                    *flag = false;
                }
            }
            PixelState::Watershed => {
                if self.state[c] == PixelState::Queued {
                    self.state[c] = PixelState::Watershed;
                    *flag = true;
                }
            }
            _ => {}
        }
    }

    /// Binary line grid: `WATERSHED -> 0`, anything else `-> 255`
    pub(crate) fn line_grid(&self, template: &Grid<i32>) -> Grid<u8> {
        let mut out = template.map(|_| BASIN_VALUE);
        for (o, &s) in out.data_mut().iter_mut().zip(&self.state) {
            if s == PixelState::Watershed {
                *o = WATERSHED_VALUE;
            }
        }
        out
    }

    /// Label grid exposing labels of `BASIN` pixels only
    pub(crate) fn label_grid(&self, template: &Grid<i32>) -> Grid<u32> {
        let mut out = template.map(|_| NO_LABEL);
        for (i, o) in out.data_mut().iter_mut().enumerate() {
            if self.state[i] == PixelState::Basin {
                *o = self.label[i];
            }
        }
        out
    }

    /// Number of pixels in `state`
    pub(crate) fn count(&self, state: PixelState) -> usize {
        self.state.iter().filter(|&&s| s == state).count()
    }
}
