//! Level-ordered flooding
//!
//! The three phases shared by the unseeded engine and the marker-seeded
//! level-ordered engine. Each intensity level is processed as
//!
//! 1. **mask**: `INIT` pixels of the level become `MASKED`, or `QUEUED` when
//!    a neighbor is already resolved,
//! 2. **propagate**: the FIFO frontier is drained, resolving queued pixels
//!    and pulling in `MASKED` neighbors,
//! 3. **new basins** (unseeded only): leftover `MASKED` pixels are local
//!    minima and get fresh labels.

use crate::state::{ConflictLabel, FloodState, PixelState};
use catchment_core::{ConnectivityType, GridShape};
use std::collections::VecDeque;

/// Frontier and addressing for one level-ordered flood
pub(crate) struct ImmersionFlood {
    shape: GridShape,
    connectivity: ConnectivityType,
    queue: VecDeque<usize>,
}

impl ImmersionFlood {
    pub(crate) fn new(shape: GridShape, connectivity: ConnectivityType) -> Self {
        Self {
            shape,
            connectivity,
            queue: VecDeque::new(),
        }
    }

    /// Mask phase for the pixels of one level, in raster order.
    ///
    /// Pixels that are not `INIT` (marker basins) are left alone.
    pub(crate) fn mask_level(&mut self, fs: &mut FloodState, pixels: &[usize]) {
        for &c in pixels {
            if fs.state[c] != PixelState::Init {
                continue;
            }
            fs.state[c] = PixelState::Masked;
            let touches_resolved = self
                .shape
                .neighbors(c, self.connectivity)
                .any(|n| fs.state[n].is_resolved());
            if touches_resolved {
                fs.state[c] = PixelState::Queued;
                self.queue.push_back(c);
            }
        }
    }

    /// Propagation phase: drain the frontier.
    ///
    /// `flag` is scoped to this loop and is not reset between pixels.
    pub(crate) fn propagate(&mut self, fs: &mut FloodState) {
        let mut flag = false;
        while let Some(c) = self.queue.pop_front() {
            for n in self.shape.neighbors(c, self.connectivity) {
                if fs.state[n] == PixelState::Masked {
                    fs.state[n] = PixelState::Queued;
                    self.queue.push_back(n);
                } else {
                    fs.resolve_against(c, n, &mut flag, ConflictLabel::Keep);
                }
            }
        }
    }

    /// New-basin phase: every pixel of the level still `MASKED` seeds a new
    /// basin that floods its `MASKED` neighborhood breadth-first.
    ///
    /// Returns the number of basins created; `next_label` holds the last
    /// label handed out.
    pub(crate) fn label_new_basins(
        &mut self,
        fs: &mut FloodState,
        pixels: &[usize],
        next_label: &mut u32,
    ) -> u32 {
        let mut created = 0;
        for &c in pixels {
            if fs.state[c] != PixelState::Masked {
                continue;
            }
            *next_label += 1;
            created += 1;
            fs.state[c] = PixelState::Basin;
            fs.label[c] = *next_label;
            self.queue.push_back(c);

            while let Some(p) = self.queue.pop_front() {
                for n in self.shape.neighbors(p, self.connectivity) {
                    if fs.state[n] == PixelState::Masked {
                        fs.label[n] = *next_label;
                        fs.state[n] = PixelState::Basin;
                        self.queue.push_back(n);
                    }
                }
            }
        }
        created
    }
}
