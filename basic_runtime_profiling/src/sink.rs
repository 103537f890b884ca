// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::resolver::{DefaultLabelResolver, LabelResolver, default_frame_label};
use basic_runtime::trace::{FrameExit, TrySink};
use std::vec::Vec;

/// One open `TRY` zone. `zone` is `None` when no Tracy client was running at entry.
struct OpenZone {
    depth: usize,
    zone: Option<tracy_client::Span>,
}

impl OpenZone {
    fn close(self, exit: FrameExit) {
        let Some(zone) = self.zone else {
            return;
        };
        match exit {
            FrameExit::Completed => {}
            FrameExit::Thrown => zone.emit_text("thrown"),
            FrameExit::Abandoned => zone.emit_text("abandoned"),
        }
    }
}

/// A [`TrySink`] that emits one Tracy zone per active `TRY` frame.
///
/// Zones that end through a throw or are abandoned by an outer region carry a text annotation.
pub struct ProfilingTrySink<R = DefaultLabelResolver> {
    labels: R,
    open: Vec<OpenZone>,
}

impl ProfilingTrySink<DefaultLabelResolver> {
    /// Sink with `try:<depth>` labels.
    #[must_use]
    pub fn new() -> Self {
        Self::with_resolver(DefaultLabelResolver)
    }
}

impl<R: LabelResolver> ProfilingTrySink<R> {
    /// Sink that asks `labels` for zone names.
    #[must_use]
    pub fn with_resolver(labels: R) -> Self {
        Self {
            labels,
            open: Vec::with_capacity(basic_runtime::Limits::DEFAULT_MAX_TRY_DEPTH),
        }
    }

    /// Number of zones currently open.
    #[must_use]
    pub fn open_zones(&self) -> usize {
        self.open.len()
    }

    fn close_all(&mut self) {
        // Innermost first.
        while let Some(zone) = self.open.pop() {
            zone.close(FrameExit::Abandoned);
        }
    }
}

fn enter_zone(label: &str, depth: usize) -> Option<tracy_client::Span> {
    let line = u32::try_from(depth).unwrap_or(u32::MAX);
    let client = tracy_client::Client::running()?;
    Some(client.span_alloc(Some(label), "basic_runtime.try", "basic_runtime", line, 0))
}

impl<R: LabelResolver> TrySink for ProfilingTrySink<R> {
    fn frame_enter(&mut self, depth: usize) {
        let label = self
            .labels
            .frame_label(depth)
            .unwrap_or_else(|| default_frame_label(depth));
        let zone = enter_zone(&label, depth);
        self.open.push(OpenZone { depth, zone });
    }

    fn frame_exit(&mut self, depth: usize, exit: FrameExit) {
        match self.open.pop() {
            Some(top) if top.depth == depth => top.close(exit),
            Some(top) => {
                top.close(FrameExit::Abandoned);
                self.close_all();
            }
            None => {}
        }
    }
}

impl<R> Default for ProfilingTrySink<R>
where
    R: LabelResolver + Default,
{
    fn default() -> Self {
        Self::with_resolver(R::default())
    }
}

impl<R> std::fmt::Debug for ProfilingTrySink<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilingTrySink")
            .field("open_zones", &self.open.len())
            .finish_non_exhaustive()
    }
}
