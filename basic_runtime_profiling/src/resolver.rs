// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::string::String;

/// Optional label resolver for `TRY` zones.
///
/// Return `None` to fall back to the default depth-based label.
pub trait LabelResolver {
    /// Resolve a label for the frame at `depth`.
    fn frame_label(&mut self, _depth: usize) -> Option<String> {
        None
    }
}

/// Default resolver that keeps depth-based labels.
#[derive(Default, Debug)]
pub struct DefaultLabelResolver;

impl LabelResolver for DefaultLabelResolver {}

pub(crate) fn default_frame_label(depth: usize) -> String {
    format!("try:{depth}")
}
