// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Observer-side routine filtering policy.
//!
//! Which routines generate events at all is the observer's decision, not
//! the monitor's; this module ships the stock policy so observer glue
//! does not reinvent it. Routines owned by the dynamic loader, the C
//! runtime library, and the vDSO are noise for stack-smashing detection
//! (hand-written assembly, frameless leaf routines, loader trampolines)
//! and are excluded by default.

use std::collections::HashSet;

/// Images whose routines are never instrumented.
pub const EXCLUDED_IMAGES: [&str; 3] = ["ld-linux-x86-64.so.2", "libc.so.6", "[vdso]"];

/// Reduce an image path to its basename
///
/// Image names arrive as full filesystem paths; exclusion matches on the
/// final component only.
pub fn strip_path(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(name) => name,
        None => path,
    }
}

/// Image-level exclusion filter
#[derive(Debug, Clone)]
pub struct ImageFilter {
    excluded: HashSet<String>,
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self {
            excluded: EXCLUDED_IMAGES.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl ImageFilter {
    /// The stock filter: dynamic loader, libc, and vDSO excluded
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude an additional image by name
    pub fn exclude(&mut self, image: impl Into<String>) {
        self.excluded.insert(image.into());
    }

    /// Whether routines in the given image should be instrumented
    ///
    /// Accepts a full path or a bare image name.
    pub fn is_instrumented(&self, image_path: &str) -> bool {
        !self.excluded.contains(strip_path(image_path))
    }
}
