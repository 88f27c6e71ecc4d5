// src/extract/options.rs
// =============================================================================
// Knobs for an extraction run.
//
// Defaults reproduce the plain behaviour: one in-flight request per child
// sitemap and strict root-element classification.
// =============================================================================

use std::num::NonZeroUsize;

use crate::sitemap::ClassifyMode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Maximum number of child sitemaps fetched at once. `None` fetches
    /// every child of an index at the same time.
    pub concurrency: Option<NonZeroUsize>,
    /// How the root document is classified.
    pub mode: ClassifyMode,
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the fan-out. Zero means "no cap".
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.concurrency = NonZeroUsize::new(limit);
        self
    }

    pub fn mode(mut self, mode: ClassifyMode) -> Self {
        self.mode = mode;
        self
    }

    /// How many child jobs to keep in flight for an index with `children`
    /// entries. Never zero.
    pub(crate) fn fan_out_width(&self, children: usize) -> usize {
        let width = match self.concurrency {
            Some(limit) => limit.get().min(children),
            None => children,
        };
        width.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExtractOptions::default();
        assert_eq!(options.concurrency, None);
        assert_eq!(options.mode, ClassifyMode::Strict);
    }

    #[test]
    fn test_zero_concurrency_means_unbounded() {
        assert_eq!(ExtractOptions::new().concurrency(0).concurrency, None);
        assert_eq!(ExtractOptions::new().concurrency(0).fan_out_width(40), 40);
    }

    #[test]
    fn test_fan_out_width() {
        let capped = ExtractOptions::new().concurrency(8);
        assert_eq!(capped.fan_out_width(100), 8);
        assert_eq!(capped.fan_out_width(3), 3);
        assert_eq!(capped.fan_out_width(0), 1);
        assert_eq!(ExtractOptions::new().fan_out_width(0), 1);
    }
}
