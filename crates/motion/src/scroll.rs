/// Scroll position reduced to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub progress: f64,
    pub scroll_y: f64,
    /// The scroll hint fades once the reader has moved past the fold.
    pub indicator_hidden: bool,
}

/// Coalesces raw scroll events into at most one sample per frame.
///
/// Hosts call `record_scroll` from the input path; it returns true only for
/// the first event since the last `take_sample`, which is the host's cue to
/// demand a frame. Every later event in the same frame just overwrites the
/// stored offset, so the sample consumed on the next tick reflects the
/// newest position.
#[derive(Debug, Clone)]
pub struct ScrollBinding {
    document_height: f64,
    viewport_height: f64,
    scroll_y: f64,
    ticking: bool,
}

const INDICATOR_FADE_Y: f64 = 100.0;

impl ScrollBinding {
    pub fn new(document_height: f64, viewport_height: f64) -> Self {
        Self {
            document_height,
            viewport_height,
            scroll_y: 0.0,
            ticking: false,
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    /// Records a new absolute scroll offset. Returns true when a frame
    /// should be requested; false means a sample is already pending.
    pub fn record_scroll(&mut self, scroll_y: f64) -> bool {
        self.scroll_y = scroll_y.clamp(0.0, self.max_scroll());
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    /// Shifts the offset by a wheel delta, same coalescing contract.
    pub fn record_scroll_delta(&mut self, delta_y: f64) -> bool {
        self.record_scroll(self.scroll_y + delta_y)
    }

    /// Consumes the pending sample, if any. One sample per request cycle.
    pub fn take_sample(&mut self) -> Option<ScrollSample> {
        if !self.ticking {
            return None;
        }
        self.ticking = false;
        Some(ScrollSample {
            progress: self.progress(),
            scroll_y: self.scroll_y,
            indicator_hidden: self.scroll_y > INDICATOR_FADE_Y,
        })
    }

    /// Current progress in `[0, 1]`. A document no taller than the viewport
    /// has no scrollable range and pins progress to zero.
    pub fn progress(&self) -> f64 {
        let scrollable = self.document_height - self.viewport_height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scroll_y / scrollable).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_maps_offset_over_scrollable_range() {
        let mut binding = ScrollBinding::new(6000.0, 1000.0);
        binding.record_scroll(2500.0);
        assert_eq!(binding.progress(), 0.5);
        binding.record_scroll(5000.0);
        assert_eq!(binding.progress(), 1.0);
    }

    #[test]
    fn progress_clamps_past_the_document_end() {
        let mut binding = ScrollBinding::new(6000.0, 1000.0);
        binding.record_scroll(9999.0);
        assert_eq!(binding.progress(), 1.0);
        binding.record_scroll(-50.0);
        assert_eq!(binding.progress(), 0.0);
    }

    #[test]
    fn short_document_pins_progress_to_zero() {
        let mut binding = ScrollBinding::new(800.0, 1000.0);
        binding.record_scroll(400.0);
        assert_eq!(binding.progress(), 0.0);
        assert_eq!(binding.max_scroll(), 0.0);
    }

    #[test]
    fn events_between_samples_coalesce_to_the_newest_offset() {
        let mut binding = ScrollBinding::new(6000.0, 1000.0);
        assert!(binding.record_scroll(100.0), "first event demands a frame");
        assert!(!binding.record_scroll(200.0));
        assert!(!binding.record_scroll(300.0));

        let sample = binding.take_sample().expect("pending sample");
        assert_eq!(sample.scroll_y, 300.0);

        assert!(binding.take_sample().is_none(), "sample consumed");
        assert!(binding.record_scroll(400.0), "next cycle demands again");
    }

    #[test]
    fn indicator_hides_past_the_fade_threshold() {
        let mut binding = ScrollBinding::new(6000.0, 1000.0);
        binding.record_scroll(100.0);
        assert!(!binding.take_sample().expect("sample").indicator_hidden);
        binding.record_scroll(101.0);
        assert!(binding.take_sample().expect("sample").indicator_hidden);
    }

    #[test]
    fn wheel_deltas_accumulate() {
        let mut binding = ScrollBinding::new(6000.0, 1000.0);
        binding.record_scroll_delta(120.0);
        binding.record_scroll_delta(120.0);
        assert_eq!(binding.scroll_y(), 240.0);
        binding.record_scroll_delta(-500.0);
        assert_eq!(binding.scroll_y(), 0.0);
    }

    #[test]
    fn viewport_shrink_reclamps_the_offset() {
        let mut binding = ScrollBinding::new(6000.0, 1000.0);
        binding.record_scroll(5000.0);
        binding.set_viewport_height(2000.0);
        assert_eq!(binding.scroll_y(), 4000.0);
        assert_eq!(binding.progress(), 1.0);
    }
}
