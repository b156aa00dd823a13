use motion::UiReveal;
use tracing::info;

/// Tracks which overlay elements have been revealed.
///
/// The windowed build has no DOM to fade in, so reveals reduce to state
/// flags plus log lines; an embedding with a real overlay would hook these
/// transitions instead.
#[derive(Debug, Default)]
pub(crate) struct UiState {
    loading_dismissed: bool,
    container_loaded: bool,
    nav_visible: bool,
    hero_visible: bool,
    scroll_indicator_visible: bool,
    scroll_indicator_faded: bool,
}

impl UiState {
    pub(crate) fn dismiss_loading(&mut self) {
        if !self.loading_dismissed {
            self.loading_dismissed = true;
            info!("loading indicator dismissed");
        }
    }

    pub(crate) fn apply(&mut self, reveal: UiReveal) {
        match reveal {
            UiReveal::ContainerLoaded => {
                if !self.container_loaded {
                    self.container_loaded = true;
                    info!("stage container revealed");
                }
            }
            UiReveal::Nav => {
                if !self.nav_visible {
                    self.nav_visible = true;
                    info!("navigation revealed");
                }
            }
            UiReveal::Hero => {
                if !self.hero_visible {
                    self.hero_visible = true;
                    info!("hero copy revealed");
                }
            }
            UiReveal::ScrollIndicator => {
                if !self.scroll_indicator_visible {
                    self.scroll_indicator_visible = true;
                    info!("scroll indicator revealed");
                }
            }
        }
    }

    /// Scroll position drives the indicator fade independently of the intro
    /// reveal; both must agree for it to show.
    pub(crate) fn set_indicator_faded(&mut self, faded: bool) {
        if faded != self.scroll_indicator_faded {
            self.scroll_indicator_faded = faded;
            if faded {
                info!("scroll indicator faded out");
            } else {
                info!("scroll indicator faded back in");
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn indicator_showing(&self) -> bool {
        self.scroll_indicator_visible && !self.scroll_indicator_faded
    }
}
