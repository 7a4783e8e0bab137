use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_FOOTER_HIDE_FRACTION, DEFAULT_HEADER_HIDE_FRACTION,
    DEFAULT_LOOKAHEAD_VIEWPORTS, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_PREFETCH_RADIUS,
    DEFAULT_PRIORITY_PAGES, DEFAULT_SETTLE_MS, DEFAULT_SWIPE_THRESHOLD_PX,
};
use crate::error::{FolioError, Result};

/// Complete viewer configuration. Every section and field is optional in
/// TOML and falls back to the defaults in [`crate::consts`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
}

impl ViewerConfig {
    /// Reject values the state machines cannot work with.
    pub fn validate(&self) -> Result<()> {
        let t = &self.tracker;
        if t.debounce_ms == 0 {
            return Err(invalid("tracker.debounce_ms must be greater than zero"));
        }
        check_non_negative("tracker.lookahead_viewports", t.lookahead_viewports)?;
        check_non_negative("tracker.header_hide_fraction", t.header_hide_fraction)?;
        check_non_negative("tracker.footer_hide_fraction", t.footer_hide_fraction)?;

        let g = &self.gestures;
        check_non_negative("gestures.swipe_threshold_px", g.swipe_threshold_px)?;
        if !g.min_zoom.is_finite() || g.min_zoom <= 0.0 {
            return Err(invalid("gestures.min_zoom must be a positive number"));
        }
        if !g.max_zoom.is_finite() || g.min_zoom > g.max_zoom {
            return Err(invalid("gestures.max_zoom must not be below gestures.min_zoom"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> FolioError {
    FolioError::InvalidConfig(msg.to_string())
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FolioError::InvalidConfig(format!(
            "{name} must be a non-negative number (got {value})"
        )))
    }
}

/// Scroll debounce and window-extension tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Quiet period after the last scroll event, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Lookahead margin in viewport heights.
    #[serde(default = "default_lookahead_viewports")]
    pub lookahead_viewports: f64,
    #[serde(default = "default_header_hide_fraction")]
    pub header_hide_fraction: f64,
    #[serde(default = "default_footer_hide_fraction")]
    pub footer_hide_fraction: f64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_lookahead_viewports() -> f64 {
    DEFAULT_LOOKAHEAD_VIEWPORTS
}
fn default_header_hide_fraction() -> f64 {
    DEFAULT_HEADER_HIDE_FRACTION
}
fn default_footer_hide_fraction() -> f64 {
    DEFAULT_FOOTER_HIDE_FRACTION
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            lookahead_viewports: DEFAULT_LOOKAHEAD_VIEWPORTS,
            header_hide_fraction: DEFAULT_HEADER_HIDE_FRACTION,
            footer_hide_fraction: DEFAULT_FOOTER_HIDE_FRACTION,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Delay after a page jump before infinite scroll resumes, in milliseconds.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Neighbors on each side prefetched into the cache on a page change.
    #[serde(default = "default_prefetch_radius")]
    pub prefetch_radius: usize,
}

fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE_MS
}
fn default_prefetch_radius() -> usize {
    DEFAULT_PREFETCH_RADIUS
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            settle_ms: DEFAULT_SETTLE_MS,
            prefetch_radius: DEFAULT_PREFETCH_RADIUS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    #[serde(default = "default_swipe_threshold_px")]
    pub swipe_threshold_px: f64,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

fn default_swipe_threshold_px() -> f64 {
    DEFAULT_SWIPE_THRESHOLD_PX
}
fn default_min_zoom() -> f64 {
    DEFAULT_MIN_ZOOM
}
fn default_max_zoom() -> f64 {
    DEFAULT_MAX_ZOOM
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Pages attached one by one before the viewer reports ready.
    #[serde(default = "default_priority_pages")]
    pub priority_pages: usize,
}

fn default_priority_pages() -> usize {
    DEFAULT_PRIORITY_PAGES
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            priority_pages: DEFAULT_PRIORITY_PAGES,
        }
    }
}
