//! The mountable counters section.
//!
//! A [`CounterSection`] turns a batch of [`CounterSpec`]s into laid-out,
//! staggered [`CounterWidget`]s, swaps in live data when a spawned load
//! finishes, and tears everything down on unmount.

use crate::counter_widget::CounterWidget;
use crate::layout::{SectionLayout, DEFAULT_GRID_COLUMNS, DEFAULT_ITEM_HEIGHT};
use crate::variant::{CardStyle, Variant};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tally_core::{
    assign_delays, Canvas, Color, CounterSpec, Easing, FontWeight, Locale, Point, Rect, TextStyle,
    DEFAULT_DURATION_MS, DEFAULT_STAGGER_MS, DEFAULT_VISIBILITY_THRESHOLD,
};
use tally_loader::{LoadHandle, Loader};
use tracing::{debug, info, warn};

const PADDING: f32 = 24.0;
const TITLE_HEIGHT: f32 = 40.0;
const SUBTITLE_HEIGHT: f32 = 28.0;

/// Section configuration. Every field has a default, so an empty config
/// mounts a working section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Heading above the counters
    pub title: Option<String>,
    /// Line under the heading
    pub subtitle: Option<String>,
    /// Arrangement
    pub layout: SectionLayout,
    /// Card background treatment
    #[serde(alias = "cardStyle")]
    pub card_style: CardStyle,
    /// Count-up duration for counters without their own
    #[serde(alias = "animationDurationMs")]
    pub animation_duration_ms: u64,
    /// Delay between consecutive counters
    #[serde(alias = "animationStaggerMs")]
    pub animation_stagger_ms: u64,
    /// Cap on displayed counters
    #[serde(alias = "maxCounters")]
    pub max_counters: Option<usize>,
    /// Section background as hex
    #[serde(alias = "backgroundColor")]
    pub background_color: Option<String>,
    /// Counter layout
    pub variant: Variant,
    /// Count-up curve
    pub easing: Easing,
    /// Visible fraction that triggers a counter
    #[serde(alias = "visibilityThreshold")]
    pub visibility_threshold: f32,
    /// Columns for the grid layout
    #[serde(alias = "gridColumns")]
    pub grid_columns: usize,
    /// Counter cell height in pixels
    #[serde(alias = "itemHeight")]
    pub item_height: f32,
    /// Number formatting
    pub locale: Locale,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            layout: SectionLayout::default(),
            card_style: CardStyle::default(),
            animation_duration_ms: DEFAULT_DURATION_MS,
            animation_stagger_ms: DEFAULT_STAGGER_MS,
            max_counters: None,
            background_color: None,
            variant: Variant::default(),
            easing: Easing::default(),
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            grid_columns: DEFAULT_GRID_COLUMNS,
            item_height: DEFAULT_ITEM_HEIGHT,
            locale: Locale::default(),
        }
    }
}

impl SectionConfig {
    /// Titled config with defaults elsewhere.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    fn header_height(&self) -> f32 {
        let mut height = 0.0;
        if self.title.is_some() {
            height += TITLE_HEIGHT;
        }
        if self.subtitle.is_some() {
            height += SUBTITLE_HEIGHT;
        }
        if height > 0.0 {
            height += PADDING;
        }
        height
    }

    fn background(&self) -> Option<Color> {
        let hex = self.background_color.as_deref()?;
        match Color::from_hex(hex) {
            Ok(color) => Some(color),
            Err(err) => {
                warn!(color = hex, error = %err, "ignoring unparseable section background");
                None
            }
        }
    }
}

/// Sort by `order` (stable), drop repeated ids and apply the cap.
#[must_use]
pub fn prepare_batch(mut specs: Vec<CounterSpec>, max_counters: Option<usize>) -> Vec<CounterSpec> {
    specs.sort_by_key(CounterSpec::order);

    let mut seen = HashSet::new();
    specs.retain(|spec| {
        let fresh = seen.insert(spec.id().clone());
        if !fresh {
            warn!(id = %spec.id(), "duplicate counter id dropped");
        }
        fresh
    });

    if let Some(max) = max_counters {
        specs.truncate(max);
    }
    specs
}

/// A mounted section of animated counters.
#[derive(Debug)]
pub struct CounterSection {
    config: SectionConfig,
    bounds: Rect,
    background: Option<Color>,
    widgets: Vec<CounterWidget>,
    load: Option<LoadHandle<CounterSpec>>,
    error: Option<String>,
    mounted: bool,
}

impl CounterSection {
    /// Mount over a fixed batch.
    #[must_use]
    pub fn mount_static(config: SectionConfig, bounds: Rect, specs: Vec<CounterSpec>) -> Self {
        let mut section = Self {
            background: config.background(),
            config,
            bounds,
            widgets: Vec::new(),
            load: None,
            error: None,
            mounted: true,
        };
        section.replace_batch(specs);
        section
    }

    /// Mount showing the loader's fallback and start fetching `endpoint`.
    /// Live data replaces the batch when it arrives.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn mount(
        config: SectionConfig,
        bounds: Rect,
        loader: &Loader<CounterSpec>,
        endpoint: &str,
    ) -> Self {
        let mut section = Self::mount_static(config, bounds, loader.fallback().to_vec());
        section.load = Some(loader.spawn(endpoint));
        section
    }

    /// Replace every widget with a new batch. Animations restart from zero.
    pub fn replace_batch(&mut self, specs: Vec<CounterSpec>) {
        for widget in &mut self.widgets {
            widget.unmount();
        }

        let specs = prepare_batch(specs, self.config.max_counters);
        let delays = assign_delays(&specs, self.config.animation_stagger_ms);
        let duration = if self.config.animation_duration_ms == 0 {
            warn!("animation duration of 0 ms raised to 1 ms");
            1
        } else {
            self.config.animation_duration_ms
        };

        self.widgets = specs
            .into_iter()
            .zip(delays)
            .map(|(spec, delay)| {
                CounterWidget::new(
                    spec,
                    delay,
                    duration,
                    self.config.easing,
                    self.config.visibility_threshold,
                )
            })
            .collect();
        self.relayout();
        debug!(count = self.widgets.len(), "counter batch mounted");
    }

    /// Move or resize the section.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.relayout();
    }

    fn relayout(&mut self) {
        let header = self.config.header_height();
        let area = Rect::new(
            self.bounds.x + PADDING,
            self.bounds.y + PADDING + header,
            (self.bounds.width - 2.0 * PADDING).max(0.0),
            (self.bounds.height - 2.0 * PADDING - header).max(0.0),
        );
        let cells = self.config.layout.cells(
            area,
            self.widgets.len(),
            self.config.grid_columns,
            self.config.item_height,
        );
        for (widget, cell) in self.widgets.iter_mut().zip(cells) {
            widget.set_bounds(cell);
        }
    }

    /// Height the section needs at its current width.
    #[must_use]
    pub fn preferred_height(&self) -> f32 {
        2.0 * PADDING
            + self.config.header_height()
            + self.config.layout.content_height(
                self.widgets.len(),
                self.config.grid_columns,
                self.config.item_height,
            )
    }

    /// Advance one frame: adopt a finished load, then run every widget.
    pub fn frame(&mut self, now_ms: u64, viewport: Rect) {
        if !self.mounted {
            return;
        }
        self.poll_load();
        for widget in &mut self.widgets {
            widget.frame(now_ms, viewport);
        }
    }

    fn poll_load(&mut self) {
        let Some(state) = self.load.as_mut().and_then(LoadHandle::take_update) else {
            return;
        };
        if state.loading {
            return;
        }
        self.load = None;
        self.error = state.error;

        let current: Vec<&CounterSpec> = self.widgets.iter().map(CounterWidget::spec).collect();
        let unchanged = prepare_batch(state.data.clone(), self.config.max_counters)
            .iter()
            .eq(current.iter().copied());
        if unchanged {
            debug!("load finished with the batch already shown");
        } else {
            info!(count = state.data.len(), "adopting live counters");
            self.replace_batch(state.data);
        }
    }

    /// Paint the section and its counters.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        if let Some(background) = self.background {
            canvas.fill_rect(self.bounds, 0.0, background);
        }
        let text = self
            .background
            .map_or(Color::BLACK, |background| background.readable_text());
        let center_x = self.bounds.center().x;
        let mut y = self.bounds.y + PADDING;

        if let Some(title) = &self.config.title {
            y += TITLE_HEIGHT / 2.0;
            canvas.draw_text(
                title,
                Point::new(center_x, y),
                &TextStyle::new(28.0, text, FontWeight::Bold).centered(),
            );
            y += TITLE_HEIGHT / 2.0;
        }
        if let Some(subtitle) = &self.config.subtitle {
            y += SUBTITLE_HEIGHT / 2.0;
            canvas.draw_text(
                subtitle,
                Point::new(center_x, y),
                &TextStyle::new(16.0, text.with_alpha(0.7), FontWeight::Normal).centered(),
            );
        }

        for widget in &self.widgets {
            widget.paint(
                self.config.variant,
                self.config.card_style,
                self.config.locale,
                canvas,
            );
        }
    }

    /// Cancel the load, every animation and every visibility observation.
    pub fn unmount(&mut self) {
        if let Some(load) = self.load.take() {
            load.cancel();
        }
        for widget in &mut self.widgets {
            widget.unmount();
        }
        self.mounted = false;
        debug!("counter section unmounted");
    }

    /// No load pending and no counter animating. Counters that have not
    /// become visible yet are idle, so an untriggered section is settled;
    /// see [`CounterSection::is_complete`].
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.load.is_none() && !self.widgets.iter().any(CounterWidget::is_animating)
    }

    /// Settled with every counter triggered, or unmounted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_settled() && (!self.mounted || self.untriggered() == 0)
    }

    /// Counters still waiting for their visibility trigger.
    #[must_use]
    pub fn untriggered(&self) -> usize {
        self.widgets.iter().filter(|w| !w.is_triggered()).count()
    }

    /// Whether a load is still pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.load.is_some()
    }

    /// Failure message of the last load, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mounted counters in display order.
    #[must_use]
    pub fn widgets(&self) -> &[CounterWidget] {
        &self.widgets
    }

    /// Displayed values in display order.
    #[must_use]
    pub fn displayed(&self) -> Vec<u64> {
        self.widgets.iter().map(CounterWidget::displayed).collect()
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &SectionConfig {
        &self.config
    }

    /// Section bounds.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether `unmount` has not been called.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl Drop for CounterSection {
    fn drop(&mut self) {
        if self.mounted {
            self.unmount();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{DrawCommand, RecordingCanvas};

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 1080.0, 600.0);
    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

    fn spec(id: u64, order: i32, value: i64) -> CounterSpec {
        CounterSpec::new(id, format!("c{id}"), value).with_order(order)
    }

    #[test]
    fn test_prepare_batch_sorts_dedupes_and_caps() {
        let batch = prepare_batch(
            vec![spec(1, 3, 10), spec(2, 1, 20), spec(1, 0, 99), spec(3, 1, 30)],
            Some(2),
        );
        let ids: Vec<_> = batch.iter().map(|s| s.id().as_str()).collect();
        // Stable sort puts the later id 1 (order 0) first, so it wins.
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(batch[0].target_value(), 99);
    }

    #[test]
    fn test_config_defaults() {
        let config: SectionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SectionConfig::default());
        assert_eq!(config.layout, SectionLayout::Horizontal);
        assert_eq!(config.card_style, CardStyle::Default);
        assert_eq!(config.variant, Variant::Card);
        assert_eq!(config.animation_duration_ms, 2000);
        assert_eq!(config.animation_stagger_ms, 200);
        assert_eq!(config.grid_columns, 4);
    }

    #[test]
    fn test_config_accepts_camel_case() {
        let config: SectionConfig = serde_json::from_str(
            r#"{"cardStyle": "gradient", "animationStaggerMs": 50, "maxCounters": 3, "layout": "grid"}"#,
        )
        .unwrap();
        assert_eq!(config.card_style, CardStyle::Gradient);
        assert_eq!(config.animation_stagger_ms, 50);
        assert_eq!(config.max_counters, Some(3));
        assert_eq!(config.layout, SectionLayout::Grid);
    }

    #[test]
    fn test_mount_static_staggers_and_lays_out() {
        let section = CounterSection::mount_static(
            SectionConfig::default(),
            BOUNDS,
            vec![spec(1, 0, 10), spec(2, 1, 20), spec(3, 2, 30).with_delay_ms(5)],
        );
        let delays: Vec<_> = section.widgets().iter().map(CounterWidget::delay_ms).collect();
        assert_eq!(delays, vec![0, 200, 5]);

        let xs: Vec<_> = section.widgets().iter().map(|w| w.bounds().x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert!(section.is_settled());
    }

    #[test]
    fn test_frame_runs_to_targets() {
        let mut section = CounterSection::mount_static(
            SectionConfig::default(),
            BOUNDS,
            vec![spec(1, 0, 15), spec(2, 1, 1200)],
        );
        section.frame(0, VIEWPORT);
        assert!(!section.is_settled());
        for now in (16..=3_000).step_by(16) {
            section.frame(now, VIEWPORT);
        }
        assert_eq!(section.displayed(), vec![15, 1200]);
        assert!(section.is_settled());
    }

    #[test]
    fn test_unmount_freezes_values() {
        let mut section =
            CounterSection::mount_static(SectionConfig::default(), BOUNDS, vec![spec(1, 0, 1000)]);
        section.frame(0, VIEWPORT);
        section.frame(500, VIEWPORT);
        let frozen = section.displayed();
        section.unmount();
        section.frame(5_000, VIEWPORT);
        assert_eq!(section.displayed(), frozen);
        assert!(!section.is_mounted());
        assert!(section.is_settled());
    }

    #[test]
    fn test_paint_title_background_and_counters() {
        let config = SectionConfig {
            subtitle: Some("Since 2009".into()),
            background_color: Some("#0f172a".into()),
            variant: Variant::Minimal,
            card_style: CardStyle::Minimal,
            ..SectionConfig::titled("Our impact")
        };
        let section = CounterSection::mount_static(config, BOUNDS, vec![spec(1, 0, 15)]);
        let mut canvas = RecordingCanvas::new();
        section.paint(&mut canvas);

        assert!(matches!(
            canvas.commands()[0],
            DrawCommand::Rect { radius, .. } if radius == 0.0
        ));
        assert_eq!(canvas.texts(), vec!["Our impact", "Since 2009", "0", "c1"]);
    }

    #[test]
    fn test_bad_background_is_ignored() {
        let config = SectionConfig {
            background_color: Some("navy-ish".into()),
            card_style: CardStyle::Minimal,
            variant: Variant::Minimal,
            ..SectionConfig::default()
        };
        let section = CounterSection::mount_static(config, BOUNDS, vec![spec(1, 0, 1)]);
        let mut canvas = RecordingCanvas::new();
        section.paint(&mut canvas);
        assert!(canvas
            .commands()
            .iter()
            .all(|c| matches!(c, DrawCommand::Text { .. })));
    }

    #[test]
    fn test_zero_duration_config_is_clamped() {
        let config = SectionConfig {
            animation_duration_ms: 0,
            ..SectionConfig::default()
        };
        let mut section = CounterSection::mount_static(config, BOUNDS, vec![spec(1, 0, 7)]);
        section.frame(0, VIEWPORT);
        section.frame(1, VIEWPORT);
        assert_eq!(section.displayed(), vec![7]);
    }

    #[test]
    fn test_preferred_height_grows_with_header() {
        let plain = CounterSection::mount_static(SectionConfig::default(), BOUNDS, vec![spec(1, 0, 1)]);
        let titled =
            CounterSection::mount_static(SectionConfig::titled("T"), BOUNDS, vec![spec(1, 0, 1)]);
        assert!(titled.preferred_height() > plain.preferred_height());
        assert_eq!(plain.preferred_height(), 48.0 + 160.0);
    }
}
