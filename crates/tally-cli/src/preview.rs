//! Terminal preview of a counters section.
//!
//! [`TerminalCanvas`] maps the pixel-space paint calls onto character cells
//! and queues crossterm commands; [`run`] mounts a live section and redraws
//! it every frame until it settles.

use crate::config::TallyConfig;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use std::io::{self, Write};
use std::sync::Arc;
use tally_core::{Canvas, Color, Point, Rect, TextAlign, TextStyle};
use tally_loader::{default_counters, HttpSource, Loader};
use tally_widgets::{drive_with, CounterSection, IntervalScheduler, StopWhen};
use tracing::info;

/// Pixels per character cell, horizontally.
pub(crate) const CELL_WIDTH: f32 = 8.0;
/// Pixels per character cell, vertically.
pub(crate) const CELL_HEIGHT: f32 = 16.0;

const BAR_WIDTH: usize = 12;

/// Canvas that writes text-mode approximations of paint calls.
///
/// Background fills are skipped; rings become progress bars; icons become
/// single marker characters.
pub(crate) struct TerminalCanvas<W: Write> {
    out: W,
    color: bool,
    error: Option<io::Error>,
}

impl<W: Write> TerminalCanvas<W> {
    /// Canvas over `out`. With `color` false no color sequences are written.
    pub(crate) const fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            error: None,
        }
    }

    /// Queue a full-screen clear before the next paint.
    pub(crate) fn begin_frame(&mut self) {
        if self.error.is_none() {
            if let Err(err) = queue!(self.out, Clear(ClearType::All)) {
                self.error = Some(err);
            }
        }
    }

    /// Flush queued output and surface the first write error.
    pub(crate) fn finish(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()
    }

    /// The underlying writer.
    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn put(&mut self, text: &str, position: Point, align: TextAlign, color: Color) {
        if self.error.is_some() {
            return;
        }
        let width = text.chars().count() as f32;
        let mut column = position.x / CELL_WIDTH;
        if align == TextAlign::Center {
            column -= width / 2.0;
        }
        let column = column.max(0.0).round() as u16;
        let row = (position.y / CELL_HEIGHT).max(0.0).round() as u16;

        let result = if self.color {
            queue!(
                self.out,
                MoveTo(column, row),
                SetForegroundColor(to_term(color)),
                Print(text),
                ResetColor
            )
        } else {
            queue!(self.out, MoveTo(column, row), Print(text))
        };
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

/// Convert to a 24-bit terminal color.
pub(crate) fn to_term(color: Color) -> TermColor {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    TermColor::Rgb {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// `[#####-------]` style bar for a fraction in `[0, 1]`.
pub(crate) fn progress_bar(fraction: f32) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn fill_rect(&mut self, _rect: Rect, _radius: f32, _color: Color) {}

    fn fill_gradient(&mut self, _rect: Rect, _radius: f32, _from: Color, _to: Color) {}

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.put(text, position, style.align, style.color);
    }

    fn stroke_circle(&mut self, _center: Point, _radius: f32, _color: Color, _width: f32) {}

    fn stroke_arc(&mut self, center: Point, radius: f32, sweep: f32, color: Color, _width: f32) {
        let position = Point::new(center.x, center.y - radius / 2.0);
        self.put(&progress_bar(sweep), position, TextAlign::Center, color);
    }

    fn draw_glyph(&mut self, _class: &str, center: Point, _size: f32, color: Color) {
        self.put("◆", center, TextAlign::Center, color);
    }

    fn draw_image(&mut self, _source: &str, rect: Rect) {
        self.put("▣", rect.center(), TextAlign::Center, Color::MUTED);
    }
}

/// Mount the counters section against the live API and animate it in the
/// terminal until it settles.
pub(crate) async fn run(config: &TallyConfig, endpoint: &str, fps: u32) -> io::Result<()> {
    let (columns, rows) = crossterm::terminal::size().unwrap_or((100, 30));
    let screen = Rect::new(
        0.0,
        0.0,
        f32::from(columns) * CELL_WIDTH,
        f32::from(rows) * CELL_HEIGHT,
    );

    let source = HttpSource::new(config.api_base_url.clone()).with_timeout(config.timeout());
    let loader = Loader::new(Arc::new(source), default_counters());
    let mut section = CounterSection::mount(config.section.clone(), screen, &loader, endpoint);
    info!(endpoint, fps, "previewing counters");

    let mut stdout = io::stdout();
    execute!(stdout, Hide)?;

    let mut canvas = TerminalCanvas::new(io::stdout(), true);
    let mut scheduler = IntervalScheduler::new(fps);
    let max_frames = usize::try_from(fps.max(1)).unwrap_or(60) * 30;
    let mut failure = None;
    let report = drive_with(
        &mut section,
        &mut scheduler,
        |_| screen,
        max_frames,
        StopWhen::Idle,
        |section, _| {
            canvas.begin_frame();
            section.paint(&mut canvas);
            if let Err(err) = canvas.finish() {
                failure.get_or_insert(err);
            }
        },
    )
    .await;

    execute!(stdout, MoveTo(0, rows.saturating_sub(2)), Show)?;
    if let Some(err) = failure {
        return Err(err);
    }
    if let Some(error) = section.error() {
        println!("showing default counters: {error}");
    }
    info!(frames = report.frames, settled = report.settled, "preview finished");
    Ok(())
}
