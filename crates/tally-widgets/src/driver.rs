//! Frame scheduling.
//!
//! Widgets never own a timer. A [`FrameScheduler`] hands out frame
//! timestamps and [`drive`] feeds them to a section until it settles.
//! [`IntervalScheduler`] ticks in real time; [`ManualScheduler`] steps a
//! fake clock so animation tests are deterministic.

use crate::section::CounterSection;
use async_trait::async_trait;
use std::time::Duration;
use tally_core::Rect;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Default frame rate.
pub const DEFAULT_FPS: u32 = 60;

/// Source of animation frame timestamps.
#[async_trait]
pub trait FrameScheduler: Send {
    /// Wait for the next frame and return its timestamp in milliseconds.
    /// Timestamps never decrease.
    async fn next_frame(&mut self) -> u64;
}

/// Real-time frames from a tokio interval.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Interval,
    origin: Instant,
}

impl IntervalScheduler {
    /// Tick at `fps` frames per second (at least 1).
    #[must_use]
    pub fn new(fps: u32) -> Self {
        let period = Duration::from_micros(1_000_000 / u64::from(fps.max(1)));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            origin: Instant::now(),
        }
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

#[async_trait]
impl FrameScheduler for IntervalScheduler {
    async fn next_frame(&mut self) -> u64 {
        let tick = self.interval.tick().await;
        u64::try_from(tick.saturating_duration_since(self.origin).as_millis()).unwrap_or(u64::MAX)
    }
}

/// Fake clock advancing a fixed step per frame.
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    next: u64,
    step: u64,
}

impl ManualScheduler {
    /// First frame at `start_ms`, then every `step_ms`.
    #[must_use]
    pub const fn new(start_ms: u64, step_ms: u64) -> Self {
        Self {
            next: start_ms,
            step: step_ms,
        }
    }

    /// Timestamp the next frame will carry.
    #[must_use]
    pub const fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(0, 16)
    }
}

#[async_trait]
impl FrameScheduler for ManualScheduler {
    async fn next_frame(&mut self) -> u64 {
        // Let spawned loads make progress between frames.
        tokio::task::yield_now().await;
        let now = self.next;
        self.next = self.next.saturating_add(self.step);
        now
    }
}

/// When a drive loop stops before its frame budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopWhen {
    /// No load pending and nothing animating. Counters that never became
    /// visible stay at 0 and do not hold the loop open.
    #[default]
    Idle,
    /// Idle, and every counter has been triggered and counted. Keeps
    /// running while a counter waits below the fold for a scroll.
    AllCounted,
}

impl StopWhen {
    fn reached(self, section: &CounterSection) -> bool {
        match self {
            Self::Idle => section.is_settled(),
            Self::AllCounted => section.is_complete(),
        }
    }
}

/// How a [`drive`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveReport {
    /// Frames delivered
    pub frames: usize,
    /// Timestamp of the last frame
    pub last_frame_ms: u64,
    /// Whether the stop condition was reached within the budget
    pub settled: bool,
    /// Counters still waiting for their visibility trigger
    pub untriggered: usize,
}

/// Run frames until the section is idle ([`StopWhen::Idle`]) or
/// `max_frames` is reached.
///
/// `viewport` maps a frame timestamp to the visible region. A counter that
/// is off screen when everything else finishes ends the loop untriggered;
/// use [`drive_until`] with [`StopWhen::AllCounted`] to keep scrolling.
pub async fn drive<S, V>(
    section: &mut CounterSection,
    scheduler: &mut S,
    viewport: V,
    max_frames: usize,
) -> DriveReport
where
    S: FrameScheduler + ?Sized,
    V: FnMut(u64) -> Rect,
{
    drive_until(section, scheduler, viewport, max_frames, StopWhen::Idle).await
}

/// Run frames until `stop` is reached or `max_frames` is spent.
pub async fn drive_until<S, V>(
    section: &mut CounterSection,
    scheduler: &mut S,
    viewport: V,
    max_frames: usize,
    stop: StopWhen,
) -> DriveReport
where
    S: FrameScheduler + ?Sized,
    V: FnMut(u64) -> Rect,
{
    drive_with(section, scheduler, viewport, max_frames, stop, |_, _| {}).await
}

/// [`drive_until`] with a callback after every frame, for redrawing.
pub async fn drive_with<S, V, F>(
    section: &mut CounterSection,
    scheduler: &mut S,
    mut viewport: V,
    max_frames: usize,
    stop: StopWhen,
    mut on_frame: F,
) -> DriveReport
where
    S: FrameScheduler + ?Sized,
    V: FnMut(u64) -> Rect,
    F: FnMut(&CounterSection, u64),
{
    let mut report = DriveReport {
        frames: 0,
        last_frame_ms: 0,
        settled: false,
        untriggered: 0,
    };

    while report.frames < max_frames {
        let now = scheduler.next_frame().await;
        section.frame(now, viewport(now));
        on_frame(section, now);

        report.frames += 1;
        report.last_frame_ms = now;
        if stop.reached(section) {
            report.settled = true;
            break;
        }
    }
    report.untriggered = section.untriggered();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SectionLayout;
    use crate::section::SectionConfig;
    use tally_core::CounterSpec;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

    #[tokio::test]
    async fn test_manual_scheduler_steps() {
        let mut scheduler = ManualScheduler::new(100, 16);
        assert_eq!(scheduler.next_frame().await, 100);
        assert_eq!(scheduler.next_frame().await, 116);
        assert_eq!(scheduler.peek(), 132);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_scheduler_is_monotonic() {
        let mut scheduler = IntervalScheduler::new(60);
        let mut last = scheduler.next_frame().await;
        for _ in 0..10 {
            let now = scheduler.next_frame().await;
            assert!(now >= last);
            last = now;
        }
        assert!(last >= 150);
    }

    #[tokio::test]
    async fn test_drive_until_settled() {
        let mut section = CounterSection::mount_static(
            SectionConfig::default(),
            Rect::new(0.0, 0.0, 1000.0, 400.0),
            vec![CounterSpec::new(1u64, "Years", 15)],
        );
        let mut scheduler = ManualScheduler::default();
        let mut redraws = 0;
        let report = drive_with(
            &mut section,
            &mut scheduler,
            |_| VIEWPORT,
            1_000,
            StopWhen::Idle,
            |_, _| {
                redraws += 1;
            },
        )
        .await;

        assert!(report.settled);
        assert_eq!(report.frames, redraws);
        assert!(report.last_frame_ms >= 2_000);
        assert_eq!(section.displayed(), vec![15]);
    }

    #[tokio::test]
    async fn test_drive_respects_budget() {
        let mut section = CounterSection::mount_static(
            SectionConfig::default(),
            Rect::new(0.0, 0.0, 1000.0, 400.0),
            vec![CounterSpec::new(1u64, "Years", 15)],
        );
        let report = drive(&mut section, &mut ManualScheduler::default(), |_| VIEWPORT, 10).await;
        assert_eq!(report.frames, 10);
        assert!(!report.settled);
    }

    fn stacked_pair() -> CounterSection {
        let config = SectionConfig {
            layout: SectionLayout::Vertical,
            item_height: 600.0,
            visibility_threshold: 0.5,
            ..SectionConfig::default()
        };
        let specs = vec![
            CounterSpec::new(1u64, "Above", 10).with_duration_ms(500),
            CounterSpec::new(2u64, "Below", 20).with_duration_ms(500),
        ];
        CounterSection::mount_static(config, Rect::new(0.0, 0.0, 1000.0, 2_000.0), specs)
    }

    fn scrolled_at(now: u64) -> Rect {
        if now < 4_000 {
            VIEWPORT
        } else {
            Rect::new(0.0, 700.0, 1280.0, 720.0)
        }
    }

    #[tokio::test]
    async fn test_idle_stop_leaves_offscreen_counter_untriggered() {
        let mut section = stacked_pair();
        let report = drive(&mut section, &mut ManualScheduler::default(), scrolled_at, 1_000).await;

        assert!(report.settled);
        assert!(report.last_frame_ms < 4_000);
        assert_eq!(report.untriggered, 1);
        assert_eq!(section.displayed(), vec![10, 0]);
        assert!(section.is_settled());
        assert!(!section.is_complete());
    }

    #[tokio::test]
    async fn test_all_counted_waits_for_scroll() {
        let mut section = stacked_pair();
        let report = drive_until(
            &mut section,
            &mut ManualScheduler::default(),
            scrolled_at,
            1_000,
            StopWhen::AllCounted,
        )
        .await;

        assert!(report.settled);
        assert!(report.last_frame_ms >= 4_000);
        assert_eq!(report.untriggered, 0);
        assert_eq!(section.displayed(), vec![10, 20]);
        assert!(section.is_complete());
    }
}
