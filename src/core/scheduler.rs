use std::time::Duration;

use log::trace;

use crate::core::clock::SystemClock;
use crate::error::Result;
use crate::math::place;
use crate::traits::{Clock, DrawSink};
use crate::types::{CanvasBounds, ImageDescriptor, Placement};

/// Resumable position within the current pass over the image
///
/// Starts with nothing left in the pass, so the first burst picks a placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawProgress {
    cursor: usize,
    remaining_in_pass: usize,
    placement: Placement,
    passes_started: u64,
}

impl DrawProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next pixel to draw
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pixels left before the current placement is exhausted
    pub fn remaining_in_pass(&self) -> usize {
        self.remaining_in_pass
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Number of placements generated so far
    pub fn passes_started(&self) -> u64 {
        self.passes_started
    }
}

/// Outcome of a single burst
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BurstReport {
    /// Quota spent, on-canvas or not
    pub consumed: u64,
    /// `PX` commands emitted
    pub drawn: u64,
    /// Pixels that fell off the canvas
    pub skipped: u64,
    /// Placements generated during this burst
    pub placements: u64,
    pub elapsed: Duration,
}

/// Streams image pixels into time- and quota-bounded bursts
pub struct DrawScheduler<C = SystemClock> {
    image: ImageDescriptor,
    canvas: CanvasBounds,
    rng: fastrand::Rng,
    clock: C,
}

impl DrawScheduler<SystemClock> {
    pub fn new(image: ImageDescriptor, canvas: CanvasBounds, rng: fastrand::Rng) -> Self {
        Self::with_clock(image, canvas, rng, SystemClock::new())
    }
}

impl<C: Clock> DrawScheduler<C> {
    pub fn with_clock(
        image: ImageDescriptor,
        canvas: CanvasBounds,
        rng: fastrand::Rng,
        clock: C,
    ) -> Self {
        Self {
            image,
            canvas,
            rng,
            clock,
        }
    }

    /// Draw pixels until `quota` is spent or `usable_ms` has elapsed, then
    /// signal completion exactly once
    ///
    /// Elapsed time is polled after every pixel without sleeping. A pass that
    /// finishes mid-burst moves the image and carries on within the same burst.
    pub fn burst<S: DrawSink>(
        &mut self,
        progress: &mut DrawProgress,
        quota: u64,
        usable_ms: u64,
        sink: &mut S,
    ) -> Result<BurstReport> {
        let mut report = BurstReport::default();

        if self.image.is_empty() {
            sink.finish_burst()?;
            return Ok(report);
        }

        if progress.remaining_in_pass == 0 {
            self.start_pass(progress);
            report.placements += 1;
        }

        let usable = Duration::from_millis(usable_ms);
        let mut quota = quota;

        self.clock.restart();
        let mut elapsed = self.clock.elapsed();

        while quota > 0 && elapsed < usable {
            let pixel = self.image.pixels()[progress.cursor];
            let (x, y) = progress.placement.locate(&pixel);

            if self.canvas.contains(x, y) {
                sink.draw(x, y, pixel.color)?;
                report.drawn += 1;
            } else {
                report.skipped += 1;
            }

            progress.cursor += 1;
            progress.remaining_in_pass -= 1;
            quota -= 1;
            report.consumed += 1;

            elapsed = self.clock.elapsed();

            if progress.remaining_in_pass == 0 {
                self.start_pass(progress);
                report.placements += 1;
            }
        }

        report.elapsed = elapsed;
        sink.finish_burst()?;

        Ok(report)
    }

    fn start_pass(&mut self, progress: &mut DrawProgress) {
        progress.placement = place(
            self.canvas,
            self.image.width(),
            self.image.height(),
            &mut self.rng,
        );
        progress.cursor = 0;
        progress.remaining_in_pass = self.image.pixel_count();
        progress.passes_started += 1;

        trace!(
            "Pass {} at ({}, {})",
            progress.passes_started,
            progress.placement.x,
            progress.placement.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::SteppingClock;
    use crate::math::Rgb;
    use crate::protocol::Command;

    fn gradient(width: u32, height: u32) -> ImageDescriptor {
        let colors: Vec<Rgb> = (0..width * height)
            .map(|i| Rgb::new(i as u8, 0, 0))
            .collect();
        ImageDescriptor::from_colors(width, height, &colors).unwrap()
    }

    fn scheduler(image: ImageDescriptor, canvas: CanvasBounds) -> DrawScheduler<SteppingClock> {
        DrawScheduler::with_clock(
            image,
            canvas,
            fastrand::Rng::with_seed(3),
            SteppingClock::frozen(),
        )
    }

    fn done_count(commands: &[Command]) -> usize {
        commands.iter().filter(|c| **c == Command::Done).count()
    }

    #[test]
    fn first_burst_places_image() {
        let mut scheduler = scheduler(gradient(4, 4), CanvasBounds::new(10, 10));
        let mut progress = DrawProgress::new();
        let mut sink: Vec<Command> = Vec::new();

        let report = scheduler.burst(&mut progress, 5, 100, &mut sink).unwrap();

        assert_eq!(report.placements, 1);
        assert_eq!(progress.passes_started(), 1);
        assert_eq!(progress.cursor(), 5);
        assert_eq!(progress.remaining_in_pass(), 11);
        assert_eq!(report.drawn, 5);
        assert_eq!(done_count(&sink), 1);
    }

    #[test]
    fn progress_resumes_across_bursts() {
        let mut scheduler = scheduler(gradient(3, 3), CanvasBounds::new(50, 50));
        let mut progress = DrawProgress::new();
        let mut sink: Vec<Command> = Vec::new();

        scheduler.burst(&mut progress, 4, 100, &mut sink).unwrap();
        let placement = progress.placement();
        scheduler.burst(&mut progress, 4, 100, &mut sink).unwrap();

        assert_eq!(progress.placement(), placement);
        assert_eq!(progress.cursor(), 8);
        assert_eq!(progress.remaining_in_pass(), 1);

        let colors: Vec<u8> = sink
            .iter()
            .filter_map(|c| match c {
                Command::Pixel { color, .. } => Some(color.r),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn zero_quota_still_finishes() {
        let mut scheduler = scheduler(gradient(2, 2), CanvasBounds::new(10, 10));
        let mut progress = DrawProgress::new();
        let mut sink: Vec<Command> = Vec::new();

        let report = scheduler.burst(&mut progress, 0, 100, &mut sink).unwrap();

        assert_eq!(report.consumed, 0);
        assert_eq!(sink, vec![Command::Done]);
    }

    #[test]
    fn empty_image_only_finishes() {
        let empty = ImageDescriptor::from_colors(0, 0, &[]).unwrap();
        let mut scheduler = scheduler(empty, CanvasBounds::new(10, 10));
        let mut progress = DrawProgress::new();
        let mut sink: Vec<Command> = Vec::new();

        let report = scheduler.burst(&mut progress, 1000, 1000, &mut sink).unwrap();

        assert_eq!(report, BurstReport::default());
        assert_eq!(progress.passes_started(), 0);
        assert_eq!(sink, vec![Command::Done]);
    }

    #[test]
    fn time_budget_bounds_burst() {
        let mut scheduler = DrawScheduler::with_clock(
            gradient(10, 10),
            CanvasBounds::new(100, 100),
            fastrand::Rng::with_seed(3),
            SteppingClock::new(Duration::from_millis(1)),
        );
        let mut progress = DrawProgress::new();
        let mut sink: Vec<Command> = Vec::new();

        let report = scheduler.burst(&mut progress, 1000, 10, &mut sink).unwrap();

        // reads at 0..=9ms pass the check, the read at 10ms stops the loop
        assert_eq!(report.consumed, 10);
        assert_eq!(report.elapsed, Duration::from_millis(10));
        assert_eq!(done_count(&sink), 1);
    }
}
