use serde::Serialize;
use tessera_kinetics::{Clock, ManualClock, OverScroller, Scroller};

/// One sampled animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub time_ms: i64,
    pub x: i32,
    pub y: i32,
    pub velocity: f32,
    pub over_scrolled: bool,
}

#[derive(Debug, Serialize)]
pub struct Trace {
    pub frames: Vec<Frame>,
    /// Set when the frame limit was hit before the motion settled.
    pub truncated: bool,
}

impl Trace {
    pub fn elapsed_ms(&self) -> i64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.time_ms - first.time_ms,
            _ => 0,
        }
    }
}

/// A scroller that can be stepped frame by frame.
pub trait Engine {
    fn compute_scroll_offset(&mut self) -> bool;
    fn frame(&self, time_ms: i64) -> Frame;
}

impl Engine for OverScroller<ManualClock> {
    fn compute_scroll_offset(&mut self) -> bool {
        OverScroller::compute_scroll_offset(self)
    }

    fn frame(&self, time_ms: i64) -> Frame {
        Frame {
            time_ms,
            x: self.curr_x(),
            y: self.curr_y(),
            velocity: self.curr_velocity(),
            over_scrolled: self.is_over_scrolled(),
        }
    }
}

impl Engine for Scroller<ManualClock> {
    fn compute_scroll_offset(&mut self) -> bool {
        Scroller::compute_scroll_offset(self)
    }

    fn frame(&self, time_ms: i64) -> Frame {
        Frame {
            time_ms,
            x: self.curr_x(),
            y: self.curr_y(),
            velocity: self.curr_velocity(),
            over_scrolled: false,
        }
    }
}

/// Steps `engine` every `step_ms` until it settles or `max_frames` frames
/// have been recorded.
///
/// The first frame is the state right after the gesture started.
pub fn record(
    engine: &mut impl Engine,
    clock: &ManualClock,
    step_ms: i64,
    max_frames: usize,
) -> Trace {
    let mut frames = vec![engine.frame(clock.now_millis())];
    let mut truncated = false;

    loop {
        clock.advance(step_ms);
        if !engine.compute_scroll_offset() {
            break;
        }
        if frames.len() >= max_frames {
            truncated = true;
            break;
        }
        frames.push(engine.frame(clock.now_millis()));
    }

    Trace { frames, truncated }
}

#[cfg(test)]
mod tests {
    use tessera_kinetics::ScrollConfig;

    use super::*;

    #[test]
    fn test_spring_back_trace_settles_on_edge() {
        let clock = ManualClock::new();
        let mut scroller =
            OverScroller::with_config(ScrollConfig::default().density(1.0), clock.clone())
                .expect("valid config");
        scroller.spring_back(0, -60, 0, 0, 0, 500);

        let trace = record(&mut scroller, &clock, 16, 1_000);
        assert!(!trace.truncated);
        assert_eq!(trace.frames[0].y, -60);
        assert!(trace.frames.iter().any(|frame| frame.over_scrolled));
        assert_eq!(scroller.curr_y(), 0);
        assert!(trace.elapsed_ms() > 0);
    }

    #[test]
    fn test_frames_are_one_step_apart() {
        let clock = ManualClock::new();
        let mut scroller =
            OverScroller::with_config(ScrollConfig::default().density(1.0), clock.clone())
                .expect("valid config");
        scroller.start_scroll_with_duration(0, 0, 0, 200, 100);

        let trace = record(&mut scroller, &clock, 20, 1_000);
        let times: Vec<i64> = trace.frames.iter().map(|frame| frame.time_ms).collect();
        assert_eq!(times, vec![0, 20, 40, 60, 80, 100]);
        assert_eq!(trace.frames.last().map(|frame| frame.y), Some(200));
    }

    #[test]
    fn test_frame_limit_truncates() {
        let clock = ManualClock::new();
        let mut scroller =
            Scroller::with_config(ScrollConfig::default().density(1.0), clock.clone())
                .expect("valid config");
        scroller.fling(0, 0, 0.0, 5_000.0, 0, 0, 0, 100_000);

        let trace = record(&mut scroller, &clock, 16, 3);
        assert!(trace.truncated);
        assert_eq!(trace.frames.len(), 3);
    }

    #[test]
    fn test_finished_engine_yields_single_frame() {
        let clock = ManualClock::new();
        let mut scroller =
            OverScroller::with_config(ScrollConfig::default(), clock.clone()).expect("valid config");
        scroller.fling(12, 34, 0.0, 0.0, 0, 100, 0, 100);

        let trace = record(&mut scroller, &clock, 16, 100);
        assert_eq!(trace.frames.len(), 1);
        assert_eq!((trace.frames[0].x, trace.frames[0].y), (12, 34));
        assert_eq!(trace.elapsed_ms(), 0);
    }
}
