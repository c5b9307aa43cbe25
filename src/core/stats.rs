//! Rolling frame-rate counter

use std::collections::VecDeque;

/// Frames per second over the last `window` frame timestamps (milliseconds)
pub struct FpsCounter {
    frames: VecDeque<f64>,
    window: usize,
}

impl FpsCounter {
    pub fn new(window: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(window + 1),
            window: window.max(2),
        }
    }

    pub fn tick(&mut self, now_ms: f64) {
        self.frames.push_back(now_ms);
        if self.frames.len() > self.window {
            self.frames.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / (elapsed / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_sample_report_zero() {
        let mut fps = FpsCounter::new(60);
        assert_eq!(fps.fps(), 0.0);
        fps.tick(16.0);
        assert_eq!(fps.fps(), 0.0);
    }

    #[test]
    fn steady_sixty_hz() {
        let mut fps = FpsCounter::new(60);
        for i in 0..120 {
            fps.tick(i as f64 * 1000.0 / 60.0);
        }
        assert!((fps.fps() - 60.0).abs() < 1e-6);
    }

    #[test]
    fn window_forgets_old_frames() {
        let mut fps = FpsCounter::new(4);
        // Slow start, then 100 fps
        for t in [0.0, 1000.0, 2000.0, 2010.0, 2020.0, 2030.0, 2040.0] {
            fps.tick(t);
        }
        assert!((fps.fps() - 100.0).abs() < 1e-6);
    }
}
