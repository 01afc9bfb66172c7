//! Rolling frame time average

use std::collections::VecDeque;

/// Number of frames averaged
const WINDOW: usize = 100;

/// Rolling average over the most recent frame times
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frame_times: VecDeque<f32>,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(WINDOW),
        }
    }

    /// Records one frame duration in seconds; non-positive samples are ignored
    pub fn push(&mut self, frame_time: f32) {
        if frame_time <= 0.0 {
            return;
        }
        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > WINDOW {
            self.frame_times.pop_front();
        }
    }

    /// Average frames per second, 0 without samples
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg_frame_time: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// Average milliseconds per frame, 0 without samples
    pub fn ms_per_frame(&self) -> f32 {
        let fps = self.fps();
        if fps > 0.0 { 1000.0 / fps } else { 0.0 }
    }

    /// Most recent frame time in seconds
    pub fn last(&self) -> Option<f32> {
        self.frame_times.back().copied()
    }

    pub fn len(&self) -> usize {
        self.frame_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = FrameStats::new();
        assert_eq!(stats.fps(), 0.0);
        assert_eq!(stats.ms_per_frame(), 0.0);
        assert_eq!(stats.last(), None);
    }

    #[test]
    fn test_average_fps() {
        let mut stats = FrameStats::new();
        stats.push(0.01);
        stats.push(0.03);
        assert!((stats.fps() - 50.0).abs() < 0.01);
        assert!((stats.ms_per_frame() - 20.0).abs() < 0.01);
        assert_eq!(stats.last(), Some(0.03));
    }

    #[test]
    fn test_window_is_bounded() {
        let mut stats = FrameStats::new();
        for _ in 0..250 {
            stats.push(0.5);
        }
        stats.push(0.25);
        assert_eq!(stats.len(), WINDOW);
        assert_eq!(stats.last(), Some(0.25));
    }

    #[test]
    fn test_zero_delta_is_ignored() {
        let mut stats = FrameStats::new();
        stats.push(0.0);
        assert!(stats.is_empty());
    }
}
