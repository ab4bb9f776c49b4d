use std::time::Instant;

/// Average of the last `N` samples.
#[derive(Debug, Clone)]
pub struct RollingAverage<const N: usize> {
    samples: [f32; N],
    count: usize,
    next: usize,
}

impl<const N: usize> Default for RollingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RollingAverage<N> {
    pub fn new() -> Self {
        Self {
            samples: [0.0; N],
            count: 0,
            next: 0,
        }
    }

    pub fn push(&mut self, sample: f32) {
        if N == 0 {
            return;
        }
        self.samples[self.next] = sample;
        self.next = (self.next + 1) % N;
        self.count = (self.count + 1).min(N);
    }

    /// Zero before any sample has been pushed.
    pub fn get(&self) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        self.samples[..self.count].iter().sum::<f32>() / self.count as f32
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.samples = [0.0; N];
        self.count = 0;
        self.next = 0;
    }
}

pub fn clamp_delta(frame_time: f32, max_delta: f32) -> f32 {
    if frame_time > max_delta {
        max_delta
    } else {
        frame_time.max(0.0)
    }
}

/// Wall-clock frame timer producing clamped simulation deltas.
#[derive(Debug)]
pub struct FrameTimer {
    last: Instant,
    max_delta: f32,
    frame_time: f32,
    smoothed: RollingAverage<30>,
}

impl FrameTimer {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last: Instant::now(),
            max_delta,
            frame_time: max_delta,
            smoothed: RollingAverage::new(),
        }
    }

    /// Records a frame and returns the delta to simulate.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.frame_time = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.smoothed.push(self.frame_time);
        clamp_delta(self.frame_time, self.max_delta)
    }

    /// Unclamped duration of the last frame, in seconds.
    pub fn frame_time(&self) -> f32 {
        self.frame_time
    }

    pub fn smoothed_frame_time(&self) -> f32 {
        self.smoothed.get()
    }

    pub fn fps(&self) -> f32 {
        let t = self.smoothed.get();
        if t > 0.0 { 1.0 / t } else { 0.0 }
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }
}
