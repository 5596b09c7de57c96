use std::collections::VecDeque;
use vitals_core::Stats;

/// How a [`ScrollBuffer`] advances on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Periodic table replayed forever: the head sample moves to the tail.
    Rotating,
    /// Growing-then-capped window: append a fresh sample, evict the oldest.
    Fifo,
}

/// Fixed-capacity history window of samples, oldest first.
#[derive(Debug, Clone)]
pub struct ScrollBuffer {
    samples:  VecDeque<f32>,
    capacity: usize,
    mode:     ScrollMode,
}

impl ScrollBuffer {
    pub fn new(mode: ScrollMode, capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            mode,
        }
    }

    pub fn rotating(capacity: usize) -> Self {
        Self::new(ScrollMode::Rotating, capacity)
    }

    pub fn fifo(capacity: usize) -> Self {
        Self::new(ScrollMode::Fifo, capacity)
    }

    /// Replace the contents with `initial`, keeping only the newest
    /// `capacity` samples.  A short rotating seed is left-padded with its
    /// first sample; FIFO buffers are never padded and grow from there.
    pub fn seed(&mut self, initial: impl IntoIterator<Item = f32>) {
        let mut samples: VecDeque<f32> = initial.into_iter().collect();
        while samples.len() > self.capacity {
            samples.pop_front();
        }

        if self.mode == ScrollMode::Rotating {
            if let Some(&first) = samples.front() {
                while samples.len() < self.capacity {
                    samples.push_front(first);
                }
            }
        }

        self.samples = samples;
    }

    /// Advance by one sample and return the new current value.
    ///
    /// `next` is only invoked for FIFO buffers; a rotating buffer replays the
    /// sample it is about to drop.  Returns `None` only for an empty rotating
    /// buffer.
    pub fn tick(&mut self, next: impl FnOnce() -> f32) -> Option<f32> {
        match self.mode {
            ScrollMode::Rotating => self.rotate(),
            ScrollMode::Fifo => Some(self.push(next())),
        }
    }

    /// Move the oldest sample to the tail.
    pub fn rotate(&mut self) -> Option<f32> {
        let head = self.samples.pop_front()?;
        self.samples.push_back(head);
        Some(head)
    }

    /// Append a sample, evicting the oldest if over capacity.
    pub fn push(&mut self, value: f32) -> f32 {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        value
    }

    /// Current, min and max by a full scan of the window.
    pub fn stats(&self) -> Option<Stats> {
        let current = *self.samples.back()?;
        let (min, max) = self
            .samples
            .iter()
            .fold((current, current), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(Stats { current, min, max })
    }

    /// Samples, oldest → newest.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.samples().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(values: &[f32]) -> (f32, f32) {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for &v in values {
            if v < lo {
                lo = v;
            }
            if v > hi {
                hi = v;
            }
        }
        (lo, hi)
    }

    #[test]
    fn seed_truncates_to_newest() {
        let mut buf = ScrollBuffer::fifo(3);
        buf.seed([1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(buf.to_vec(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn rotating_seed_left_pads_with_first_sample() {
        let mut buf = ScrollBuffer::rotating(5);
        buf.seed([7.0, 8.0]);
        assert_eq!(buf.to_vec(), vec![7.0, 7.0, 7.0, 7.0, 8.0]);
    }

    #[test]
    fn fifo_grows_then_caps() {
        let mut buf = ScrollBuffer::fifo(3);
        buf.seed([1.0]);
        assert_eq!(buf.len(), 1);

        let mut n = 1.0;
        for expected_len in [2, 3, 3, 3] {
            n += 1.0;
            assert_eq!(buf.tick(|| n), Some(n));
            assert_eq!(buf.len(), expected_len);
        }
        assert_eq!(buf.to_vec(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn rotating_tick_never_calls_generator() {
        let mut buf = ScrollBuffer::rotating(3);
        buf.seed([1.0, 2.0, 3.0]);
        let current = buf.tick(|| panic!("rotating buffers replay their own samples"));
        assert_eq!(current, Some(1.0));
        assert_eq!(buf.to_vec(), vec![2.0, 3.0, 1.0]);
        assert_eq!(buf.len(), buf.capacity());
    }

    #[test]
    fn full_rotation_restores_seed() {
        let seed: Vec<f32> = (0..17).map(|i| (i * i) as f32 % 11.0).collect();
        let mut buf = ScrollBuffer::rotating(seed.len());
        buf.seed(seed.iter().copied());

        for _ in 0..buf.capacity() {
            buf.rotate();
        }
        assert_eq!(buf.to_vec(), seed);
    }

    #[test]
    fn stats_match_independent_scan() {
        let mut buf = ScrollBuffer::fifo(8);
        let values = [4.0, -2.5, 9.0, 3.0, 3.0, 0.5, 8.75, 1.0, 6.0, -1.0, 2.0];
        for v in values {
            buf.push(v);
            let stats = buf.stats().unwrap();
            let window = buf.to_vec();
            let (lo, hi) = scan(&window);

            assert_eq!(stats.current, *window.last().unwrap());
            assert_eq!((stats.min, stats.max), (lo, hi));
            assert!(stats.min <= stats.current && stats.current <= stats.max);
        }
    }

    #[test]
    fn empty_buffer_has_no_stats() {
        let mut buf = ScrollBuffer::rotating(4);
        assert!(buf.stats().is_none());
        assert_eq!(buf.tick(|| 1.0), None);
        assert!(buf.is_empty());
    }
}
