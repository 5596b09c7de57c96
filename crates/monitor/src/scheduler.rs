use std::time::{Duration, Instant};
use tracing::warn;
use vitals_core::SignalKind;

/// Upper bound on ticks replayed for one signal in a single poll.  Beyond
/// this (e.g. after a system suspend) the backlog is dropped.
pub const MAX_CATCH_UP: u32 = 1_000;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct Timer {
    kind:     SignalKind,
    interval: Duration,
    next_due: Instant,
}

/// Fixed-interval tick timers, one per signal.
///
/// The scheduler never sleeps; the caller waits for [`Scheduler::next_deadline`]
/// and then asks which ticks are due.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) `kind` to tick every `interval`, first at
    /// `now + interval`.
    pub fn add(&mut self, kind: SignalKind, interval: Duration, now: Instant) {
        let interval = interval.max(MIN_INTERVAL);
        self.remove(kind);
        self.timers.push(Timer {
            kind,
            interval,
            next_due: now + interval,
        });
    }

    pub fn remove(&mut self, kind: SignalKind) {
        self.timers.retain(|t| t.kind != kind);
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest instant at which any timer is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.next_due).min()
    }

    /// Every tick due at or before `now`, in due-time order.
    ///
    /// A signal that fell behind gets one entry per missed interval so its
    /// buffer advances by exactly as many samples as wall time allows.
    pub fn poll(&mut self, now: Instant) -> Vec<SignalKind> {
        let mut due = Vec::new();

        for timer in &mut self.timers {
            let mut fired = 0u32;
            while timer.next_due <= now {
                if fired == MAX_CATCH_UP {
                    let behind = now.saturating_duration_since(timer.next_due);
                    warn!("{}: {behind:?} behind schedule; skipping backlog", timer.kind);
                    timer.next_due = now + timer.interval;
                    break;
                }
                due.push((timer.next_due, timer.kind));
                timer.next_due += timer.interval;
                fired += 1;
            }
        }

        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, kind)| kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_due_before_first_interval() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.add(SignalKind::Respiratory, ms(50), t0);

        assert_eq!(s.next_deadline(), Some(t0 + ms(50)));
        assert!(s.poll(t0 + ms(49)).is_empty());
        assert_eq!(s.poll(t0 + ms(50)), vec![SignalKind::Respiratory]);
        assert_eq!(s.next_deadline(), Some(t0 + ms(100)));
    }

    #[test]
    fn interleaves_signals_by_due_time() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.add(SignalKind::HeartRate, ms(600), t0);
        s.add(SignalKind::Capnograph, ms(200), t0);

        let ticks = s.poll(t0 + ms(600));
        assert_eq!(ticks.iter().filter(|k| **k == SignalKind::Capnograph).count(), 3);
        assert_eq!(ticks.iter().filter(|k| **k == SignalKind::HeartRate).count(), 1);
        assert_eq!(ticks[0], SignalKind::Capnograph);
        assert_eq!(s.next_deadline(), Some(t0 + ms(800)));
    }

    #[test]
    fn catches_up_missed_ticks() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.add(SignalKind::Pulse, ms(150), t0);

        assert_eq!(s.poll(t0 + ms(1_000)).len(), 6);
        assert_eq!(s.next_deadline(), Some(t0 + ms(1_050)));
    }

    #[test]
    fn long_stall_drops_backlog() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.add(SignalKind::Respiratory, ms(1), t0);

        let now = t0 + Duration::from_secs(60);
        assert_eq!(s.poll(now).len(), MAX_CATCH_UP as usize);
        assert_eq!(s.next_deadline(), Some(now + ms(1)));
    }

    #[test]
    fn re_adding_replaces_timer() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.add(SignalKind::Pulse, ms(150), t0);
        s.add(SignalKind::Pulse, ms(75), t0);

        assert_eq!(s.len(), 1);
        assert_eq!(s.poll(t0 + ms(150)), vec![SignalKind::Pulse, SignalKind::Pulse]);
    }
}
