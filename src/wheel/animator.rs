use std::{f64::consts::TAU, ops::Range, time::Duration};

use rand::Rng;
use tokio::time::Instant;

pub const SPIN_DURATION: Duration = Duration::from_millis(4000);
/// Full turns added by one spin, drawn uniformly.
pub const TURNS: Range<f64> = 5.0..10.0;

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t + 1.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Frame {
    Moving(f64),
    Finished(f64),
}

impl Frame {
    pub fn angle(&self) -> f64 {
        match *self {
            Frame::Moving(angle) | Frame::Finished(angle) => angle,
        }
    }
}

/// One running animation from `start_angle` to `target_angle`.
#[derive(Clone, Debug)]
pub struct SpinJob {
    start_angle: f64,
    target_angle: f64,
    start_time: Instant,
    duration: Duration,
}

impl SpinJob {
    pub fn new<R: Rng + ?Sized>(start_angle: f64, start_time: Instant, rng: &mut R) -> Self {
        let turns = rng.gen_range(TURNS);
        Self {
            start_angle,
            target_angle: start_angle + turns * TAU,
            start_time,
            duration: SPIN_DURATION,
        }
    }

    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn advance(&self, now: Instant) -> Frame {
        let t = self.progress(now);
        if t >= 1.0 {
            return Frame::Finished(self.target_angle);
        }
        let eased = ease_out_cubic(t);
        Frame::Moving(self.start_angle + eased * (self.target_angle - self.start_angle))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    use super::*;

    #[test]
    fn easing_bounds() {
        assert_eq!(0.0, ease_out_cubic(0.0));
        assert_eq!(1.0, ease_out_cubic(1.0));
        assert_eq!(0.0, ease_out_cubic(-3.0));
        assert_eq!(1.0, ease_out_cubic(2.0));
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = ease_out_cubic(0.0);
        for step in 1..=1000 {
            let eased = ease_out_cubic(step as f64 / 1000.0);
            assert!(eased >= last);
            last = eased;
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(3.5)]
    #[case(-12.0)]
    fn target_turns(#[case] start: f64) {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let job = SpinJob::new(start, Instant::now(), &mut rng);
            let turns = (job.target_angle() - start) / TAU;
            assert!(TURNS.start <= turns && turns < TURNS.end + 1e-9);
        }
    }

    #[test]
    fn angles_increase_until_target() {
        let start = Instant::now();
        let job = SpinJob::new(1.0, start, &mut StdRng::seed_from_u64(3));

        assert_eq!(Frame::Moving(1.0), job.advance(start));

        let mut last = 1.0;
        for ms in (16..4000).step_by(16) {
            let frame = job.advance(start + Duration::from_millis(ms));
            let Frame::Moving(angle) = frame else {
                panic!("finished early at {ms}ms");
            };
            assert!(angle >= last);
            assert!(angle < job.target_angle());
            last = angle;
        }

        assert_eq!(
            Frame::Finished(job.target_angle()),
            job.advance(start + SPIN_DURATION)
        );
        assert_eq!(
            Frame::Finished(job.target_angle()),
            job.advance(start + SPIN_DURATION * 2)
        );
    }
}
