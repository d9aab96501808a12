use std::{num::NonZeroUsize, sync::Arc};

use rand::Rng;
use tokio::{sync::mpsc, time::Instant};
use tracing::{event, Level};

use super::{geometry, Choices, Frame, OptionSet, SpinJob};
use crate::sync;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RotationState {
    /// Accumulated rotation in radians. Only reduced modulo a full turn when
    /// read out.
    pub angle: f64,
    pub spinning: bool,
    pub winner_index: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub option: String,
}

/// Published to subscribers whenever something visible changes.
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
    Choices,
    SpinStarted,
    Rotated(f64),
    Winner(Selection),
}

struct ActiveSpin {
    job: SpinJob,
    /// Options as they were when the spin started.
    snapshot: OptionSet,
}

/// Selection state machine. `Idle` while `spin` is `None`, `Spinning`
/// otherwise.
pub struct Wheel {
    choices: Choices,
    rotation: RotationState,
    spin: Option<ActiveSpin>,
    observers: Vec<mpsc::UnboundedSender<Change>>,
    sync_tx: sync::RequestTx,
}

impl Wheel {
    pub fn new(sync_tx: sync::RequestTx) -> Self {
        Self {
            choices: Choices::default(),
            rotation: RotationState::default(),
            spin: None,
            observers: Vec::new(),
            sync_tx,
        }
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Change> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(tx);
        rx
    }

    fn publish(&mut self, change: Change) {
        self.observers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    pub fn choices(&self) -> &Choices {
        &self.choices
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.rotation.spinning
    }

    /// Replaces the options after a refresh. A running spin keeps resolving
    /// against its own snapshot.
    pub fn set_choices(&mut self, choices: Choices) {
        event!(Level::DEBUG, "replace choices: {} options", choices.len());
        self.choices = choices;
        self.rotation.winner_index = None;
        self.publish(Change::Choices);
    }

    /// Starts a spin. Returns `false` without touching any state when a spin
    /// is already running or there is nothing to spin.
    pub fn spin<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        if self.rotation.spinning || self.choices.is_empty() {
            event!(
                Level::DEBUG,
                "ignore spin: spinning={}, options={}",
                self.rotation.spinning,
                self.choices.len()
            );
            return false;
        }

        let job = SpinJob::new(self.rotation.angle, now, rng);
        event!(
            Level::INFO,
            "spin from {:.3} to {:.3}",
            self.rotation.angle,
            job.target_angle()
        );
        self.spin = Some(ActiveSpin {
            job,
            snapshot: self.choices.options().clone(),
        });
        self.rotation.spinning = true;
        self.rotation.winner_index = None;
        self.publish(Change::SpinStarted);
        true
    }

    /// Advances the running spin to `now`. Returns the selection on the frame
    /// that completes it.
    pub fn tick(&mut self, now: Instant) -> Option<Selection> {
        let frame = self.spin.as_ref()?.job.advance(now);
        self.rotation.angle = frame.angle();
        self.publish(Change::Rotated(frame.angle()));

        let Frame::Finished(final_angle) = frame else {
            return None;
        };
        let ActiveSpin { snapshot, .. } = self.spin.take()?;
        self.rotation.spinning = false;

        let count = NonZeroUsize::new(snapshot.len())?;
        let index = geometry::winner_index(final_angle, count);
        let selection = Selection {
            index,
            option: snapshot[index].clone(),
        };
        // The index refers to the snapshot. When a refresh replaced the
        // options mid-spin it would point at some other sector.
        self.rotation.winner_index =
            Arc::ptr_eq(&snapshot, self.choices.options()).then_some(index);
        event!(Level::INFO, "winner: {selection:?}");
        self.publish(Change::Winner(selection.clone()));

        if self
            .sync_tx
            .send(sync::Request::Remove(selection.option.clone()))
            .is_err()
        {
            event!(
                Level::WARN,
                "sync client is gone, {:?} stays in the store",
                selection.option
            );
        }

        Some(selection)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::wheel::SPIN_DURATION;

    fn wheel(options: &[&str]) -> (Wheel, mpsc::UnboundedReceiver<sync::Request>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut wheel = Wheel::new(tx);
        let options = options.iter().map(|s| s.to_string()).collect();
        wheel.set_choices(Choices::new(options, &mut StdRng::seed_from_u64(0)));
        (wheel, rx)
    }

    #[test]
    fn empty_wheel_does_not_spin() {
        let (mut wheel, _rx) = wheel(&[]);
        assert!(!wheel.spin(Instant::now(), &mut StdRng::seed_from_u64(0)));
        assert_eq!(&RotationState::default(), wheel.rotation());
        assert_eq!(None, wheel.tick(Instant::now()));
    }

    #[test]
    fn second_spin_is_ignored() {
        let (mut wheel, _rx) = wheel(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(1);
        let now = Instant::now();
        assert!(wheel.spin(now, &mut rng));
        let target = wheel.spin.as_ref().map(|s| s.job.target_angle());

        assert!(!wheel.spin(now + Duration::from_millis(10), &mut rng));
        assert_eq!(target, wheel.spin.as_ref().map(|s| s.job.target_angle()));
        assert!(wheel.is_spinning());
    }

    #[test]
    fn full_spin_selects_and_removes() {
        let (mut wheel, mut sync_rx) = wheel(&["A", "B", "C", "D"]);
        let mut changes = wheel.subscribe();
        let mut rng = StdRng::seed_from_u64(2);
        let start = Instant::now();

        assert!(wheel.spin(start, &mut rng));
        assert_eq!(Ok(Change::SpinStarted), changes.try_recv());

        let mut frames = 0;
        let mut last = 0.0;
        let mut ms = 0;
        let selection = loop {
            ms += 16;
            if let Some(selection) = wheel.tick(start + Duration::from_millis(ms)) {
                break selection;
            }
            assert!(wheel.rotation().angle >= last);
            last = wheel.rotation().angle;
            frames += 1;
        };
        assert!(frames > 200);
        assert!(ms >= SPIN_DURATION.as_millis() as u64);

        let angle = wheel.rotation().angle;
        let expected = geometry::winner_index(angle, NonZeroUsize::new(4).unwrap());
        assert_eq!(expected, selection.index);
        assert_eq!(["A", "B", "C", "D"][expected], selection.option);
        assert_eq!(Some(expected), wheel.rotation().winner_index);
        assert!(!wheel.is_spinning());

        let mut winner_published = false;
        while let Ok(change) = changes.try_recv() {
            if change == Change::Winner(selection.clone()) {
                winner_published = true;
            }
        }
        assert!(winner_published);

        match sync_rx.try_recv() {
            Ok(sync::Request::Remove(option)) => assert_eq!(selection.option, option),
            _ => panic!("expected a remove request"),
        }
    }

    #[test]
    fn single_option_runs_full_duration() {
        let (mut wheel, _rx) = wheel(&["only"]);
        let start = Instant::now();
        assert!(wheel.spin(start, &mut StdRng::seed_from_u64(5)));

        assert_eq!(None, wheel.tick(start + SPIN_DURATION - Duration::from_millis(1)));
        assert!(wheel.is_spinning());

        let selection = wheel.tick(start + SPIN_DURATION).unwrap();
        assert_eq!(0, selection.index);
        assert_eq!("only", selection.option);
    }

    #[test]
    fn refresh_during_spin_uses_snapshot() {
        let (mut wheel, _rx) = wheel(&["A", "B", "C"]);
        let start = Instant::now();
        assert!(wheel.spin(start, &mut StdRng::seed_from_u64(8)));

        wheel.set_choices(Choices::new(
            vec!["Z".into()],
            &mut StdRng::seed_from_u64(0),
        ));

        let selection = wheel.tick(start + SPIN_DURATION).unwrap();
        assert!(["A", "B", "C"].contains(&selection.option.as_str()));
    }

    #[test]
    fn no_highlight_on_replaced_options() {
        let (mut wheel, _rx) = wheel(&["A", "B", "C", "D"]);
        let start = Instant::now();
        assert!(wheel.spin(start, &mut StdRng::seed_from_u64(8)));

        let reversed = ["D", "C", "B", "A"].map(String::from).to_vec();
        wheel.set_choices(Choices::new(reversed, &mut StdRng::seed_from_u64(0)));

        let selection = wheel.tick(start + SPIN_DURATION).unwrap();
        assert_eq!(["A", "B", "C", "D"][selection.index], selection.option);
        assert_eq!(None, wheel.rotation().winner_index);
        assert!(!wheel.is_spinning());
    }

    #[test]
    fn winner_survives_closed_sync_channel() {
        let (mut wheel, rx) = wheel(&["A", "B"]);
        drop(rx);
        let mut changes = wheel.subscribe();
        let start = Instant::now();
        assert!(wheel.spin(start, &mut StdRng::seed_from_u64(4)));

        let selection = wheel.tick(start + SPIN_DURATION).unwrap();
        assert_eq!(Some(selection.index), wheel.rotation().winner_index);
        let last = std::iter::from_fn(|| changes.try_recv().ok()).last();
        assert_eq!(Some(Change::Winner(selection)), last);
    }

    #[test]
    fn angle_accumulates_across_spins() {
        let (mut wheel, _rx) = wheel(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(6);
        let start = Instant::now();
        wheel.spin(start, &mut rng);
        wheel.tick(start + SPIN_DURATION);
        let first = wheel.rotation().angle;

        let again = start + SPIN_DURATION * 2;
        assert!(wheel.spin(again, &mut rng));
        wheel.tick(again + SPIN_DURATION);
        assert!(wheel.rotation().angle > first + 5.0 * std::f64::consts::TAU - 1e-9);
    }
}
