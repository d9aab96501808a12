//! The spinning wheel: colors, geometry, animation and the selection state
//! machine.

mod animator;
mod color;
mod engine;
pub mod geometry;

use std::sync::Arc;

use rand::Rng;

pub use animator::{ease_out_cubic, Frame, SpinJob, SPIN_DURATION};
pub use color::{generate_colors, Color, ColorSet};
pub use engine::{Change, RotationState, Selection, Wheel};

pub type OptionSet = Arc<[String]>;

/// Shown when the option store cannot be reached.
pub const PLACEHOLDER_OPTIONS: [&str; 3] = ["Option A", "Option B", "Option C"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Source {
    #[default]
    Store,
    Placeholder,
}

/// Options paired with their colors. Both sequences always have the same
/// length.
#[derive(Clone, Debug)]
pub struct Choices {
    options: OptionSet,
    colors: ColorSet,
    source: Source,
}

impl Default for Choices {
    fn default() -> Self {
        Self {
            options: Arc::from(Vec::new()),
            colors: Arc::from(Vec::new()),
            source: Source::Store,
        }
    }
}

impl Choices {
    pub fn new<R: Rng + ?Sized>(options: Vec<String>, rng: &mut R) -> Self {
        let colors = generate_colors(options.len(), rng);
        Self {
            options: options.into(),
            colors,
            source: Source::Store,
        }
    }

    pub fn placeholder<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let options = PLACEHOLDER_OPTIONS.map(String::from).to_vec();
        Self {
            source: Source::Placeholder,
            ..Self::new(options, rng)
        }
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn colors(&self) -> &ColorSet {
        &self.colors
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Color)> {
        self.options.iter().zip(self.colors.iter())
    }
}
