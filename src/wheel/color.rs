use std::{fmt, sync::Arc};

use palette::{FromColor, Hsl, Lighten, Srgb};
use rand::Rng;

pub type ColorSet = Arc<[Color]>;

const SATURATION: f32 = 0.7;
const LIGHTNESS: f32 = 0.6;
const HIGHLIGHT: f32 = 0.25;
/// Rejection sampling gives up after this many draws per requested color.
const ATTEMPTS_PER_COLOR: usize = 32;

/// A sector color. Saturation and lightness are fixed, so two colors are
/// identical exactly when their hues are.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    hue: f32,
}

impl Color {
    pub fn new(hue: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
        }
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    fn hsl(&self) -> Hsl {
        Hsl::new(self.hue, SATURATION, LIGHTNESS)
    }

    pub fn to_terminal(&self) -> ratatui::style::Color {
        rgb(self.hsl())
    }

    /// The lighter variant used to mark the winning sector.
    pub fn highlighted(&self) -> ratatui::style::Color {
        rgb(self.hsl().lighten(HIGHLIGHT))
    }
}

fn rgb(hsl: Hsl) -> ratatui::style::Color {
    let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsl).into_format();
    ratatui::style::Color::Rgb(rgb.red, rgb.green, rgb.blue)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue,
            (SATURATION * 100.0).round(),
            (LIGHTNESS * 100.0).round()
        )
    }
}

/// Returns `count` pairwise distinct colors.
///
/// Hues are drawn at whole-degree resolution and redrawn on collision. When
/// the draw budget runs out (or there are more colors than whole degrees),
/// the rest comes from an even subdivision of the hue circle.
pub fn generate_colors<R: Rng + ?Sized>(count: usize, rng: &mut R) -> ColorSet {
    let mut hues: Vec<f32> = Vec::with_capacity(count);
    let mut attempts = 0;
    while hues.len() < count && attempts < count * ATTEMPTS_PER_COLOR {
        attempts += 1;
        let hue = rng.gen_range(0..360) as f32;
        if !hues.contains(&hue) {
            hues.push(hue);
        }
    }

    if hues.len() < count {
        tracing::debug!(
            "hue sampling exhausted after {attempts} draws, subdividing for {} colors",
            count - hues.len()
        );
        fill_by_subdivision(&mut hues, count);
    }

    hues.into_iter().map(Color::new).collect()
}

// `count` evenly spaced hues collide with at most `hues.len()` existing ones,
// which always leaves enough free slots.
fn fill_by_subdivision(hues: &mut Vec<f32>, count: usize) {
    let step = 360.0 / count as f64;
    for i in 0..count {
        if hues.len() == count {
            break;
        }
        let hue = (i as f64 * step) as f32;
        if !hues.contains(&hue) {
            hues.push(hue);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    use super::*;

    fn assert_distinct(colors: &[Color]) {
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    #[case(42)]
    #[case(360)]
    #[case(1000)]
    fn distinct_colors(#[case] count: usize) {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = generate_colors(count, &mut rng);
        assert_eq!(count, colors.len());
        assert_distinct(&colors);
    }

    #[test]
    fn same_seed_same_colors() {
        let a = generate_colors(5, &mut StdRng::seed_from_u64(1));
        let b = generate_colors(5, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn subdivision_skips_taken_hues() {
        let mut hues = vec![0.0, 90.0];
        fill_by_subdivision(&mut hues, 4);
        assert_eq!(vec![0.0, 90.0, 180.0, 270.0], hues);
    }

    #[test]
    fn css_format() {
        assert_eq!("hsl(120, 70%, 60%)", Color::new(120.0).to_string());
        assert_eq!("hsl(10, 70%, 60%)", Color::new(370.0).to_string());
    }

    #[test]
    fn terminal_rgb() {
        let ratatui::style::Color::Rgb(r, g, b) = Color::new(0.0).to_terminal() else {
            panic!("expected an rgb color");
        };
        assert!(r > g);
        assert_eq!(g, b);
        assert_ne!(Color::new(0.0).to_terminal(), Color::new(0.0).highlighted());
    }
}
