use std::{f64::consts::TAU, num::NonZeroUsize};

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Painter, Shape},
        *,
    },
};

use crate::wheel::{
    geometry::{self, Sector},
    Choices, RotationState,
};

const POINTER: &str = "▼";
/// Distance of label centers from the hub, as a fraction of the radius.
const LABEL_RADIUS: f64 = 0.6;

/// The wheel as drawn for one frame.
#[derive(Clone, Debug, Default)]
pub struct Dial {
    sectors: Vec<Sector>,
    angle: f64,
}

impl Dial {
    pub fn new(choices: &Choices, rotation: &RotationState) -> Self {
        Self {
            sectors: geometry::sectors(choices, rotation.winner_index),
            angle: rotation.angle,
        }
    }

    fn colors(&self) -> Vec<Color> {
        self.sectors
            .iter()
            .map(|s| {
                if s.highlighted {
                    s.color.highlighted()
                } else {
                    s.color.to_terminal()
                }
            })
            .collect()
    }
}

/// Fills the unit disc, coloring each pixel by the sector under it.
struct Disc<'a> {
    colors: &'a [Color],
    angle: f64,
    columns: u16,
    rows: u16,
}

impl Shape for Disc<'_> {
    fn draw(&self, painter: &mut Painter) {
        let Some(count) = NonZeroUsize::new(self.colors.len()) else {
            return;
        };
        let (dx, dy) = (2.0 / self.columns as f64, 2.0 / self.rows as f64);
        for row in 0..self.rows {
            let y = 1.0 - (row as f64 + 0.5) * dy;
            for column in 0..self.columns {
                let x = -1.0 + (column as f64 + 0.5) * dx;
                if x * x + y * y > 1.0 {
                    continue;
                }
                let screen_angle = x.atan2(y).rem_euclid(TAU);
                let sector = geometry::sector_at(screen_angle, self.angle, count);
                if let Some((px, py)) = painter.get_point(x, y) {
                    painter.paint(px, py, self.colors[sector]);
                }
            }
        }
    }
}

impl WidgetRef for Dial {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 4 {
            return;
        }
        // A half-block pixel is about as wide as it is tall, so a round
        // wheel needs twice as many columns as rows.
        let diameter = area.width.min((area.height - 1) * 2) & !1;
        let [_, area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(diameter),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [pointer_area, wheel_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(diameter / 2),
            Constraint::Fill(1),
        ])
        .areas(area);

        Paragraph::new(POINTER.bold())
            .alignment(Alignment::Center)
            .render(pointer_area, buf);

        if self.sectors.is_empty() {
            Paragraph::new("no options yet".dim())
                .alignment(Alignment::Center)
                .render(wheel_area, buf);
            return;
        }

        let colors = self.colors();
        let disc = Disc {
            colors: &colors,
            angle: self.angle,
            columns: wheel_area.width,
            rows: wheel_area.height * 2,
        };
        let column_width = 2.0 / wheel_area.width as f64;
        let max_label = (diameter / 3) as usize;

        Canvas::default()
            .marker(Marker::HalfBlock)
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0])
            .paint(|ctx| {
                ctx.draw(&disc);
                ctx.layer();
                for (sector, color) in self.sectors.iter().zip(&colors) {
                    let label = geometry::truncate_label(&sector.label, max_label);
                    let screen_angle = sector.middle() + self.angle;
                    let (x, y) = (
                        LABEL_RADIUS * screen_angle.sin(),
                        LABEL_RADIUS * screen_angle.cos(),
                    );
                    let half = geometry::width(&label) as f64 * column_width / 2.0;
                    ctx.print(
                        x - half,
                        y,
                        Line::styled(label.into_owned(), Style::new().fg(Color::Black).bg(*color)),
                    );
                }
            })
            .render(wheel_area, buf);
    }
}
