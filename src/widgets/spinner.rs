use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::{prelude::*, widgets::*};

const DOT: &str = "•";
const N: usize = 5;
const STEP_MS: u128 = 250;

/// A row of dots with one bold dot walking across it, plus a caption below.
#[derive(Clone, Debug)]
pub struct Spinner {
    caption: &'static str,
}

impl Spinner {
    pub fn new(caption: &'static str) -> Self {
        Self { caption }
    }

    fn dots(phase: u128) -> Vec<Span<'static>> {
        let mut dots = vec![DOT.dim().blue(); N];
        let i = (phase / STEP_MS) % (N as u128 + 1);
        if i != N as u128 {
            dots[i as usize] = DOT.bold();
        }
        dots
    }
}

impl WidgetRef for Spinner {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let phase = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let dots = Self::dots(phase);

        let [_, dots_area, caption_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        Paragraph::new(self.caption.dim())
            .alignment(Alignment::Center)
            .render(caption_area, buf);

        let [_, dots_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length((N * 2 - 1) as u16),
            Constraint::Fill(1),
        ])
        .areas(dots_area);
        let layouts = Layout::horizontal([Constraint::Length(1); N])
            .spacing(1)
            .split(dots_area);
        for (area, dot) in layouts.iter().zip(dots.iter()) {
            dot.render_ref(*area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, Some(0))]
    #[case(260, Some(1))]
    #[case(1000, Some(4))]
    #[case(1250, None)]
    #[case(1500, Some(0))]
    fn bold_dot_walks(#[case] phase: u128, #[case] bold: Option<usize>) {
        let dots = Spinner::dots(phase);
        let found = dots
            .iter()
            .position(|d| d.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(bold, found);
    }

    #[test]
    fn shows_caption() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 4));
        Spinner::new("loading").render_ref(buf.area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("loading"));
        assert!(text.contains(DOT));
    }
}
