use ratatui::{prelude::*, widgets::*};

use crate::widgets::Spinner;

/// Shown until the first option list arrives.
#[derive(Clone, Debug)]
pub struct Loading {
    spinner: Spinner,
}

impl Loading {
    pub fn new() -> Self {
        Self {
            spinner: Spinner::new("loading options"),
        }
    }
}

impl WidgetRef for Loading {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        self.spinner.render_ref(area, buf);
    }
}
