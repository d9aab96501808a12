use std::{fmt, ops};

use ratatui::{prelude::*, widgets::*};
use tui_textarea::TextArea;

/// Single-line text input with a rounded, titled border.
#[derive(Clone)]
pub struct Prompt {
    inner: TextArea<'static>,
}

impl Prompt {
    pub fn new(title: &'static str, placeholder: &str) -> Self {
        let mut inner = TextArea::default();
        inner.set_cursor_line_style(Style::new().not_underlined());
        inner.set_cursor_style(Style::new().reversed());
        inner.set_placeholder_text(placeholder);
        inner.set_block(
            Block::bordered()
                .title(title)
                .border_type(BorderType::Rounded)
                .padding(Padding::horizontal(1))
                .blue()
                .bold(),
        );
        Self { inner }
    }

    /// The entered text. Only the first line counts.
    pub fn text(&self) -> String {
        self.inner.lines().first().cloned().unwrap_or_default()
    }
}

impl WidgetRef for Prompt {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        self.inner.widget().render(area, buf);
    }
}

impl fmt::Debug for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Prompt({:?})", self.text())
    }
}

impl ops::Deref for Prompt {
    type Target = TextArea<'static>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl ops::DerefMut for Prompt {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
