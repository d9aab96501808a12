use ratatui::{prelude::*, widgets::*};

use crate::{
    sync::ValidationError,
    widgets::{Dial, Prompt},
};

const HELP: &str = "space spin · a add · r refresh · q quit";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Ready,
    Placeholder,
    Spinning,
    Winner(String),
    Rejected(ValidationError),
}

impl Status {
    fn line(&self) -> Line<'_> {
        match self {
            Status::Ready => Line::from(""),
            Status::Placeholder => {
                Line::from("option store unavailable, showing placeholder options".yellow())
            }
            Status::Spinning => Line::from("spinning…".dim()),
            Status::Winner(option) => Line::from_iter(["winner: ".into(), option.as_str().bold()]),
            Status::Rejected(err) => Line::from(err.to_string().red()),
        }
    }
}

/// The wheel screen with its status line and the optional add prompt.
#[derive(Clone, Debug, Default)]
pub struct Home {
    dial: Dial,
    status: Status,
    prompt: Option<Prompt>,
}

impl Home {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dial(&mut self, dial: Dial) {
        self.dial = dial;
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn open_prompt(&mut self) {
        self.prompt = Some(Prompt::new(" New option ", "type an option and press Enter"));
    }

    /// Closes the prompt and returns what was typed into it.
    pub fn close_prompt(&mut self) -> Option<String> {
        self.prompt.take().map(|p| p.text())
    }

    pub fn prompt(&mut self) -> Option<&mut Prompt> {
        self.prompt.as_mut()
    }

    pub fn has_prompt(&self) -> bool {
        self.prompt.is_some()
    }
}

impl WidgetRef for Home {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let [dial_area, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .vertical_margin(1)
        .areas(area);

        self.dial.render_ref(dial_area, buf);
        Paragraph::new(self.status.line())
            .alignment(Alignment::Center)
            .render(status_area, buf);
        Paragraph::new(HELP.dim())
            .alignment(Alignment::Center)
            .render(help_area, buf);

        if let Some(prompt) = &self.prompt {
            let [_, area, _] = Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Max(50),
                Constraint::Fill(1),
            ])
            .areas(area);
            let [_, area, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(3),
                Constraint::Fill(1),
            ])
            .areas(area);
            prompt.render_ref(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(home: &Home) -> String {
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 20));
        home.render_ref(buf.area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shows_winner() {
        let mut home = Home::new();
        home.set_status(Status::Winner("Tacos".into()));
        assert!(render(&home).contains("winner: Tacos"));
    }

    #[test]
    fn shows_rejection() {
        let mut home = Home::new();
        home.set_status(Status::Rejected(ValidationError::Empty));
        assert!(render(&home).contains("option text is empty"));
    }

    #[test]
    fn prompt_round_trip() {
        let mut home = Home::new();
        assert!(!home.has_prompt());
        home.open_prompt();
        assert!(render(&home).contains("New option"));
        home.prompt().unwrap().insert_str("Ramen");
        assert_eq!(Some("Ramen".to_string()), home.close_prompt());
        assert!(!home.has_prompt());
        assert_eq!(None, home.close_prompt());
    }
}
