mod home;
mod loading;

use std::{fmt, mem};

use ratatui::{prelude::*, widgets::*};
use tracing::{event, Level};

pub use home::{Home, Status};
pub use loading::Loading;

#[derive(Clone)]
pub enum View {
    Home(Home),
    Loading(Loading),
}

impl View {
    /// Replaces the view. Only switches between screens are logged, since
    /// the home view is rebuilt on every animation frame.
    pub fn update<V: Into<View>>(&mut self, new: V) {
        let new = new.into();
        if mem::discriminant(self) != mem::discriminant(&new) {
            event!(Level::DEBUG, "switch view: {self:?} -> {new:?}");
        }
        *self = new;
    }
}

impl WidgetRef for View {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        match self {
            View::Home(home) => home.render_ref(area, buf),
            View::Loading(loading) => loading.render_ref(area, buf),
        }
    }
}

impl From<Home> for View {
    fn from(value: Home) -> Self {
        Self::Home(value)
    }
}

impl From<Loading> for View {
    fn from(value: Loading) -> Self {
        Self::Loading(value)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Home(_) => "Home",
            Self::Loading(_) => "Loading",
        })
    }
}
