use std::{io::stdout, time::Duration};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{Event, EventStream},
    execute, queue, terminal,
};
use futures_util::{FutureExt, StreamExt};
use ratatui::prelude::*;
use tokio::{sync::mpsc, time::Instant};
use tracing::{event, Level};

use crate::{app, view::View};

pub enum Request {
    Render(View),
}

#[derive(Debug)]
pub enum Response {
    Event(Event),
    /// Emitted once per frame interval; the app redraws animations on it.
    Frame(Instant),
}

/// Draws the views it is sent and reports terminal events and frame ticks.
pub async fn handler(
    mut rx: mpsc::UnboundedReceiver<Request>,
    tx: mpsc::UnboundedSender<app::Response>,
    frame_interval: Duration,
) -> Result<()> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut tui_events = EventStream::new();
    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        let tui_event = tui_events.next().fuse();
        let res = tokio::select! {
            request = rx.recv() => {
                let Some(Request::Render(view)) = request else {
                    break;
                };
                terminal.draw(|frame| frame.render_widget_ref(view, frame.size()))?;
                continue;
            }
            now = frames.tick() => Response::Frame(now),
            Some(Ok(tui_event)) = tui_event => Response::Event(tui_event),
        };
        if tx.send(app::Response::Tui(res)).is_err() {
            break;
        }
    }

    event!(Level::INFO, "stop tui handler");
    Ok(())
}

pub fn enter() -> Result<()> {
    terminal::enable_raw_mode()?;
    queue!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
    Ok(())
}

pub fn exit() -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}
