use anyhow::Result;
use crossterm::event::{Event as TuiEvent, KeyCode, KeyEvent, KeyEventKind};
use rand::Rng;
use tokio::{sync::mpsc, time::Instant};
use tracing::{event, Level};

use crate::{
    sync::{self, OptionText},
    tui,
    view::{self, Status, View},
    wheel::{Source, Wheel},
    widgets::Dial,
};

#[derive(Debug)]
pub enum Response {
    Sync(sync::Response),
    Tui(tui::Response),
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Application state driven by responses from the sync and tui handlers.
pub struct App<R> {
    wheel: Wheel,
    home: view::Home,
    loaded: bool,
    rng: R,
    sync_tx: sync::RequestTx,
}

impl<R: Rng> App<R> {
    pub fn new(sync_tx: sync::RequestTx, rng: R) -> Self {
        Self {
            wheel: Wheel::new(sync_tx.clone()),
            home: view::Home::new(),
            loaded: false,
            rng,
            sync_tx,
        }
    }

    fn request(&self, request: sync::Request) -> Result<()> {
        self.sync_tx.send(request)?;
        Ok(())
    }

    fn view(&mut self) -> View {
        if !self.loaded {
            return view::Loading::new().into();
        }
        self.home
            .set_dial(Dial::new(self.wheel.choices(), self.wheel.rotation()));
        self.home.clone().into()
    }

    fn handle(&mut self, res: Response) -> Result<Flow> {
        match res {
            Response::Sync(sync::Response::Choices(choices)) => {
                self.loaded = true;
                // The placeholder notice only takes an idle status line; a
                // winner or a rejection stays visible.
                let notice = match (choices.source(), self.home.status()) {
                    (Source::Placeholder, Status::Ready) => Some(Status::Placeholder),
                    (Source::Store, Status::Placeholder) => Some(Status::Ready),
                    _ => None,
                };
                if let Some(status) = notice {
                    self.home.set_status(status);
                }
                self.wheel.set_choices(choices);
                Ok(Flow::Continue)
            }
            Response::Tui(tui::Response::Frame(now)) => {
                if let Some(selection) = self.wheel.tick(now) {
                    self.home.set_status(Status::Winner(selection.option));
                }
                Ok(Flow::Continue)
            }
            Response::Tui(tui::Response::Event(TuiEvent::Key(key))) => self.key(key),
            Response::Tui(tui::Response::Event(_)) => Ok(Flow::Continue),
        }
    }

    fn key(&mut self, key: KeyEvent) -> Result<Flow> {
        if key.kind == KeyEventKind::Release {
            return Ok(Flow::Continue);
        }

        if let Some(prompt) = self.home.prompt() {
            match key.code {
                KeyCode::Esc => {
                    self.home.close_prompt();
                }
                KeyCode::Enter => {
                    let text = self.home.close_prompt().unwrap_or_default();
                    match OptionText::try_from(text) {
                        Ok(text) => {
                            event!(Level::INFO, "add option {text:?}");
                            self.request(sync::Request::Add(text))?;
                        }
                        Err(err) => self.home.set_status(Status::Rejected(err)),
                    }
                }
                _ => {
                    prompt.input(tui_textarea::Input::from(key));
                }
            }
            return Ok(Flow::Continue);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Ok(Flow::Exit),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.wheel.spin(Instant::now(), &mut self.rng) {
                    self.home.set_status(Status::Spinning);
                }
            }
            KeyCode::Char('a') => self.home.open_prompt(),
            KeyCode::Char('r') => self.request(sync::Request::Refresh)?,
            _ => {}
        }
        Ok(Flow::Continue)
    }
}

pub async fn start<R: Rng>(
    mut res_rx: mpsc::UnboundedReceiver<Response>,
    sync_tx: sync::RequestTx,
    tui_tx: mpsc::UnboundedSender<tui::Request>,
    rng: R,
) -> Result<()> {
    let mut app = App::new(sync_tx, rng);
    let mut changes = app.wheel.subscribe();
    let mut view = app.view();

    app.request(sync::Request::Refresh)?;

    event!(Level::INFO, "start main loop");
    loop {
        tui_tx.send(tui::Request::Render(view.clone()))?;

        // Wait until something visible changes; idle frame ticks are
        // handled without a redraw.
        let mut redraw = false;
        while !redraw {
            tokio::select! {
                res = res_rx.recv() => {
                    let Some(res) = res else {
                        event!(Level::INFO, "stop main loop");
                        return Ok(());
                    };
                    let is_frame = matches!(res, Response::Tui(tui::Response::Frame(_)));
                    if app.handle(res)? == Flow::Exit {
                        event!(Level::INFO, "stop main loop");
                        return Ok(());
                    }
                    redraw = !is_frame || !app.loaded;
                }
                Some(change) = changes.recv() => {
                    event!(Level::TRACE, "wheel changed: {change:?}");
                    redraw = true;
                }
            }
        }

        view.update(app.view());
    }
}
