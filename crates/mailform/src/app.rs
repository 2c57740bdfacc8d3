use color_eyre::{Result, eyre::eyre};
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::{
    action::Action,
    cli::{Cli, check_rate},
    config::Config,
    form::{
        FieldId, FieldSet, FormController, FormEvent, FormOptions, FormState, FormStatus,
        EditEvent, render,
    },
    keymap::{Binding, binding_for_key, chord_from_key},
    sender::{Message, Outbox},
    theme::Theme,
    tui::{Event, Tui},
};

/// How the interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Sent(Message),
    Quit,
}

pub struct App {
    pub controller: FormController<Outbox>,
    pub theme: Theme,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub should_quit: bool,
    pub should_suspend: bool,
}

impl App {
    pub fn new(args: &Cli, config: Config) -> Result<Self> {
        let mut fields = FieldSet::new(config.form.char_limit, config.form.width);
        let prefill = [
            (FieldId::To, &args.to),
            (FieldId::From, &args.from),
            (FieldId::Subject, &args.subject),
            (FieldId::Body, &args.body),
        ];
        for (id, value) in prefill {
            if let Some(value) = value {
                fields.set_value(id, value);
            }
        }

        let controller = FormController::with_state(FormState::new(fields), Outbox::new())
            .options(FormOptions {
                clear_error_on_edit: config.form.clear_error_on_edit,
            });

        let tick_rate = check_rate(args.tick_rate.unwrap_or(config.ui.tick_rate))
            .map_err(|e| eyre!("invalid tick rate: {e}"))?;
        let frame_rate = check_rate(args.frame_rate.unwrap_or(config.ui.frame_rate))
            .map_err(|e| eyre!("invalid frame rate: {e}"))?;

        Ok(Self {
            controller,
            theme: Theme::from_env(config.theme.clone()),
            tick_rate,
            frame_rate,
            should_quit: false,
            should_suspend: false,
        })
    }

    pub fn status(&self) -> FormStatus {
        self.controller.status()
    }

    /// Translate a terminal event into at most one action.
    pub fn handle_event(&self, event: Event) -> Option<Action> {
        match event {
            Event::Tick => Some(Action::Tick),
            Event::Render => Some(Action::Render),
            Event::Resize(x, y) => Some(Action::Resize(x, y)),
            Event::Error => Some(Action::Error("terminal event stream failed".into())),
            Event::Paste(text) => Some(Action::Form(FormEvent::Edit(EditEvent::Paste(text)))),
            Event::Key(key) => {
                let binding = binding_for_key(key);
                debug!(chord = %chord_from_key(key), ?binding, "key");
                match binding? {
                    Binding::Form(event) => Some(Action::Form(event)),
                    Binding::Suspend => Some(Action::Suspend),
                }
            }
            Event::Init | Event::FocusGained | Event::FocusLost => None,
        }
    }

    /// Apply an action; returns a follow-up action, if any.
    pub fn update(&mut self, action: Action) -> Option<Action> {
        match action {
            Action::Tick => self.update(Action::Form(FormEvent::Tick)),
            Action::Quit => self.update(Action::Form(FormEvent::Quit)),
            Action::Form(event) => {
                let status = self.controller.handle(event);
                if status.is_terminal() {
                    self.should_quit = true;
                }
                Some(Action::Render)
            }
            Action::Suspend => {
                self.should_suspend = true;
                None
            }
            Action::Resume => {
                self.should_suspend = false;
                None
            }
            Action::Error(msg) => {
                error!("{msg}");
                None
            }
            Action::Render | Action::Resize(_, _) => None,
        }
    }

    pub fn outcome(self) -> RunOutcome {
        match self.controller.status() {
            FormStatus::Sent => self
                .controller
                .into_sender()
                .take()
                .map_or(RunOutcome::Quit, RunOutcome::Sent),
            _ => RunOutcome::Quit,
        }
    }

    pub async fn run(mut self) -> Result<RunOutcome> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        loop {
            if let Some(event) = tui.next_event().await {
                if let Some(action) = self.handle_event(event) {
                    action_tx.send(action)?;
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if !matches!(action, Action::Tick | Action::Render) {
                    debug!("{action:?}");
                }
                match action {
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.draw(&mut tui)?;
                    }
                    Action::Render => self.draw(&mut tui)?,
                    _ => {}
                }
                if let Some(next) = self.update(action) {
                    action_tx.send(next)?;
                }
            }

            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = Tui::new()?
                    .tick_rate(self.tick_rate)
                    .frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(self.outcome())
    }

    fn draw(&self, tui: &mut Tui) -> Result<()> {
        let state = self.controller.state();
        tui.draw(|f| {
            let area = f.area();
            render::draw(f, area, state, &self.theme);
        })?;
        Ok(())
    }
}
