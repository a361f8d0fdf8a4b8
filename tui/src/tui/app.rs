use super::{
    action::Action,
    components::{
        gauges::Gauges,
        logs::Logs,
        Component,
    },
    mode::ModeSwitch,
    tui::{
        Event,
        Tui,
    },
};
use color_eyre::Result;
use crossterm::event::{
    KeyCode,
    KeyEvent,
    KeyModifiers,
};
use eyre::{
    bail,
    Context as _,
};
use ratatui::prelude::Rect;
use tokio::{
    sync::{
        mpsc,
        watch,
    },
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use unifi_throughput_config::{
    Args,
    Config,
};
use unifi_throughput_controller::{
    ControllerClient,
    PeakStrategy,
    PollStatus,
    Poller,
    ScaleTracker,
};

/// The gauges need at least the eight basic colours.
const MIN_COLORS: u16 = 8;

type ActionSender = mpsc::UnboundedSender<Action>;
type ActionReceiver = mpsc::UnboundedReceiver<Action>;

pub struct App {
    config: Config,
    components: Vec<Box<dyn Component>>,
    mode: ModeSwitch,
    poller: Option<(Poller<ControllerClient>, watch::Sender<PollStatus>)>,
    cancellation_token: CancellationToken,
    should_quit: bool,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let config = Config::new(args).context("Failed to load the configuration")?;
        debug!(?config, "loaded configuration");

        let client = ControllerClient::new(&config).context("Failed to set up the controller client")?;
        let scale = ScaleTracker::new(PeakStrategy::from_window(config.peak_window()));
        let poller = Poller::new(client, scale);
        let (status_tx, status_rx) = watch::channel(PollStatus::Connecting);
        let mode = ModeSwitch::from(config.use_bars);

        Ok(Self {
            components: vec![
                Box::new(Gauges::new(status_rx, mode.clone(), &config)),
                Box::new(Logs::new()),
            ],
            mode,
            poller: Some((poller, status_tx)),
            cancellation_token: CancellationToken::new(),
            should_quit: false,
            config,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let colors = crossterm::style::available_color_count();
        if colors < MIN_COLORS {
            bail!("Your terminal does not support colors ({colors} available, {MIN_COLORS} needed)");
        }

        let poll_task = self.start_polling()?;

        let mut tui = Tui::new()?.tick_rate(1.0).frame_rate(4.0);
        tui.enter()?;

        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        for component in self.components.iter_mut() {
            component.register_action_handler(action_tx.clone())?;
        }
        for component in self.components.iter_mut() {
            component.register_config_handler(self.config.clone())?;
        }
        for component in self.components.iter_mut() {
            let size = tui.size()?;
            component.init(Rect::new(0, 0, size.width, size.height))?;
        }

        loop {
            self.handle_events(&mut tui, action_tx.clone()).await?;
            self.handle_actions(&mut tui, action_tx.clone(), &mut action_rx)?;
            if self.should_quit {
                tui.stop().await?;
                break;
            }
        }
        tui.exit()?;

        self.cancellation_token.cancel();
        if let Err(err) = poll_task.await {
            warn!(%err, "poll task did not shut down cleanly");
        }

        Ok(())
    }

    fn start_polling(&mut self) -> Result<JoinHandle<()>> {
        let Some((poller, status_tx)) = self.poller.take() else {
            bail!("The poll loop is already running");
        };
        Ok(tokio::spawn(poller.run(status_tx, self.cancellation_token.clone())))
    }

    async fn handle_events(&mut self, tui: &mut Tui, action_tx: ActionSender) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };
        match event {
            Event::Tick => action_tx.send(Action::Tick)?,
            Event::Render => action_tx.send(Action::Render)?,
            Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
            Event::FocusGained => action_tx.send(Action::ClearScreen)?,
            Event::Error => action_tx.send(Action::Error("Failed to read terminal input".to_string()))?,
            Event::Key(key) => self.handle_key_event(key, action_tx.clone())?,
            Event::Init | Event::FocusLost => {}
        }

        for component in self.components.iter_mut() {
            if let Some(action) = component.handle_events(Some(event.clone()))? {
                action_tx.send(action)?;
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent, action_tx: ActionSender) -> Result<()> {
        action_tx.send(key_action(key))?;
        Ok(())
    }

    fn handle_actions(&mut self, tui: &mut Tui, action_tx: ActionSender, action_rx: &mut ActionReceiver) -> Result<()> {
        while let Ok(action) = action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                trace!("{action:?}");
            }
            match &action {
                Action::Tick => {}
                Action::Quit => self.should_quit = true,
                Action::ClearScreen => tui.clear()?,
                Action::Resize(w, h) => self.handle_resize(tui, *w, *h)?,
                Action::Render => self.render(tui)?,
                Action::ToggleMode => {
                    let mode = self.mode.toggle();
                    info!(%mode, "switched display mode");
                }
                Action::Error(err) => error!("{err}"),
            };

            for component in self.components.iter_mut() {
                if let Some(action) = component.update(action.clone())? {
                    action_tx.send(action)?
                };
            }
        }
        Ok(())
    }

    fn handle_resize(&mut self, tui: &mut Tui, w: u16, h: u16) -> Result<()> {
        tui.resize(Rect::new(0, 0, w, h))?;
        self.render(tui)?;
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| {
            let area = frame.area();
            for component in self.components.iter_mut() {
                if component.is_visible() {
                    if let Err(err) = component.draw(frame, area) {
                        error!("Failed to draw: {:?}", err);
                    }
                }
            }
        })?;
        Ok(())
    }
}

/// Ctrl-C quits, since raw mode swallows the signal. Every other key flips the display mode.
fn key_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        _ => Action::ToggleMode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_action(key), Action::Quit);
    }

    #[test]
    fn any_other_key_toggles() {
        for key in [
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT),
        ] {
            assert_eq!(key_action(key), Action::ToggleMode, "{key:?}");
        }
    }
}
