/// Main application struct and event loop
use crate::actions::Action;
use crate::dispatcher::{ActionReceiver, Dispatcher};
use crate::effects::Effects;
use crate::keyboard;
use crate::logger::LogBuffer;
use crate::stores::Stores;
use crate::ui::render_layout;
use craftmeal_api::ApiClient;
use craftmeal_core::get_craftmeal_setting;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::time::Duration;

/// The main application structure following flux architecture
pub struct App {
    /// Dispatcher for sending actions
    dispatcher: Dispatcher,

    /// Every store of the application
    stores: Stores,

    /// Effects handler for side effects
    effects: Effects,

    /// Log buffer for capturing application logs
    log_buffer: LogBuffer,
}

impl App {
    pub fn new() -> Result<(Self, ActionReceiver), Box<dyn std::error::Error>> {
        let (dispatcher, rx) = Dispatcher::new();
        let action_receiver = ActionReceiver::new(rx);

        let log_buffer = crate::logger::init_memory_logger()?;

        let stores = Stores::new();
        let client = ApiClient::from_env();
        let mut effects = Effects::new(dispatcher.clone(), client, stores.session.clone());
        effects.set_location_store(stores.location.clone());
        effects.set_headcount_store(stores.headcount.clone());

        Ok((
            Self {
                dispatcher,
                stores,
                effects,
                log_buffer,
            },
            action_receiver,
        ))
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut crate::tui::Tui,
        mut action_receiver: ActionReceiver,
    ) -> io::Result<()> {
        log::info!("CraftMeal TUI started");

        let tick_ms = get_craftmeal_setting!(CRAFTMEAL_TUI_TICK_MS, usize) as u64;

        loop {
            terminal.draw(|frame| {
                render_layout(frame, &self.stores);
            })?;

            self.stores.ui.expire_toasts();

            if self.stores.ui.should_exit() {
                break;
            }

            // Handle both terminal events and dispatched actions
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(tick_ms)) => {
                    if event::poll(Duration::from_millis(0))? {
                        match event::read()? {
                            Event::Key(key_event) => {
                                // Only process key press events (not release)
                                if key_event.kind == KeyEventKind::Press {
                                    if let Some(action) =
                                        keyboard::handle_key_event(key_event, &self.stores)
                                    {
                                        self.dispatcher.dispatch(action);
                                    }
                                }
                            }
                            Event::Mouse(mouse_event) => {
                                if let Some(action) =
                                    keyboard::handle_mouse_event(mouse_event, &self.stores)
                                {
                                    self.dispatcher.dispatch(action);
                                }
                            }
                            _ => {}
                        }
                    }
                }

                Some(action) = action_receiver.recv() => {
                    self.handle_action(&action);
                }
            }
        }

        Ok(())
    }

    /// Tail of the captured log, for printing after the terminal is
    /// restored
    pub fn recent_logs(&self, count: usize) -> Vec<String> {
        self.log_buffer.get_recent_logs(count)
    }

    /// Handle an action by routing it to stores and effects
    fn handle_action(&mut self, action: &Action) {
        log::debug!("Handling action: {:?}", action);

        self.stores.reduce_all(action);
        self.effects.handle(action);
    }
}
