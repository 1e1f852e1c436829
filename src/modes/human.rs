use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep};

use crate::game::{EngineState, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The tick delay follows the snake's speed, so the timer is re-armed
        // after every tick instead of running at a fixed rate.
        let tick_timer = sleep(self.engine.tick_interval());
        tokio::pin!(tick_timer);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                _ = &mut tick_timer => {
                    if self.engine.is_running() {
                        self.update_game()?;
                    }
                    tick_timer.as_mut().reset(Instant::now() + self.engine.tick_interval());
                }

                _ = render_timer.tick() => {
                    if self.engine.is_running() {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                // Steering only counts once a session is live.
                if self.engine.is_running() {
                    self.engine.change_direction(direction);
                }
            }
            KeyAction::Restart => {
                if self.engine.state() != EngineState::Running {
                    self.reset_game();
                }
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) -> Result<()> {
        let snapshot = self.engine.tick().context("Game tick failed")?;
        self.metrics.on_speed(snapshot.speed);

        if snapshot.state == EngineState::GameOver {
            self.metrics.on_game_over(snapshot.score);
        }

        Ok(())
    }

    fn reset_game(&mut self) {
        self.engine.restart();
        self.metrics.on_game_start();
        self.metrics.on_speed(self.engine.speed());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, ManualClock};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode {
        let engine =
            GameEngine::with_parts(GameConfig::default(), 5, Box::new(ManualClock::new())).unwrap();
        HumanMode::new(engine)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.engine.state(), EngineState::AwaitingStart);
        assert_eq!(mode.engine.score(), 0);
    }

    #[test]
    fn test_space_starts_game() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.engine.state(), EngineState::Running);
    }

    #[test]
    fn test_turns_ignored_before_start() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.engine.snake().heading(), Direction::Up);

        mode.handle_event(key(KeyCode::Char(' ')));
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.engine.snake().heading(), Direction::Left);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char(' ')));
        mode.update_game().unwrap();
        let ticks = mode.engine.ticks();

        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.engine.ticks(), ticks);
    }

    #[test]
    fn test_game_over_recorded() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char(' ')));
        while mode.engine.is_running() {
            mode.update_game().unwrap();
        }
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.engine.state(), EngineState::Running);
        assert_eq!(mode.engine.score(), 0);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
