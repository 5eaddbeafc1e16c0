/// Terminal frontend: draws the projected point cloud as a character grid
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    terminal::{self, Clear, ClearType},
};
use std::io::{stdout, Stdout, Write};
use std::time::Duration;
use teapot_core::config::TerminalConfig;
use teapot_core::{AppConfig, DisplaySink, LoopState, Model, Ndc, Result};

pub mod renderer;

pub use renderer::CharGrid;

/// Display sink writing to the controlling terminal.
///
/// Raw mode and the alternate screen are entered on open and restored on drop.
pub struct TerminalSink {
    stdout: Stdout,
    grid: CharGrid,
}

impl TerminalSink {
    pub fn open(config: &TerminalConfig) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = stdout();
        if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e.into());
        }

        Ok(Self {
            stdout,
            grid: CharGrid::new(config.columns, config.rows, config.glyph),
        })
    }
}

impl DisplaySink for TerminalSink {
    fn pump(&mut self) -> Result<LoopState> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if is_quit_key(&key) {
                    return Ok(LoopState::Stopped);
                }
            }
        }
        Ok(LoopState::Running)
    }

    fn present(&mut self, points: &[Ndc]) -> Result<()> {
        self.grid.clear();
        self.grid.plot(points);

        queue!(self.stdout, Clear(ClearType::All))?;
        self.grid.draw(&mut self.stdout)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// `q`, `Esc` and `Ctrl-C` stop the loop. Raw mode swallows SIGINT, so
/// `Ctrl-C` arrives here as a key.
fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Spin `model` in the terminal until the user quits; returns frames drawn
pub fn run(config: &AppConfig, model: Model) -> Result<u64> {
    let mut frame_loop = config.frame_loop(model);

    log::info!("config: {}", config.summary());
    log::info!(
        "terminal grid {}x{}, {} vertices",
        config.terminal.columns,
        config.terminal.rows,
        frame_loop.model().len()
    );

    let mut sink = TerminalSink::open(&config.terminal)?;
    let frames = frame_loop.run(&mut sink);
    drop(sink);

    let frames = frames?;
    log::info!("stopped after {} frames", frames);
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(!is_quit_key(&key));
    }
}
