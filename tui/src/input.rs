//! Input handling for the HYRESIS terminal.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::{
    sync::mpsc::{self, error::TryRecvError},
    task::{JoinHandle, spawn_blocking},
    time::timeout,
};
use tracing::debug;

use hyresis_engine::FlowPhase;

use crate::app::GameApp;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 256; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and hands them to the frame
/// loop through a bounded channel.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = spawn_blocking(move || input_loop(&stop2, &tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so a reader blocked on a full channel wakes up.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = timeout(SHUTDOWN_TIMEOUT, join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: &AtomicBool, tx: &mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    // Bounded queue: apply backpressure instead of dropping events.
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain queued input into `app`. Returns whether the game should exit.
pub fn handle_events(app: &mut GameApp, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    if processed > 0 {
        debug!(processed, "Input drained");
    }
    Ok(app.should_quit())
}

pub(crate) fn apply_event(app: &mut GameApp, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            if matches!(key.kind, KeyEventKind::Release) {
                return app.should_quit();
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                app.request_quit();
                return true;
            }
            match app.phase() {
                FlowPhase::Opening | FlowPhase::WaitContinue => handle_narrative_key(app, key),
                FlowPhase::Streaming => handle_terminal_key(app, key),
                FlowPhase::QuizLocked => handle_quiz_key(app, key),
                FlowPhase::Ended => handle_ended_key(app, key),
            }
        }
        Event::Paste(text) => app.insert_text(&text),
        _ => {}
    }
    app.should_quit()
}

fn handle_narrative_key(app: &mut GameApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm(),
        KeyCode::Esc => app.cancel(),
        _ => {}
    }
}

fn handle_terminal_key(app: &mut GameApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm(),
        KeyCode::Esc => app.cancel(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Up => app.history_up(),
        KeyCode::Down => app.history_down(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut GameApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm(),
        KeyCode::Esc => app.cancel(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.clear_pending(),
        KeyCode::Left | KeyCode::BackTab => app.move_palette(false),
        KeyCode::Right | KeyCode::Tab => app.move_palette(true),
        KeyCode::Up => app.history_up(),
        KeyCode::Down => app.history_down(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

fn handle_ended_key(app: &mut GameApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm(),
        KeyCode::Esc => app.cancel(),
        KeyCode::Char('q') => app.request_quit(),
        _ => {}
    }
}
