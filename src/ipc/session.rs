//! The cell session: a single-consumer event loop over a channel mailbox.
//!
//! A reader thread turns stdin lines into [`WireInput`]s and enqueues them;
//! the main loop consumes one at a time, dispatches it through the
//! controller, then flushes any outbound events as newline-delimited JSON on
//! stdout. No handler awaits anything, so each mailbox item is processed to
//! completion before the next is looked at.

use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use tracing::{debug, warn};

use crate::cell::controller::{CellController, CellInput};
use crate::cell::state::{CellMode, SessionState};
use crate::config::AppConfig;
use crate::render::Renderer;

use super::protocol::{ClientEvent, ControlMsg, InitPayload, WireInput};
use super::router;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

pub struct CellSession {
    controller: CellController,
    renderer: Renderer,
    outbound_rx: Receiver<ClientEvent>,
    render_file: Option<PathBuf>,
    log_content: bool,
}

impl CellSession {
    pub fn new(mode: CellMode, init: InitPayload) -> Self {
        let (outbound_tx, outbound_rx) = unbounded();
        let controller = CellController::new(mode, init, outbound_tx);
        let mut renderer = Renderer::new();
        renderer.render_full(controller.state());
        Self {
            controller,
            renderer,
            outbound_rx,
            render_file: None,
            log_content: false,
        }
    }

    pub fn with_render_file(mut self, path: Option<PathBuf>) -> Self {
        self.render_file = path;
        self
    }

    /// Allow prompt/chunk content into trace logs.
    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.log_content = enabled;
        self
    }

    pub fn state(&self) -> &SessionState {
        self.controller.state()
    }

    /// Current serialized display tree.
    pub fn markup(&self) -> String {
        self.renderer.markup()
    }

    pub fn scroll_events(&self) -> u64 {
        self.renderer.scroll_events()
    }

    /// Handle one classified wire input. Pure dispatch: no I/O happens here,
    /// so tests can drive a session without touching stdio.
    pub fn handle_wire(&mut self, input: WireInput) -> LoopControl {
        if self.log_content {
            debug!(?input, "wire input");
        }
        match input {
            WireInput::Control(ControlMsg::Shutdown) => return LoopControl::Stop,
            WireInput::Control(ControlMsg::Sync) => {
                debug!("transport resync");
                router::dispatch(&mut self.controller, &mut self.renderer, CellInput::Resync);
            }
            WireInput::Host(event) => {
                router::dispatch(
                    &mut self.controller,
                    &mut self.renderer,
                    CellInput::Host(event),
                );
            }
            WireInput::User(action) => {
                router::dispatch(
                    &mut self.controller,
                    &mut self.renderer,
                    CellInput::User(action),
                );
            }
        }
        LoopControl::Continue
    }

    /// Take every outbound event queued since the last drain, in emit order.
    pub fn drain_outbound(&mut self) -> Vec<ClientEvent> {
        self.outbound_rx.try_iter().collect()
    }

    /// Run the session against stdin/stdout until EOF or shutdown.
    pub fn run(&mut self) -> Result<()> {
        let (input_tx, input_rx) = unbounded();
        let _reader = spawn_stdin_reader(input_tx);
        self.dump_render();
        for input in input_rx.iter() {
            let control = self.handle_wire(input);
            for event in self.outbound_rx.try_iter() {
                send_event(&event);
            }
            self.dump_render();
            if control == LoopControl::Stop {
                break;
            }
        }
        debug!("cell session loop exiting");
        Ok(())
    }

    fn dump_render(&self) {
        if let Some(path) = &self.render_file {
            if let Err(err) = std::fs::write(path, self.markup()) {
                warn!(%err, path = %path.display(), "failed to write render file");
            }
        }
    }
}

/// Write one outbound event as a JSON line on stdout. Fire-and-forget: a
/// closed pipe is not an error the cell can act on.
fn send_event(event: &ClientEvent) {
    if let Ok(json) = serde_json::to_string(event) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{json}");
        let _ = stdout.flush();
    }
}

fn spawn_stdin_reader(tx: Sender<WireInput>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            if let Some(input) = router::parse_line(&line) {
                if tx.send(input).is_err() {
                    break; // Main loop has exited.
                }
            }
        }
        debug!("stdin reader thread exiting");
    })
}

/// Entry point used by the binary: build a session from the validated config
/// and drive it over stdio.
pub fn run_cell_mode(config: &AppConfig, init: InitPayload) -> Result<()> {
    let mut session = CellSession::new(config.mode, init)
        .with_render_file(config.render_file.clone())
        .with_content_logging(config.log_content && !config.no_logs);
    session.run()
}
