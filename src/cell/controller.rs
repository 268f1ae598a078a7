//! Lifecycle controller: the single place that mutates [`SessionState`].
//!
//! Every external stimulus — a user action, a host event, or a transport
//! resync — funnels through [`CellController::handle`], which applies the
//! transition synchronously and reports how much of the view needs redrawing.
//! Guard violations (no model selected, blank input, already loading) are
//! silent no-ops by design: nothing is emitted and no state changes.

use crossbeam_channel::Sender;
use tracing::{debug, warn};

use crate::ipc::protocol::{ClientEvent, HostEvent, InitPayload, UserAction};

use super::state::{CellContent, CellMode, Message, Phase, SessionState};

/// One stimulus for the transition function.
#[derive(Debug, Clone)]
pub enum CellInput {
    User(UserAction),
    Host(HostEvent),
    /// Transport reconnected; re-announce client-held mutable fields.
    Resync,
}

/// How much of the view a handled input invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    None,
    /// Only the single in-flight response node changed.
    Stream,
    Full,
}

pub struct CellController {
    state: SessionState,
    outbound: Sender<ClientEvent>,
}

impl CellController {
    pub fn new(mode: CellMode, init: InitPayload, outbound: Sender<ClientEvent>) -> Self {
        Self {
            state: SessionState::from_init(mode, init),
            outbound,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The single transition function. Runs to completion; never panics on
    /// any declared input shape.
    pub fn handle(&mut self, input: CellInput) -> Redraw {
        match input {
            CellInput::User(action) => self.handle_action(action),
            CellInput::Host(event) => self.handle_host_event(event),
            CellInput::Resync => {
                self.resync();
                Redraw::None
            }
        }
    }

    /// Fire-and-forget emission toward the host.
    fn emit(&self, event: ClientEvent) {
        let _ = self.outbound.send(event);
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    fn handle_action(&mut self, action: UserAction) -> Redraw {
        match action {
            UserAction::SelectModel { model } => {
                if self.state.loading() {
                    return Redraw::None;
                }
                self.state.selected_model = model.clone();
                self.emit(ClientEvent::UpdateModel { model });
                Redraw::Full
            }
            UserAction::Submit { input } => self.submit(&input),
            UserAction::Clear => self.clear(),
            UserAction::EditPrompt { prompt } => {
                if self.state.loading() {
                    return Redraw::None;
                }
                match &mut self.state.content {
                    CellContent::Coder { prompt: held, .. } => {
                        *held = prompt.clone();
                        self.emit(ClientEvent::UpdatePrompt { prompt });
                        Redraw::Full
                    }
                    CellContent::Chat { .. } => {
                        warn!("edit_prompt ignored by chat cell");
                        Redraw::None
                    }
                }
            }
            UserAction::EditSource { source } => {
                if self.state.loading() {
                    return Redraw::None;
                }
                match &mut self.state.content {
                    CellContent::Coder { source: held, .. } => {
                        *held = source.clone();
                        self.emit(ClientEvent::UpdateSource { source });
                        Redraw::Full
                    }
                    CellContent::Chat { .. } => {
                        warn!("edit_source ignored by chat cell");
                        Redraw::None
                    }
                }
            }
        }
    }

    fn submit(&mut self, input: &str) -> Redraw {
        if self.state.loading() || self.state.selected_model.is_empty() {
            return Redraw::None;
        }
        match &mut self.state.content {
            CellContent::Chat { transcript } => {
                let message = input.trim();
                if message.is_empty() {
                    return Redraw::None;
                }
                // Optimistic append; the host confirms via message_sent.
                transcript.push(Message::user(message));
                self.state.phase = Phase::Submitted;
                self.state.error = None;
                self.emit(ClientEvent::SendMessage {
                    message: message.to_string(),
                });
                Redraw::Full
            }
            CellContent::Coder { prompt, source } => {
                if prompt.trim().is_empty() {
                    return Redraw::None;
                }
                source.clear();
                self.state.phase = Phase::Submitted;
                self.state.error = None;
                self.emit(ClientEvent::Generate);
                Redraw::Full
            }
        }
    }

    fn clear(&mut self) -> Redraw {
        if self.state.loading() {
            return Redraw::None;
        }
        self.state.error = None;
        self.state.phase = Phase::Idle;
        match &mut self.state.content {
            CellContent::Chat { transcript } => {
                transcript.clear();
                self.emit(ClientEvent::ClearChat);
            }
            CellContent::Coder { source, .. } => {
                // No dedicated clear event exists for the coder cell; wiping
                // the source re-announces the empty buffer instead.
                source.clear();
                self.emit(ClientEvent::UpdateSource {
                    source: String::new(),
                });
            }
        }
        Redraw::Full
    }

    // ------------------------------------------------------------------
    // Host events
    // ------------------------------------------------------------------

    fn handle_host_event(&mut self, event: HostEvent) -> Redraw {
        match event {
            HostEvent::UpdateModels { models } => {
                self.state.models = models;
                if !self.state.selected_model.is_empty() && !self.state.selection_listed() {
                    debug!(
                        model = %self.state.selected_model,
                        "selection no longer listed; clearing"
                    );
                    self.state.selected_model.clear();
                }
                Redraw::Full
            }
            HostEvent::UpdateError { error_message } => {
                match error_message.filter(|message| !message.is_empty()) {
                    Some(message) => {
                        // An error always forces loading off; a half-streamed
                        // buffer is discarded with it.
                        self.state.error = Some(message);
                        self.state.phase = Phase::Errored;
                    }
                    None => {
                        self.state.error = None;
                        if self.state.phase == Phase::Errored {
                            self.state.phase = Phase::Idle;
                        }
                    }
                }
                Redraw::Full
            }
            HostEvent::MessageSent { messages } => match &mut self.state.content {
                CellContent::Chat { transcript } => {
                    // Authoritative copy replaces the optimistic one wholesale.
                    *transcript = messages;
                    Redraw::Full
                }
                CellContent::Coder { .. } => {
                    warn!("message_sent ignored by coder cell");
                    Redraw::None
                }
            },
            HostEvent::ResponseChunk { chunk } => {
                if self.state.mode() != CellMode::Chat {
                    warn!("response_chunk ignored by coder cell");
                    return Redraw::None;
                }
                self.apply_chunk(chunk)
            }
            HostEvent::ChatComplete { messages } => match &mut self.state.content {
                CellContent::Chat { transcript } => {
                    *transcript = messages;
                    self.state.phase = Phase::Idle;
                    Redraw::Full
                }
                CellContent::Coder { .. } => {
                    warn!("chat_complete ignored by coder cell");
                    Redraw::None
                }
            },
            HostEvent::ChatCleared => match &mut self.state.content {
                CellContent::Chat { transcript } => {
                    transcript.clear();
                    self.state.error = None;
                    self.state.phase = Phase::Idle;
                    Redraw::Full
                }
                CellContent::Coder { .. } => {
                    warn!("chat_cleared ignored by coder cell");
                    Redraw::None
                }
            },
            HostEvent::GenerationStarted => match &mut self.state.content {
                CellContent::Coder { source, .. } => {
                    source.clear();
                    self.state.phase = Phase::Submitted;
                    Redraw::Full
                }
                CellContent::Chat { .. } => {
                    warn!("generation_started ignored by chat cell");
                    Redraw::None
                }
            },
            HostEvent::CodeChunk { chunk } => {
                if self.state.mode() != CellMode::Coder {
                    warn!("code_chunk ignored by chat cell");
                    return Redraw::None;
                }
                self.apply_chunk(chunk)
            }
            HostEvent::GenerationComplete { source } => match &mut self.state.content {
                CellContent::Coder {
                    source: held_source,
                    ..
                } => {
                    *held_source = source;
                    self.state.phase = Phase::Idle;
                    Redraw::Full
                }
                CellContent::Chat { .. } => {
                    warn!("generation_complete ignored by chat cell");
                    Redraw::None
                }
            },
        }
    }

    /// FIFO buffer accumulation. Chunks arriving when nothing is in flight
    /// (after a completion or an error overtook them) are dropped.
    fn apply_chunk(&mut self, chunk: String) -> Redraw {
        match &mut self.state.phase {
            Phase::Submitted => {
                self.state.phase = Phase::Streaming { buffer: chunk };
                Redraw::Stream
            }
            Phase::Streaming { buffer } => {
                buffer.push_str(&chunk);
                Redraw::Stream
            }
            Phase::Idle | Phase::Errored => {
                debug!("dropping chunk received while idle");
                Redraw::None
            }
        }
    }

    // ------------------------------------------------------------------
    // Resync
    // ------------------------------------------------------------------

    /// Re-announce every client-held field the host may have diverged on.
    /// Never emits an action event: resync says "here is what I hold", not
    /// "do something".
    fn resync(&self) {
        self.emit(ClientEvent::UpdateModel {
            model: self.state.selected_model.clone(),
        });
        if let CellContent::Coder { prompt, source } = &self.state.content {
            if !prompt.is_empty() {
                self.emit(ClientEvent::UpdatePrompt {
                    prompt: prompt.clone(),
                });
            }
            if !source.is_empty() {
                self.emit(ClientEvent::UpdateSource {
                    source: source.clone(),
                });
            }
        }
    }
}
