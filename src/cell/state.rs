use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::ipc::protocol::InitPayload;

/// Which flavor of cell the host instantiated.
///
/// The two flavors share the model picker, the lifecycle machine, and the
/// error surface; they differ only in what the body holds (a chat transcript
/// vs. a prompt plus generated source).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CellMode {
    Chat,
    Coder,
}

/// A selectable backend model as announced by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Insertion order is chat order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request lifecycle phase.
///
/// The streaming buffer lives inside `Streaming`, so a non-empty buffer
/// without an in-flight request cannot be expressed. `Complete` is not a
/// variant: completion collapses straight back to `Idle` inside the handler
/// that observes it. `Errored` only persists the visible error message; every
/// guard treats it like `Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitted,
    Streaming { buffer: String },
    Errored,
}

/// Mode-specific body of the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Chat { transcript: Vec<Message> },
    Coder { prompt: String, source: String },
}

/// The client-held mirror of host state for one cell instance.
///
/// Mutated exclusively by the lifecycle controller; the render engine and the
/// resync path only read it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub models: Vec<ModelInfo>,
    pub selected_model: String,
    pub content: CellContent,
    pub phase: Phase,
    pub error: Option<String>,
}

impl SessionState {
    /// Build the initial state from the payload the host supplies at
    /// construction. A payload with `loading: true` restores an in-flight
    /// request (the host will follow up with chunks or a completion).
    pub fn from_init(mode: CellMode, payload: InitPayload) -> Self {
        let content = match mode {
            CellMode::Chat => CellContent::Chat {
                transcript: payload.messages.unwrap_or_default(),
            },
            CellMode::Coder => CellContent::Coder {
                prompt: payload.prompt.unwrap_or_default(),
                source: payload.source.unwrap_or_default(),
            },
        };
        let phase = if payload.loading {
            Phase::Submitted
        } else {
            Phase::Idle
        };
        Self {
            models: payload.models,
            selected_model: payload.model,
            content,
            phase,
            error: payload.error_message.filter(|message| !message.is_empty()),
        }
    }

    pub fn mode(&self) -> CellMode {
        match self.content {
            CellContent::Chat { .. } => CellMode::Chat,
            CellContent::Coder { .. } => CellMode::Coder,
        }
    }

    /// True for the whole Submitted + Streaming span.
    pub fn loading(&self) -> bool {
        matches!(self.phase, Phase::Submitted | Phase::Streaming { .. })
    }

    /// The accumulated in-flight response, present only while streaming.
    pub fn streaming_buffer(&self) -> Option<&str> {
        match &self.phase {
            Phase::Streaming { buffer } => Some(buffer),
            _ => None,
        }
    }

    /// Whether the current selection refers to a model the host has listed.
    pub fn selection_listed(&self) -> bool {
        !self.selected_model.is_empty()
            && self
                .models
                .iter()
                .any(|model| model.id == self.selected_model)
    }
}
