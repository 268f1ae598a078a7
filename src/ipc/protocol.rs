//! Typed wire messages for the cell <-> host boundary.
//!
//! Every line on the wire is one JSON object. Host events carry an `"event"`
//! tag, local user actions an `"action"` tag, and transport-level control
//! messages a `"ctrl"` tag; outbound client events are serialized with an
//! `"event"` tag of their own.

use serde::{Deserialize, Serialize};

use crate::cell::state::{Message, ModelInfo};

/// Payload handed to the cell once at construction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitPayload {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub loading: bool,
    #[serde(default)]
    pub error_message: Option<String>,
}

// ============================================================================
// Outbound events (cell -> host)
// ============================================================================

/// Fire-and-forget events emitted to the host. No acknowledgment is awaited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientEvent {
    UpdateModel { model: String },
    SendMessage { message: String },
    ClearChat,
    UpdatePrompt { prompt: String },
    UpdateSource { source: String },
    Generate,
}

// ============================================================================
// Inbound events (host -> cell)
// ============================================================================

/// Events delivered by the host. Each named stream is FIFO; no ordering is
/// guaranteed across different names, so handlers must be order-tolerant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    UpdateModels {
        models: Vec<ModelInfo>,
    },
    UpdateError {
        #[serde(default)]
        error_message: Option<String>,
    },
    MessageSent {
        messages: Vec<Message>,
    },
    ResponseChunk {
        chunk: String,
    },
    ChatComplete {
        messages: Vec<Message>,
    },
    ChatCleared,
    GenerationStarted,
    CodeChunk {
        chunk: String,
    },
    GenerationComplete {
        source: String,
    },
}

// ============================================================================
// Local user actions
// ============================================================================

/// Actions originating from the user inside the cell UI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    SelectModel {
        model: String,
    },
    /// Chat mode: send `input` as a message. Coder mode: generate from the
    /// current prompt (`input` is ignored).
    Submit {
        #[serde(default)]
        input: String,
    },
    Clear,
    EditPrompt {
        prompt: String,
    },
    EditSource {
        source: String,
    },
}

// ============================================================================
// Transport control
// ============================================================================

/// Messages produced by the transport layer, not by host logic. `Sync` fires
/// after a dropped connection is reestablished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "ctrl", rename_all = "snake_case")]
pub enum ControlMsg {
    Sync,
    Shutdown,
}

/// Any single wire line, classified by its tag field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireInput {
    Host(HostEvent),
    User(UserAction),
    Control(ControlMsg),
}
