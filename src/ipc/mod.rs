//! NDJSON event channels between the cell and its host.
//!
//! Architecture:
//! - Stdin reader thread: parses JSON lines, enqueues them on the mailbox
//! - Main event loop: consumes one input at a time, runs it to completion
//! - Outbound channel: fire-and-forget JSON lines on stdout
//!
//! Protocol:
//! - Host events (host -> cell): {"event": "...", ...}
//! - User actions (UI -> cell): {"action": "...", ...}
//! - Transport control: {"ctrl": "sync" | "shutdown"}
//! - Client events (cell -> host): {"event": "...", ...}

pub mod protocol;
pub mod router;
pub mod session;


pub use protocol::{ClientEvent, ControlMsg, HostEvent, InitPayload, UserAction, WireInput};
pub use session::{run_cell_mode, CellSession};
