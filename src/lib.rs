pub mod cell;
pub mod config;
pub mod format;
pub mod ipc;
pub mod render;
pub mod telemetry;

pub use cell::controller::{CellController, CellInput, Redraw};
pub use cell::state::{CellMode, Message, ModelInfo, Phase, Role, SessionState};
pub use ipc::{run_cell_mode, CellSession, ClientEvent, HostEvent, InitPayload, UserAction};
