//! Wire-line classification and dispatch into the controller + renderer.

use tracing::warn;

use crate::cell::controller::{CellController, CellInput, Redraw};
use crate::render::Renderer;

use super::protocol::WireInput;

/// Parse one wire line. Blank lines yield nothing; malformed lines are logged
/// and discarded so a noisy transport can never take the cell down.
pub fn parse_line(line: &str) -> Option<WireInput> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<WireInput>(trimmed) {
        Ok(input) => Some(input),
        Err(err) => {
            warn!(%err, "discarding unrecognized wire line");
            None
        }
    }
}

/// Apply one input and redraw at the granularity the controller reports.
/// Mutation plus redraw happen before the next input is consumed, so the pair
/// is atomic with respect to interleaved events.
pub fn dispatch(controller: &mut CellController, renderer: &mut Renderer, input: CellInput) {
    match controller.handle(input) {
        Redraw::Full => renderer.render_full(controller.state()),
        Redraw::Stream => renderer.render_stream(controller.state()),
        Redraw::None => {}
    }
}
