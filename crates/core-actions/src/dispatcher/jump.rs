use super::ViewUpdate;
use crate::goto::validate_offset;
use core_model::HexView;
use core_state::DeflectHint;
use tracing::debug;

pub(crate) fn handle_goto(view: &mut HexView, text: &str) -> ViewUpdate {
    match validate_offset(text, view.size()) {
        Ok(offset) => view.move_to(offset, DeflectHint::None, false).into(),
        Err(err) => {
            debug!(target: "actions.dispatch", view = view.id().0, error = %err, kind = ?err, "goto_rejected");
            ViewUpdate::rejected(err)
        }
    }
}
