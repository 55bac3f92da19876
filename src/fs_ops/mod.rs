//! Filesystem operations: conflict-free naming, single-file relocation and the
//! batched move engine.

mod batch;
mod conflict;
mod file_move;
pub mod helpers;

pub use batch::{
    DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE, MoveEngine, MoveMapping, MoveOptions, MoveOutcome,
    move_records,
};
pub use conflict::{ConflictResolver, DEFAULT_MAX_PROBES, resolve_conflict, strip_number_suffix};
pub use file_move::relocate;
