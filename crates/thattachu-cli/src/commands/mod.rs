mod drill;
mod inspect;

pub use drill::drill_cmd;
pub use inspect::{levels_cmd, preview_cmd, segment_cmd};
