//! Command implementations

mod nearest;
mod order;
mod stats;
mod view;
mod visible;

pub use nearest::cmd_nearest;
pub use order::cmd_order;
pub use stats::cmd_stats;
pub use view::{cmd_view, ViewFormat};
pub use visible::cmd_visible;
