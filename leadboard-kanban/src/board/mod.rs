//! Board commands and assembly

mod get;
mod view;

pub use get::GetBoard;
pub use view::{board_view, BoardView, ColumnView};
