mod ui;
mod viewer;

pub use ui::{UIState, View};
pub use viewer::{ImageView, ViewerPair};
