pub mod colors;
mod input;
mod layout;
mod tree_view;

pub use colors::ColorScheme;
pub use input::{handle_key, Command, ConfirmAction, InputMode};
pub use layout::render_ui;
pub use tree_view::render_tree_view;
