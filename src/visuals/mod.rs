pub mod colors;
pub mod ring_layout;
pub mod text_board;
pub mod tui;
pub mod tui_app;
