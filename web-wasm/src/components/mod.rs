//! 画面コンポーネント

pub mod header;
pub mod scanner_panel;
pub mod status_banner;
pub mod tourist_card;
pub mod visit_list;
