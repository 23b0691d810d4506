//! UIコンポーネントモジュール

pub mod card_state;
pub mod preview_card;

pub use preview_card::PreviewCard;
