//! Доменная модель ассистента: карты, руки, борд, позиции, снимок стола.

pub mod card;
pub mod chips;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod position;
pub mod snapshot;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use errors::ParseError;
pub use hand::*;
pub use position::*;
pub use snapshot::*;
