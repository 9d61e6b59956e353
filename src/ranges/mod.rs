//! Префлоп-диапазоны: чарты по позициям и селектор действия.
//!
//! Основные операции:
//!   - `RangeChartStore::builtin` / `RangeChartStore::load_dir` – загрузить чарты
//!   - `select_action` – решение для руки в позиции с учётом «особой» руки

pub mod chart;
pub mod errors;
pub mod selector;
pub mod store;

pub use chart::{ActionCode, RangeChart};
pub use errors::RangeError;
pub use selector::{select_action, select_action_str, PreflopAction};
pub use store::RangeChartStore;
