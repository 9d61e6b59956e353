use thiserror::Error;

/// Ошибки хранилища статистики игроков.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Ошибка ввода-вывода ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Повреждённая запись игрока ({path}): {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Пустое имя игрока")]
    EmptyPlayerName,

    #[error("Файл {path} принадлежит игроку {found}, а не {expected}")]
    NameMismatch {
        path: String,
        expected: String,
        found: String,
    },
}
