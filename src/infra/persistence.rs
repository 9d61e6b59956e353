use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Записать файл атомарно: сначала во временный рядом, затем rename.
///
/// Читатель видит либо старое содержимое, либо новое целиком.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = tmp_path(path);
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Имя файла из имени игрока.
///
/// Буквы, цифры, `-`, `_` и `.` остаются как есть, остальное пишется байтами UTF-8
/// в виде `%XX`. Разные имена дают разные файлы: `%` сам всегда кодируется.
/// Имя только из точек кодируется целиком, чтобы не выйти из каталога.
pub fn encode_file_stem(name: &str) -> String {
    let only_dots = !name.is_empty() && name.chars().all(|c| c == '.');
    let mut stem = String::with_capacity(name.len());
    for c in name.chars() {
        let keep = c.is_alphanumeric() || matches!(c, '-' | '_') || (c == '.' && !only_dots);
        if keep {
            stem.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                stem.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    stem
}
