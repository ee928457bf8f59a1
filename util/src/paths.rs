use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_STORAGE_ROOT: &str = "../data/questions";

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Storage root for question definitions, from `KPRIME_STORAGE_ROOT` (or `.env`).
/// If relative, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    dotenvy::dotenv().ok();

    let root = env::var("KPRIME_STORAGE_ROOT").unwrap_or_else(|_| DEFAULT_STORAGE_ROOT.into());
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// A single question folder: {STORAGE_ROOT}/question_{question_id}
pub fn question_dir(question_id: i64) -> PathBuf {
    storage_root().join(format!("question_{question_id}"))
}

/// The definition document of a question: .../question_{id}/definition.json
pub fn definition_path(question_id: i64) -> PathBuf {
    question_dir(question_id).join("definition.json")
}
