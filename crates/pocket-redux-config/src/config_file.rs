use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".pocket-redux.toml";

/// Load config file content from CWD first, then home directory, then the
/// platform config directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    candidate_paths()
        .into_iter()
        .find_map(|path| read_config(&path))
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_FILE));
    }
    if let Ok(global) = crate::paths::global_config_path() {
        paths.push(global);
    }
    paths
}

fn read_config(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    log::debug!("Loaded config from {}", path.display());
    Some(content)
}
