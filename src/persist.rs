use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::error::StoreError;

/// Return the current unix timestamp in seconds
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Load a JSON document from `path`. A missing file yields the default value;
/// an unreadable or malformed one is logged and also yields the default.
pub fn load_json<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return T::default();
    }
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!("failed to parse {}: {}. Treating as empty.", path.display(), e);
            T::default()
        }),
        Err(e) => {
            tracing::warn!("failed to read {}: {}. Treating as empty.", path.display(), e);
            T::default()
        }
    }
}

/// Save `value` to `path` as pretty JSON. The document is written next to the
/// target first and then renamed over it.
pub fn save_json<T>(path: &Path, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let s = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, s)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tmp_file(name: &str) -> std::path::PathBuf {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("{}_{}_{}.json", name, pid, nanos))
    }

    #[test]
    fn missing_file_loads_default() {
        let tmp = tmp_file("persist_missing");
        let loaded: Vec<u32> = load_json(&tmp);
        assert!(loaded.is_empty());
    }

    #[test]
    fn malformed_file_loads_default() {
        let tmp = tmp_file("persist_malformed");
        fs::write(&tmp, "{ not json").unwrap();
        let loaded: HashMap<String, u64> = load_json(&tmp);
        assert!(loaded.is_empty());
        let _ = fs::remove_file(&tmp);
    }

    #[test]
    fn save_writes_two_space_indent_and_leaves_no_temp_file() {
        let tmp = tmp_file("persist_pretty");
        save_json(&tmp, &vec![1, 2]).unwrap();

        let raw = fs::read_to_string(&tmp).unwrap();
        assert_eq!(raw, "[\n  1,\n  2\n]");
        assert!(!tmp.with_extension("json.tmp").exists());

        let reloaded: Vec<i32> = load_json(&tmp);
        assert_eq!(reloaded, vec![1, 2]);
        let _ = fs::remove_file(&tmp);
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = tmp_file("persist_dir").with_extension("");
        let path = dir.join("nested").join("data.json");
        save_json(&path, &vec!["a"]).unwrap();
        assert!(path.exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
