use research_chat::config::StorageConfig;
use research_chat::storage::ChatStore;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn create_temp_store() -> (Arc<ChatStore>, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let config = StorageConfig {
        path: Some(tmp.path().join("chats.db").to_string_lossy().into_owned()),
        namespace: "research-agent".to_string(),
    };
    let store = ChatStore::open(&config).expect("failed to open sled-backed store");
    (Arc::new(store), tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn store_path_arg(dir: &TempDir) -> String {
    dir.path().join("chats.db").to_string_lossy().into_owned()
}
