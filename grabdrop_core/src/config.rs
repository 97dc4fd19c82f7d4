//! Server configuration

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::friends::FriendGraph;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "grabdrop";
const APP_NAME: &str = "grab_drop";
const CONFIG_FILE: &str = "config.json";

/// A mutually declared friendship between two identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendPair {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub listen_port: u16,
    pub uploads_dir: PathBuf,
    pub friends: Vec<FriendPair>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_port: 5000,
            uploads_dir: PathBuf::from("uploads"),
            friends: vec![FriendPair {
                a: "user1".to_string(),
                b: "user2".to_string(),
            }],
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn get_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("GRABDROP_CONFIG") {
            return Some(PathBuf::from(path));
        }

        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load config from disk or return default
    pub fn load() -> Self {
        let path = match Self::get_config_path() {
            Some(p) => p,
            None => return Self::default(),
        };

        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save config to disk
    pub fn save(&self) {
        let path = match Self::get_config_path() {
            Some(p) => p,
            None => return,
        };

        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(path, json);
        }
    }

    /// Build the friend graph declared by this config.
    pub fn friend_graph(&self) -> FriendGraph {
        let mut graph = FriendGraph::new();
        for pair in &self.friends {
            graph.add_pair(&pair.a, &pair.b);
        }
        graph
    }
}
