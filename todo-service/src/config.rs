use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

/// Runtime configuration, read from flags with environment fallbacks.
#[derive(Parser, Debug, Clone)]
#[command(name = "todo-service")]
#[command(about = "CRUD HTTP service for todo records backed by MongoDB")]
pub struct Config {
    #[arg(long, env = "LISTEN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "MONGODB_URI", required_unless_present = "in_memory")]
    pub mongodb_uri: Option<String>,

    #[arg(long, env = "MONGODB_DATABASE", default_value = "golang")]
    pub database: String,

    #[arg(long, env = "MONGODB_COLLECTION", default_value = "todos")]
    pub collection: String,

    /// Bounds MongoDB server selection and connection establishment for the
    /// life of the client, the startup ping included.
    #[arg(long, env = "MONGODB_CONNECT_TIMEOUT_SECS", default_value_t = 20)]
    pub connect_timeout_secs: u64,

    /// Keep records in process memory instead of MongoDB.
    #[arg(long, env = "TODO_IN_MEMORY", default_value_t = false)]
    pub in_memory: bool,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Load variables from a `.env` file into the process environment so the
/// `env` fallbacks above can see them. `None` searches the working directory
/// and its parents. Variables already set are not overridden.
pub fn load_env_file(path: Option<&Path>) -> Result<PathBuf, dotenvy::Error> {
    match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    }
}
