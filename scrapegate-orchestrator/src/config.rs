//! Orchestrator configuration
//!
//! Defines where the orchestrator lives on disk, how the worker is invoked,
//! the environment the worker sees, and the transport settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_RESULTS_DIR: &str = "results";
const DEFAULT_WORKER_SCRIPT: &str = "scrape_jobs.py";
const DEFAULT_WORKER_TIMEOUT_SECS: u64 = 300;
const DEFAULT_WORKER_PATH: &str = "/usr/local/bin:/usr/bin:/bin";
const DEFAULT_SEARCH_PATH_VAR: &str = "PYTHONPATH";

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (e.g., "0.0.0.0:8080")
    pub bind_addr: String,

    /// Base directory; the worker runs with this as its working directory
    pub base_dir: PathBuf,

    /// Name of the results directory under `base_dir`
    pub results_dir_name: String,

    /// Worker entry point
    pub worker: PathBuf,

    /// Optional interpreter placed before the worker in the argument vector
    pub worker_interpreter: Option<String>,

    /// Maximum time a worker may run before it is killed
    pub worker_timeout: Duration,

    /// Environment handed to the worker
    pub worker_env: WorkerEnv,

    /// Single origin allowed by CORS; no CORS layer when unset
    pub allowed_origin: Option<String>,
}

/// The complete environment of a worker process
///
/// Nothing from the orchestrator's own environment is inherited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerEnv {
    /// Value of `PATH`
    pub path: String,
    /// Name of the worker's module search-path variable (e.g. `PYTHONPATH`)
    pub search_path_var: String,
    /// Value of the search-path variable
    pub search_path: String,
    /// Value of `HOME`
    pub home: String,
}

impl WorkerEnv {
    /// Defaults for a worker rooted at `base_dir`
    pub fn for_base_dir(base_dir: &Path) -> Self {
        let base = base_dir.to_string_lossy().to_string();
        Self {
            path: DEFAULT_WORKER_PATH.to_string(),
            search_path_var: DEFAULT_SEARCH_PATH_VAR.to_string(),
            search_path: base.clone(),
            home: base,
        }
    }

    /// The enumerated variables as a map
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("PATH".to_string(), self.path.clone()),
            (self.search_path_var.clone(), self.search_path.clone()),
            ("HOME".to_string(), self.home.clone()),
        ])
    }
}

impl Config {
    /// Creates a configuration rooted at `base_dir` with defaults
    ///
    /// A relative `base_dir` is resolved against the current directory, since
    /// the worker runs with the base directory as its own working directory.
    pub fn new(base_dir: PathBuf) -> Self {
        let base_dir = std::path::absolute(&base_dir).unwrap_or(base_dir);
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            results_dir_name: DEFAULT_RESULTS_DIR.to_string(),
            worker: base_dir.join(DEFAULT_WORKER_SCRIPT),
            worker_interpreter: None,
            worker_timeout: Duration::from_secs(DEFAULT_WORKER_TIMEOUT_SECS),
            worker_env: WorkerEnv::for_base_dir(&base_dir),
            allowed_origin: None,
            base_dir,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - SCRAPEGATE_BIND_ADDR (default: 0.0.0.0:8080)
    /// - SCRAPEGATE_BASE_DIR (default: current directory)
    /// - SCRAPEGATE_RESULTS_DIR (default: results)
    /// - SCRAPEGATE_WORKER (default: <base>/scrape_jobs.py, relative paths are under <base>)
    /// - SCRAPEGATE_WORKER_INTERPRETER (default: none)
    /// - SCRAPEGATE_WORKER_TIMEOUT (seconds, default: 300)
    /// - SCRAPEGATE_WORKER_PATH (default: /usr/local/bin:/usr/bin:/bin)
    /// - SCRAPEGATE_SEARCH_PATH_VAR (default: PYTHONPATH)
    /// - SCRAPEGATE_SEARCH_PATH (default: <base>)
    /// - SCRAPEGATE_WORKER_HOME (default: <base>)
    /// - SCRAPEGATE_ALLOWED_ORIGIN (default: none)
    pub fn from_env() -> anyhow::Result<Self> {
        let base_dir = match std::env::var("SCRAPEGATE_BASE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let mut config = Self::new(base_dir);

        if let Ok(addr) = std::env::var("SCRAPEGATE_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Ok(name) = std::env::var("SCRAPEGATE_RESULTS_DIR") {
            config.results_dir_name = name;
        }

        if let Ok(worker) = std::env::var("SCRAPEGATE_WORKER") {
            config.worker = PathBuf::from(worker);
        }

        config.worker_interpreter = std::env::var("SCRAPEGATE_WORKER_INTERPRETER")
            .ok()
            .filter(|s| !s.is_empty());

        config.worker_timeout = std::env::var("SCRAPEGATE_WORKER_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_WORKER_TIMEOUT_SECS));

        if let Ok(path) = std::env::var("SCRAPEGATE_WORKER_PATH") {
            config.worker_env.path = path;
        }

        if let Ok(var) = std::env::var("SCRAPEGATE_SEARCH_PATH_VAR") {
            config.worker_env.search_path_var = var;
        }

        if let Ok(value) = std::env::var("SCRAPEGATE_SEARCH_PATH") {
            config.worker_env.search_path = value;
        }

        if let Ok(home) = std::env::var("SCRAPEGATE_WORKER_HOME") {
            config.worker_env.home = home;
        }

        config.allowed_origin = std::env::var("SCRAPEGATE_ALLOWED_ORIGIN")
            .ok()
            .filter(|s| !s.is_empty());

        Ok(config)
    }

    /// Absolute location of the results directory
    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join(&self.results_dir_name)
    }

    /// Worker entry point, with a relative `worker` taken from the base directory
    pub fn worker_path(&self) -> PathBuf {
        self.base_dir.join(&self.worker)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.results_dir_name.is_empty() {
            anyhow::bail!("results_dir_name cannot be empty");
        }

        if self.results_dir_name.contains('/') || self.results_dir_name.contains('\\') {
            anyhow::bail!("results_dir_name must be a single directory name");
        }

        if self.worker.as_os_str().is_empty() {
            anyhow::bail!("worker path cannot be empty");
        }

        if self.worker_timeout.is_zero() {
            anyhow::bail!("worker_timeout must be greater than 0");
        }

        if self.worker_env.search_path_var.is_empty() {
            anyhow::bail!("search_path_var cannot be empty");
        }

        if let Some(origin) = &self.allowed_origin {
            HeaderValue::from_str(origin)
                .map_err(|_| anyhow::anyhow!("allowed_origin is not a valid header value"))?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(base_dir)
    }
}
