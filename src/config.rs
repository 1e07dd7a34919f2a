use std::sync::LazyLock;

use derive_from_env::FromEnv;

#[derive(FromEnv)]
#[from_env(prefix = "PRETTYLOG")]
#[allow(non_snake_case)]
pub struct PrettyLogConfig {
    /// File sink cap when the builder does not set one (100 MiB).
    #[from_env(default = "104857600")]
    pub MAX_FILE_SIZE_BYTES: u64,
    /// Channel bound for queued sinks.
    #[from_env(default = "512")]
    pub QUEUE_CAPACITY: u64,
}

pub static PRETTYLOG_CONFIG: LazyLock<PrettyLogConfig> =
    LazyLock::new(|| PrettyLogConfig::from_env().unwrap());
