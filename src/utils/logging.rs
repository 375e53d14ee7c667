//! 로그 설정
//!
//! 터미널 화면을 깨뜨리지 않도록 stderr 대신 파일에만 기록합니다.
//! (`<data_local_dir>/ksm/logs/ksm.log`, 레벨은 `RUST_LOG`, 기본 info)

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_NAME: &str = "ksm.log";
const DEFAULT_FILTER: &str = "info";

/// 프로그램이 끝날 때까지 들고 있어야 하는 가드 (drop 시 남은 로그 flush)
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

pub fn init() -> std::io::Result<LoggingGuard> {
    let log_dir = log_dir();
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let (writer, file_guard) = tracing_appender::non_blocking(file);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    // 이미 설치된 subscriber가 있으면 그대로 둠
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init();

    tracing::info!(log_path = %log_path.display(), "logging initialized");

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("ksm").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("ksm-logs"))
}

pub fn log_path() -> PathBuf {
    log_dir().join(LOG_FILE_NAME)
}
