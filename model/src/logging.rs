//! ログ初期化
//!
//! `RUST_LOG` が設定されていれば設定ファイルのフィルタより優先する。

use archmodel_common::config::{LogFormat, ModelConfig};
use archmodel_common::error::CommonError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 設定に従ってグローバルなtracing subscriberを登録する
pub fn init(config: &ModelConfig) -> Result<(), CommonError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    result.map_err(|e| CommonError::Config(format!("failed to initialize logging: {e}")))?;

    tracing::debug!(format = ?config.log_format, "Logging initialized");
    Ok(())
}

fn build_filter(config: &ModelConfig) -> Result<EnvFilter, CommonError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| CommonError::Config(format!("invalid log filter: {e}"))),
    }
}
