//! 設定管理
//!
//! ModelConfig等の設定構造体

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CommonError;

/// 環境変数のプレフィックス (例: `ARCHMODEL_LOG_FILTER`)
pub const ENV_PREFIX: &str = "ARCHMODEL";

/// デプロイ環境名のデフォルト値
pub const DEFAULT_ENVIRONMENT: &str = "Default";

/// ログ出力形式
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 人間向けテキスト
    #[default]
    Text,
    /// 構造化JSON
    Json,
}

/// モデル設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// インスタンスを配置するデプロイ環境名 (デフォルト: "Default")
    #[serde(default = "default_environment")]
    pub default_environment: String,

    /// ログフィルタ (デフォルト: "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// ログ出力形式 (デフォルト: text)
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_environment: default_environment(),
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
        }
    }
}

impl ModelConfig {
    /// 設定を読み込む
    ///
    /// 優先順位: 環境変数 (`ARCHMODEL_*`) > 設定ファイル > デフォルト値。
    /// `path` を指定した場合、そのファイルは存在しなければならない。
    pub fn load(path: Option<&Path>) -> Result<Self, CommonError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));

        let config: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CommonError::Config(e.to_string()))?;

        if config.default_environment.trim().is_empty() {
            return Err(CommonError::Config(
                "default_environment must not be empty".to_string(),
            ));
        }

        tracing::debug!(
            environment = %config.default_environment,
            log_filter = %config.log_filter,
            "Model configuration loaded"
        );
        Ok(config)
    }
}
