//! ヘルスチェック定義
//!
//! 外部のプローブがポーリングするHTTPヘルスチェックの記述。構築後は不変。

use std::fmt;

use archmodel_common::error::{ModelError, ModelResult};
use archmodel_common::validation::{
    require_non_blank, require_non_negative, require_valid_url,
};
use serde::{Deserialize, Serialize};

/// ポーリング間隔のデフォルト値（秒）
pub const DEFAULT_HEALTH_CHECK_INTERVAL_SECS: i64 = 60;
/// タイムアウトのデフォルト値（ミリ秒）
pub const DEFAULT_HEALTH_CHECK_TIMEOUT_MS: i64 = 0;

/// ヘルスチェック
///
/// 等価性と集合での同一性は (name, url, interval, timeout) の全フィールドで決まる。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "HealthCheckWire")]
pub struct HealthCheck {
    name: String,
    url: String,
    /// ポーリング間隔（秒）
    #[serde(rename = "interval")]
    interval_seconds: u64,
    /// タイムアウト（ミリ秒）
    #[serde(rename = "timeout")]
    timeout_milliseconds: u64,
}

#[derive(Deserialize)]
struct HealthCheckWire {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default = "default_interval")]
    interval: i64,
    #[serde(default)]
    timeout: i64,
}

fn default_interval() -> i64 {
    DEFAULT_HEALTH_CHECK_INTERVAL_SECS
}

impl TryFrom<HealthCheckWire> for HealthCheck {
    type Error = ModelError;

    fn try_from(wire: HealthCheckWire) -> Result<Self, Self::Error> {
        HealthCheck::new(wire.name, wire.url, wire.interval, wire.timeout)
    }
}

impl HealthCheck {
    /// ヘルスチェックを作成する
    ///
    /// 検証順序: 名前 → URLの有無 → URL構文 → 間隔 → タイムアウト。
    /// 最初に失敗した検証の `InvalidArgument` を返す。
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        interval_seconds: i64,
        timeout_milliseconds: i64,
    ) -> ModelResult<Self> {
        let name = name.into();
        let url = url.into();

        require_non_blank(&name, "The name must not be null or empty.")?;
        require_non_blank(&url, "The URL must not be null or empty.")?;
        require_valid_url(&url)?;
        let interval_seconds = require_non_negative(
            interval_seconds,
            "The polling interval must be zero or a positive integer.",
        )?;
        let timeout_milliseconds = require_non_negative(
            timeout_milliseconds,
            "The timeout must be zero or a positive integer.",
        )?;

        Ok(Self {
            name,
            url,
            interval_seconds,
            timeout_milliseconds,
        })
    }

    /// デフォルトの間隔・タイムアウトでヘルスチェックを作成する
    pub fn with_defaults(name: impl Into<String>, url: impl Into<String>) -> ModelResult<Self> {
        Self::new(
            name,
            url,
            DEFAULT_HEALTH_CHECK_INTERVAL_SECS,
            DEFAULT_HEALTH_CHECK_TIMEOUT_MS,
        )
    }

    /// 名前
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// ポーリング間隔（秒）
    pub fn interval_seconds(&self) -> u64 {
        self.interval_seconds
    }

    /// タイムアウト（ミリ秒）
    pub fn timeout_milliseconds(&self) -> u64 {
        self.timeout_milliseconds
    }
}

impl fmt::Display for HealthCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, every {}s, timeout {}ms)",
            self.name, self.url, self.interval_seconds, self.timeout_milliseconds
        )
    }
}
