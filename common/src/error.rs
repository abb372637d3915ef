//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! モデル操作の失敗はすべて呼び出し元へ同期的に返され、内部でのリトライや
//! 回復は行わない。

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Model error type
#[derive(Debug, Error)]
pub enum ModelError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Invalid argument supplied to a model operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A relationship with the same description already links the two elements
    #[error(
        "A relationship named '{description}' between {source_id} and {destination_id} already exists"
    )]
    DuplicateRelationship {
        /// 関係元の要素ID
        source_id: String,
        /// 関係先の要素ID
        destination_id: String,
        /// 関係の説明
        description: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ModelError {
    /// `InvalidArgument` を生成する
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// 引数不正エラーかどうか
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Model result type
pub type ModelResult<T> = Result<T, ModelError>;
