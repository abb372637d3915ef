//! archmodel
//!
//! ソフトウェアアーキテクチャをコードとして記述するためのメモリ内モデル。
//! デプロイ先に配置されたコンテナインスタンスと、その関係・タグ・ヘルスチェックを扱う。

#![warn(missing_docs)]

/// 要素の共通抽象（ID、タグ、親子関係）
pub mod element;

/// ソフトウェアシステムとコンテナ
pub mod container;

/// ヘルスチェック
pub mod health_check;

/// コンテナインスタンス
pub mod container_instance;

/// 関係と関係レジストリ
pub mod relationship;

/// ログ初期化
pub mod logging;

pub use archmodel_common::error::{ModelError, ModelResult};
pub use container::{Container, SoftwareSystem};
pub use container_instance::ContainerInstance;
pub use element::{Element, Tags};
pub use health_check::HealthCheck;
pub use relationship::{
    InMemoryRelationshipRegistry, InteractionStyle, Relationship, RelationshipRegistry,
};
