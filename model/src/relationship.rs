//! 関係と関係レジストリ
//!
//! 要素間の有向関係をモデル全体で生成・保持する。要素自身は関係を所有せず、
//! `RelationshipRegistry` に生成を委譲する。

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use archmodel_common::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::element::{Element, Tags, ASYNCHRONOUS_TAG, RELATIONSHIP_TAG, SYNCHRONOUS_TAG};

/// 関係の相互作用スタイル
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub enum InteractionStyle {
    /// 同期呼び出し
    Synchronous,
    /// 非同期メッセージング
    Asynchronous,
}

impl InteractionStyle {
    /// 対応するタグ
    pub fn tag(&self) -> &'static str {
        match self {
            InteractionStyle::Synchronous => SYNCHRONOUS_TAG,
            InteractionStyle::Asynchronous => ASYNCHRONOUS_TAG,
        }
    }
}

/// 関係
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// 関係ID
    pub id: String,
    /// 関係元の要素ID
    pub source_id: String,
    /// 関係先の要素ID
    pub destination_id: String,
    /// 説明
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// 技術
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub technology: String,
    /// 相互作用スタイル
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_style: Option<InteractionStyle>,
    /// タグ
    pub tags: Tags,
}

/// 関係を生成・保持するレジストリ
///
/// 同期化はレジストリ側の責務。
pub trait RelationshipRegistry {
    /// `source` から `destination` への関係を生成して登録する
    fn create_relationship(
        &self,
        source: &dyn Element,
        destination: &dyn Element,
        description: &str,
        technology: &str,
        interaction_style: Option<InteractionStyle>,
    ) -> ModelResult<Relationship>;
}

/// メモリ内の関係レジストリ
#[derive(Clone, Default)]
pub struct InMemoryRelationshipRegistry {
    relationships: Arc<RwLock<HashMap<String, Relationship>>>,
}

impl InMemoryRelationshipRegistry {
    /// 新しいレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 関係を取得
    pub fn get(&self, id: &str) -> ModelResult<Option<Relationship>> {
        let relationships = self.relationships.read().map_err(lock_poisoned)?;
        Ok(relationships.get(id).cloned())
    }

    /// 全関係を取得
    pub fn list(&self) -> ModelResult<Vec<Relationship>> {
        let relationships = self.relationships.read().map_err(lock_poisoned)?;
        Ok(relationships.values().cloned().collect())
    }

    /// 指定要素を関係元とする関係を取得
    pub fn relationships_from(&self, source_id: &str) -> ModelResult<Vec<Relationship>> {
        let relationships = self.relationships.read().map_err(lock_poisoned)?;
        Ok(relationships
            .values()
            .filter(|r| r.source_id == source_id)
            .cloned()
            .collect())
    }
}

impl RelationshipRegistry for InMemoryRelationshipRegistry {
    fn create_relationship(
        &self,
        source: &dyn Element,
        destination: &dyn Element,
        description: &str,
        technology: &str,
        interaction_style: Option<InteractionStyle>,
    ) -> ModelResult<Relationship> {
        let mut relationships = self.relationships.write().map_err(lock_poisoned)?;

        // 同じ説明の関係が既に存在する場合は拒否
        let duplicate = relationships.values().any(|r| {
            r.source_id == source.id()
                && r.destination_id == destination.id()
                && r.description == description
        });
        if duplicate {
            return Err(ModelError::DuplicateRelationship {
                source_id: source.id().to_string(),
                destination_id: destination.id().to_string(),
                description: description.to_string(),
            });
        }

        let mut tags: Tags = [RELATIONSHIP_TAG].into_iter().collect();
        if let Some(style) = interaction_style {
            tags.add(style.tag());
        }

        let relationship = Relationship {
            id: Uuid::new_v4().to_string(),
            source_id: source.id().to_string(),
            destination_id: destination.id().to_string(),
            description: description.to_string(),
            technology: technology.to_string(),
            interaction_style,
            tags,
        };
        relationships.insert(relationship.id.clone(), relationship.clone());

        info!(
            relationship_id = %relationship.id,
            source_id = %relationship.source_id,
            destination_id = %relationship.destination_id,
            "Relationship created"
        );
        Ok(relationship)
    }
}

fn lock_poisoned<T>(_: T) -> ModelError {
    ModelError::Internal("relationship registry lock poisoned".to_string())
}
