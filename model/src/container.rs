//! ソフトウェアシステムとコンテナ
//!
//! 設計時の要素。コンテナインスタンスはこれらを参照するだけで所有しない。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{
    format_name, sealed::TagStore, Element, Tags, CONTAINER_TAG, ELEMENT_TAG,
    SOFTWARE_SYSTEM_TAG,
};

/// ソフトウェアシステム
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareSystem {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    tags: Tags,
}

impl SoftwareSystem {
    /// 新しいソフトウェアシステムを作成
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            tags: [ELEMENT_TAG, SOFTWARE_SYSTEM_TAG].into_iter().collect(),
        }
    }

    /// 説明
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl TagStore for SoftwareSystem {
    fn tag_store(&mut self) -> &mut Tags {
        &mut self.tags
    }
}

impl Element for SoftwareSystem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn canonical_name(&self) -> Option<String> {
        Some(format!("SoftwareSystem://{}", format_name(&self.name)))
    }

    fn parent_id(&self) -> Option<&str> {
        None
    }

    fn set_parent_id(&mut self, _parent_id: Option<String>) {}

    fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// コンテナ（アプリケーションやデータストア等のデプロイ単位）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    technology: String,
    tags: Tags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    software_system_name: String,
}

impl Container {
    /// ソフトウェアシステム配下に新しいコンテナを作成
    pub fn new(
        software_system: &SoftwareSystem,
        name: impl Into<String>,
        description: impl Into<String>,
        technology: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            technology: technology.into(),
            tags: [ELEMENT_TAG, CONTAINER_TAG].into_iter().collect(),
            parent_id: Some(software_system.id().to_string()),
            software_system_name: software_system.name.clone(),
        }
    }

    /// 説明
    pub fn description(&self) -> &str {
        &self.description
    }

    /// 技術スタック
    pub fn technology(&self) -> &str {
        &self.technology
    }
}

impl TagStore for Container {
    fn tag_store(&mut self) -> &mut Tags {
        &mut self.tags
    }
}

impl Element for Container {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn canonical_name(&self) -> Option<String> {
        Some(format!(
            "Container://{}.{}",
            format_name(&self.software_system_name),
            format_name(&self.name)
        ))
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    fn set_parent_id(&mut self, parent_id: Option<String>) {
        self.parent_id = parent_id;
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }
}
