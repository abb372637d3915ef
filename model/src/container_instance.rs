//! コンテナインスタンス
//!
//! デプロイ先に配置されたコンテナの番号付きインスタンス。
//!
//! IDと正規名はインスタンス化するコンテナから導出され、以下は変更できない:
//! - 名前（常に `None`、`set_name` は何もしない）
//! - 親（コンテナの親と同じ、`set_parent_id` は何もしない）
//! - タグの削除（`remove_tag` は何もしない）

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use archmodel_common::config::DEFAULT_ENVIRONMENT;
use archmodel_common::error::{ModelError, ModelResult};
use archmodel_common::validation::{is_blank, require_non_blank, require_valid_url};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::container::Container;
use crate::element::{sealed::TagStore, Element, Tags, CONTAINER_INSTANCE_TAG};
use crate::health_check::{
    HealthCheck, DEFAULT_HEALTH_CHECK_INTERVAL_SECS, DEFAULT_HEALTH_CHECK_TIMEOUT_MS,
};
use crate::relationship::{InteractionStyle, Relationship, RelationshipRegistry};

/// コンテナインスタンス
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "ContainerInstanceWire", from = "ContainerInstanceWire")]
pub struct ContainerInstance {
    id: String,
    /// 未解決（直列化からの復元直後）の間は `None`
    container: Option<Arc<Container>>,
    /// コンテナ参照が未解決の間だけ使われるID
    container_id: Option<String>,
    instance_id: u32,
    environment: String,
    tags: Tags,
    properties: BTreeMap<String, String>,
    url: Option<String>,
    health_checks: BTreeSet<HealthCheck>,
}

impl ContainerInstance {
    /// コンテナのインスタンスを作成する
    ///
    /// `instance_id` の一意性は配置側の責務であり、ここでは検証しない。
    pub fn new(container: Arc<Container>, instance_id: u32) -> Self {
        let mut tags = container.tags().clone();
        tags.add(CONTAINER_INSTANCE_TAG);

        Self {
            id: Uuid::new_v4().to_string(),
            container: Some(container),
            container_id: None,
            instance_id,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            tags,
            properties: BTreeMap::new(),
            url: None,
            health_checks: BTreeSet::new(),
        }
    }

    /// デプロイ環境を指定する
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// インスタンス化しているコンテナ（未解決なら `None`）
    pub fn container(&self) -> Option<&Arc<Container>> {
        self.container.as_ref()
    }

    /// コンテナID
    ///
    /// コンテナ参照が解決済みなら常にそのIDを返し、未解決の場合のみ
    /// `set_container_id` で保存された値を返す。
    pub fn container_id(&self) -> Option<&str> {
        match &self.container {
            Some(container) => Some(container.id()),
            None => self.container_id.as_deref(),
        }
    }

    /// 参照復元用のコンテナIDを保存する
    ///
    /// 参照が解決済みの間は `container_id()` に影響しない。
    pub fn set_container_id(&mut self, container_id: impl Into<String>) {
        self.container_id = Some(container_id.into());
    }

    /// 直列化から復元した後にコンテナ参照を解決する
    ///
    /// 保存済みのコンテナIDと異なるコンテナは拒否する。解決済みの
    /// インスタンスは同じIDのコンテナ以外に付け替えられない。
    pub fn resolve_container(&mut self, container: Arc<Container>) -> ModelResult<()> {
        if let Some(current) = self.container.as_deref() {
            if current.id() == container.id() {
                return Ok(());
            }
            return Err(ModelError::invalid_argument(format!(
                "Container instance {} already represents container {}.",
                self.id,
                current.id()
            )));
        }
        if let Some(stored) = self.container_id.as_deref() {
            if stored != container.id() {
                return Err(ModelError::invalid_argument(format!(
                    "Container {} does not match the stored container ID {}.",
                    container.id(),
                    stored
                )));
            }
        }
        self.container = Some(container);
        Ok(())
    }

    /// インスタンス番号
    pub fn instance_id(&self) -> u32 {
        self.instance_id
    }

    /// デプロイ環境名
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// `destination` を利用する関係を作成する
    ///
    /// `destination` が `None` の場合は `InvalidArgument`。説明と技術は検証しない。
    pub fn uses(
        &self,
        registry: &dyn RelationshipRegistry,
        destination: Option<&ContainerInstance>,
        description: &str,
        technology: &str,
    ) -> ModelResult<Relationship> {
        self.create_uses(registry, destination, description, technology, None)
    }

    /// 相互作用スタイルを指定して `destination` を利用する関係を作成する
    pub fn uses_with_style(
        &self,
        registry: &dyn RelationshipRegistry,
        destination: Option<&ContainerInstance>,
        description: &str,
        technology: &str,
        interaction_style: InteractionStyle,
    ) -> ModelResult<Relationship> {
        self.create_uses(
            registry,
            destination,
            description,
            technology,
            Some(interaction_style),
        )
    }

    fn create_uses(
        &self,
        registry: &dyn RelationshipRegistry,
        destination: Option<&ContainerInstance>,
        description: &str,
        technology: &str,
        interaction_style: Option<InteractionStyle>,
    ) -> ModelResult<Relationship> {
        let destination = destination
            .ok_or_else(|| ModelError::invalid_argument("The destination must be specified."))?;

        registry.create_relationship(self, destination, description, technology, interaction_style)
    }

    /// デフォルトの間隔（60秒）とタイムアウト（0ミリ秒）でヘルスチェックを追加する
    pub fn add_health_check(&mut self, name: &str, url: &str) -> ModelResult<HealthCheck> {
        self.add_health_check_with(
            name,
            url,
            DEFAULT_HEALTH_CHECK_INTERVAL_SECS,
            DEFAULT_HEALTH_CHECK_TIMEOUT_MS,
        )
    }

    /// ヘルスチェックを追加する
    ///
    /// 全フィールドが等しいヘルスチェックは1件にまとめられる。
    /// 検証に失敗した場合、ヘルスチェック集合は変更されない。
    pub fn add_health_check_with(
        &mut self,
        name: &str,
        url: &str,
        interval_seconds: i64,
        timeout_milliseconds: i64,
    ) -> ModelResult<HealthCheck> {
        let health_check = HealthCheck::new(name, url, interval_seconds, timeout_milliseconds)?;

        if self.health_checks.insert(health_check.clone()) {
            debug!(element_id = %self.id, health_check = %health_check, "Health check added");
        } else {
            debug!(element_id = %self.id, health_check = %health_check, "Health check already present");
        }
        Ok(health_check)
    }

    /// ヘルスチェック集合のコピー
    pub fn health_checks(&self) -> BTreeSet<HealthCheck> {
        self.health_checks.clone()
    }

    /// プロパティを追加する（同名は上書き）
    pub fn add_property(&mut self, name: &str, value: &str) -> ModelResult<()> {
        require_non_blank(name, "A property name must be specified.")?;
        require_non_blank(value, "A property value must be specified.")?;
        self.properties.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// プロパティ
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// URL
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// URLを設定する。空白を指定するとURLを消去する
    pub fn set_url(&mut self, url: &str) -> ModelResult<()> {
        if is_blank(url) {
            self.url = None;
            return Ok(());
        }
        require_valid_url(url)?;
        self.url = Some(url.to_string());
        Ok(())
    }
}

impl TagStore for ContainerInstance {
    fn tag_store(&mut self) -> &mut Tags {
        &mut self.tags
    }
}

impl Element for ContainerInstance {
    fn id(&self) -> &str {
        &self.id
    }

    /// 常に `None`
    fn name(&self) -> Option<&str> {
        None
    }

    /// 何もしない
    fn set_name(&mut self, name: &str) {
        debug!(element_id = %self.id, name, "Ignoring name change on container instance");
    }

    /// `<コンテナの正規名>[<インスタンス番号>]`
    ///
    /// コンテナ参照の解決前は `None`。
    fn canonical_name(&self) -> Option<String> {
        self.container
            .as_ref()
            .and_then(|container| container.canonical_name())
            .map(|name| format!("{}[{}]", name, self.instance_id))
    }

    /// コンテナの親（コンテナ自身ではない）
    fn parent_id(&self) -> Option<&str> {
        self.container.as_deref().and_then(|container| container.parent_id())
    }

    /// 何もしない
    fn set_parent_id(&mut self, parent_id: Option<String>) {
        debug!(element_id = %self.id, ?parent_id, "Ignoring parent change on container instance");
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }

    /// 何もしない。タグは常に元のコンテナを反映する
    fn remove_tag(&mut self, tag: &str) -> bool {
        debug!(element_id = %self.id, tag, "Ignoring tag removal on container instance");
        false
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContainerInstanceWire {
    #[serde(default)]
    id: String,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    tags: Tags,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    environment: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    container_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    instance_id: u32,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    health_checks: BTreeSet<HealthCheck>,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl From<ContainerInstance> for ContainerInstanceWire {
    fn from(instance: ContainerInstance) -> Self {
        let container_id = instance
            .container_id()
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        Self {
            id: instance.id,
            tags: instance.tags,
            environment: instance.environment,
            properties: instance.properties,
            url: instance.url,
            container_id,
            instance_id: instance.instance_id,
            health_checks: instance.health_checks,
        }
    }
}

impl From<ContainerInstanceWire> for ContainerInstance {
    fn from(wire: ContainerInstanceWire) -> Self {
        let environment = if is_blank(&wire.environment) {
            DEFAULT_ENVIRONMENT.to_string()
        } else {
            wire.environment
        };

        Self {
            id: wire.id,
            container: None,
            container_id: wire.container_id.filter(|id| !id.is_empty()),
            instance_id: wire.instance_id,
            environment,
            tags: wire.tags,
            properties: wire.properties,
            url: wire.url,
            health_checks: wire.health_checks,
        }
    }
}
