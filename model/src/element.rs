//! 要素の共通抽象
//!
//! ID・名前・タグ・親子関係を提供する `Element` トレイトと、タグ格納用の `Tags`

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 全要素に付与されるタグ
pub const ELEMENT_TAG: &str = "Element";
/// ソフトウェアシステムのタグ
pub const SOFTWARE_SYSTEM_TAG: &str = "Software System";
/// コンテナのタグ
pub const CONTAINER_TAG: &str = "Container";
/// コンテナインスタンスのタグ
pub const CONTAINER_INSTANCE_TAG: &str = "Container Instance";
/// 関係のタグ
pub const RELATIONSHIP_TAG: &str = "Relationship";
/// 同期的な関係のタグ
pub const SYNCHRONOUS_TAG: &str = "Synchronous";
/// 非同期的な関係のタグ
pub const ASYNCHRONOUS_TAG: &str = "Asynchronous";

/// 順序付き・重複なしのタグ集合
///
/// 直列化時はカンマ区切りの文字列になるため、タグ自体にカンマは含まれない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    /// 空のタグ集合を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// タグを追加する。空白のみのタグと既存タグは無視する
    ///
    /// カンマを含む場合は区切り文字とみなし、個別のタグとして追加する。
    /// 1件でも追加された場合は `true`。
    pub fn add(&mut self, tag: &str) -> bool {
        let mut added = false;
        for part in split_tags(tag) {
            if !self.0.iter().any(|t| t == part) {
                self.0.push(part.to_string());
                added = true;
            }
        }
        added
    }

    /// 複数のタグを追加する
    pub fn add_all<'a>(&mut self, tags: impl IntoIterator<Item = &'a str>) {
        for tag in tags {
            self.add(tag);
        }
    }

    /// タグが含まれるか（カンマ区切りの場合は全て含まれるか）
    pub fn contains(&self, tag: &str) -> bool {
        let mut parts = split_tags(tag).peekable();
        parts.peek().is_some() && parts.all(|part| self.0.iter().any(|t| t == part))
    }

    /// タグを列挙する（追加順）
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// タグ数
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // 削除は Element::remove_tag のフック経由に限定する
    pub(crate) fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        let parts: Vec<&str> = split_tags(tag).collect();
        self.0.retain(|t| !parts.contains(&t.as_str()));
        self.0.len() != before
    }
}

fn split_tags(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|part| !part.is_empty())
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl<'a> FromIterator<&'a str> for Tags {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tags = Tags::new();
        tags.add_all(iter);
        tags
    }
}

impl Serialize for Tags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.split(',').collect())
    }
}

pub(crate) mod sealed {
    use super::Tags;

    /// タグ格納領域への可変アクセス（クレート外からは呼べない）
    pub trait TagStore {
        /// タグ格納領域
        fn tag_store(&mut self) -> &mut Tags;
    }
}

/// モデル要素
///
/// タグ削除は `remove_tag` をフックとして公開しており、実装側で
/// 上書きして拒否できる。タグ集合への可変参照は公開しないため、
/// `add_tags` と `remove_tag` 以外の経路でタグは変化しない。
///
/// ```compile_fail
/// use std::sync::Arc;
/// use archmodel::{Container, ContainerInstance, Element, SoftwareSystem, Tags};
///
/// let system = SoftwareSystem::new("System", "");
/// let container = Arc::new(Container::new(&system, "Web", "", "Rust"));
/// let mut instance = ContainerInstance::new(container, 1);
/// *instance.tags_mut() = Tags::new();
/// ```
pub trait Element: sealed::TagStore {
    /// 要素ID
    fn id(&self) -> &str;

    /// 要素名（名前を持たない要素は `None`）
    fn name(&self) -> Option<&str>;

    /// 要素名を設定する
    fn set_name(&mut self, name: &str);

    /// 階層から導出される正規名
    ///
    /// 導出に必要な参照が未解決の場合は `None`。
    fn canonical_name(&self) -> Option<String>;

    /// 親要素のID
    fn parent_id(&self) -> Option<&str>;

    /// 親要素を設定する
    fn set_parent_id(&mut self, parent_id: Option<String>);

    /// タグ
    fn tags(&self) -> &Tags;

    /// タグを追加する
    fn add_tags(&mut self, tags: &[&str]) {
        self.tag_store().add_all(tags.iter().copied());
    }

    /// タグを削除する。削除された場合は `true`
    fn remove_tag(&mut self, tag: &str) -> bool {
        self.tag_store().remove(tag)
    }

    /// タグが付与されているか
    fn has_tag(&self, tag: &str) -> bool {
        self.tags().contains(tag)
    }
}

/// 名前を正規名の一部として整形する（改行を空白に置換）
pub(crate) fn format_name(name: &str) -> String {
    name.trim().replace(['\r', '\n'], " ")
}
