//! archmodel 共通ライブラリ
//!
//! モデルクレートとCLIで共有するエラー型・設定・検証ヘルパー

#![warn(missing_docs)]

/// 設定管理
pub mod config;

/// エラー型定義
pub mod error;

/// 入力値検証ヘルパー
pub mod validation;
