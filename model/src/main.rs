//! archmodel CLI
//!
//! サンプルのデプロイモデルを構築し、コンテナインスタンスをJSONで出力する

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use archmodel::{
    Container, ContainerInstance, InMemoryRelationshipRegistry, InteractionStyle, ModelResult,
    SoftwareSystem,
};
use archmodel_common::config::ModelConfig;
use archmodel_common::error::CommonError;
use clap::Parser;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[command(name = "archmodel", version, about = "Architecture model builder")]
struct Cli {
    /// 設定ファイルのパス (TOML/JSON/YAML)
    #[arg(short, long, env = "ARCHMODEL_CONFIG")]
    config: Option<PathBuf>,

    /// JSONを整形して出力する
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ModelConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = archmodel::logging::init(&config) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(&config, cli.pretty) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build model");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ModelConfig, pretty: bool) -> ModelResult<String> {
    let registry = InMemoryRelationshipRegistry::new();

    let system = SoftwareSystem::new("Internet Banking System", "Allows customers to bank online");
    let api = Arc::new(Container::new(
        &system,
        "API Application",
        "Provides banking functionality via a JSON/HTTPS API",
        "Rust",
    ));

    let mut primary = ContainerInstance::new(api.clone(), 1)
        .with_environment(config.default_environment.clone());
    let mut secondary =
        ContainerInstance::new(api, 2).with_environment(config.default_environment.clone());

    primary.add_health_check("API health", "https://api.example.com/health")?;
    secondary.add_health_check_with("API health", "https://api-2.example.com/health", 30, 500)?;
    primary.uses_with_style(
        &registry,
        Some(&secondary),
        "Replicates session state to",
        "TCP",
        InteractionStyle::Asynchronous,
    )?;

    let instances = vec![primary, secondary];
    let output = if pretty {
        serde_json::to_string_pretty(&instances)
    } else {
        serde_json::to_string(&instances)
    };
    output.map_err(|e| CommonError::from(e).into())
}
