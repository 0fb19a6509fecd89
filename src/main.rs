use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use roster_core::{init_logging, AppConfig, LogFormat};
use tracing::info;

mod app;
mod shutdown;

use app::{OutputFormat, ValidateOptions};

fn cli() -> Command {
    Command::new("roster")
        .version(env!("CARGO_PKG_VERSION"))
        .about("客户/Worker/任务记录校验服务")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("配置文件路径（默认查找 config/roster.toml、roster.toml）")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("日志级别，覆盖配置文件")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .global(true),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("日志格式，覆盖配置文件")
                .value_parser(["json", "pretty"])
                .global(true),
        )
        .subcommand(
            Command::new("validate")
                .about("拉取三类记录，校验并输出报告")
                .arg(
                    Arg::new("input-dir")
                        .long("input-dir")
                        .value_name("DIR")
                        .help("包含 clients.json、workers.json、tasks.json 的目录"),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("提供 /clients、/workers、/tasks 的服务地址"),
                )
                .group(ArgGroup::new("source").args(["input-dir", "base-url"]))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FORMAT")
                        .help("报告格式")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    Arg::new("show-attributes")
                        .long("show-attributes")
                        .help("同时输出每个客户的 AttributesJSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("serve").about("启动HTTP API服务").arg(
                Arg::new("bind")
                    .short('b')
                    .long("bind")
                    .value_name("ADDR")
                    .help("监听地址，覆盖 api.bind_address"),
            ),
        )
}

/// 命令行参数覆盖数据来源配置
fn apply_source_overrides(config: &mut AppConfig, matches: &ArgMatches) {
    if let Some(dir) = matches.get_one::<String>("input-dir") {
        config.source.input_dir = Some(dir.clone());
        config.source.base_url = None;
    }
    if let Some(url) = matches.get_one::<String>("base-url") {
        config.source.base_url = Some(url.clone());
        config.source.input_dir = None;
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let matches = cli().get_matches();

    let config_path = matches.get_one::<String>("config");
    let mut config = match config_path {
        Some(path) => AppConfig::load(Some(path))
            .with_context(|| format!("加载配置文件失败: {path}"))?,
        None => AppConfig::load(None).context("加载配置失败")?,
    };

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.observability.log_level = level.clone();
    }
    if let Some(format) = matches.get_one::<String>("log-format") {
        config.observability.log_format = format.clone();
    }

    let log_format: LogFormat = config.observability.log_format.parse()?;
    init_logging(&config.observability.log_level, log_format)?;

    match matches.subcommand() {
        Some(("validate", sub)) => {
            apply_source_overrides(&mut config, sub);
            let options = ValidateOptions {
                output: match sub.get_one::<String>("output").map(String::as_str) {
                    Some("json") => OutputFormat::Json,
                    _ => OutputFormat::Text,
                },
                show_attributes: sub.get_flag("show-attributes"),
            };

            let is_valid = app::run_validate(&config, &options).await?;
            Ok(if is_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(("serve", sub)) => {
            if let Some(bind) = sub.get_one::<String>("bind") {
                config.api.bind_address = bind.clone();
            }
            config.api.validate()?;

            info!("启动记录校验服务");
            app::run_serve(&config).await?;
            info!("记录校验服务已退出");
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}
