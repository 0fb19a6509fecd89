use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use roster_api::create_app;
use roster_core::{
    config::{SourceConfig, SourceLocation},
    AppConfig,
};
use roster_domain::{coerce::to_text, fields, AttributeView, RecordKind};
use roster_infrastructure::{
    FileRecordSource, HttpRecordSource, RecordSource, RecordStore, Snapshot,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::shutdown::wait_for_shutdown_signal;

/// 报告输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// validate 子命令参数
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub output: OutputFormat,
    pub show_attributes: bool,
}

/// 根据配置创建数据来源
pub fn build_source(config: &SourceConfig) -> Result<Arc<dyn RecordSource>> {
    let source: Arc<dyn RecordSource> = match config.location()? {
        SourceLocation::Remote(base_url) => Arc::new(
            HttpRecordSource::new(
                base_url,
                Duration::from_secs(config.request_timeout_seconds),
            )
            .context("创建HTTP数据来源失败")?,
        ),
        SourceLocation::Directory(dir) => Arc::new(FileRecordSource::new(dir)),
    };

    Ok(source)
}

/// 拉取、校验并打印报告，返回记录是否全部有效
pub async fn run_validate(config: &AppConfig, options: &ValidateOptions) -> Result<bool> {
    let source = build_source(&config.source)?;
    let store = RecordStore::new(source);

    info!(source = %store.source_description(), "开始拉取并校验记录");
    let snapshot = store.refresh().await.context("拉取记录失败")?;

    let report = match options.output {
        OutputFormat::Text => render_text_report(&snapshot, options.show_attributes),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&snapshot.result).context("序列化校验结果失败")?
        }
    };
    println!("{report}");

    if snapshot.result.is_valid {
        info!("所有记录校验通过");
    } else {
        warn!(summary = %snapshot.result.summary(), "记录存在校验问题");
    }

    Ok(snapshot.result.is_valid)
}

/// 启动HTTP服务，直到收到关闭信号
pub async fn run_serve(config: &AppConfig) -> Result<()> {
    let source = build_source(&config.source)?;
    let store = Arc::new(RecordStore::new(source));

    // 启动时拉取失败不影响服务启动，之后可通过 /api/refresh 重试
    if let Err(e) = store.refresh().await {
        error!("启动时拉取记录失败: {e}");
    }

    let app = create_app(Arc::clone(&store), &config.api);
    let listener = TcpListener::bind(&config.api.bind_address)
        .await
        .with_context(|| format!("绑定地址失败: {}", config.api.bind_address))?;

    info!("API服务器启动在: {}", config.api.bind_address);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("API服务器运行失败")?;

    info!("API服务器已关闭");
    Ok(())
}

/// 纯文本报告
pub fn render_text_report(snapshot: &Snapshot, show_attributes: bool) -> String {
    let result = &snapshot.result;
    let status = if result.is_valid { "passed" } else { "failed" };
    let mut lines = vec![format!("Validation {status}"), result.summary().to_string()];

    for kind in RecordKind::ALL {
        let issues = result.issue_lines(kind);
        if issues.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{kind} ({} issues)", issues.len()));
        lines.extend(issues.into_iter().map(|line| format!("  {line}")));
    }

    if show_attributes {
        lines.push(String::new());
        lines.push("Client attributes".to_string());
        for (idx, client) in snapshot.records.clients.iter().enumerate() {
            let view = AttributeView::from_value(client.get(fields::ATTRIBUTES_JSON));
            let client_id = client
                .get(fields::CLIENT_ID)
                .map(to_text)
                .unwrap_or_default();
            lines.push(format!("  Row {} ({client_id}):", idx + 1));
            lines.extend(view.render().lines().map(|line| format!("    {line}")));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_domain::{Record, RecordSet};

    fn snapshot() -> Snapshot {
        let clients = vec![Record::new()
            .with(fields::CLIENT_ID, "C1")
            .with(fields::CLIENT_NAME, "Acme")
            .with(fields::PRIORITY_LEVEL, "7")
            .with(fields::ATTRIBUTES_JSON, r#"{"tier":"gold"}"#)];
        Snapshot::new(RecordSet::new(clients, vec![], vec![]))
    }

    #[test]
    fn test_text_report() {
        let report = render_text_report(&snapshot(), false);

        assert!(report.starts_with("Validation failed"));
        assert!(report.contains("Clients: 1, Workers: 0, Tasks: 0"));
        assert!(report.contains("Clients (1 issues)"));
        assert!(report.contains("Row 1 — PriorityLevel: Priority must be 1-5"));
        assert!(!report.contains("Client attributes"));
    }

    #[test]
    fn test_text_report_layout() {
        let clean = Snapshot::new(RecordSet::default());
        assert_eq!(
            render_text_report(&clean, false),
            "Validation passed\nClients: 0, Workers: 0, Tasks: 0"
        );

        assert_eq!(
            render_text_report(&snapshot(), false),
            "Validation failed\n\
             Clients: 1, Workers: 0, Tasks: 0\n\
             \n\
             Clients (1 issues)\n  \
             Row 1 — PriorityLevel: Priority must be 1-5"
        );
    }

    #[test]
    fn test_text_report_with_attributes() {
        let report = render_text_report(&snapshot(), true);

        assert!(report.contains("Client attributes"));
        assert!(report.contains("Row 1 (C1):"));
        assert!(report.contains(r#""tier": "gold""#));
    }

    #[test]
    fn test_build_source_requires_location() {
        let config = SourceConfig::default();
        assert!(build_source(&config).is_err());

        let config = SourceConfig {
            input_dir: Some("data".to_string()),
            ..SourceConfig::default()
        };
        let source = build_source(&config).unwrap();
        assert!(source.describe().contains("data"));
    }

    #[tokio::test]
    async fn test_run_validate_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("clients.json"),
            r#"{"data":[{"ClientID":"C1","ClientName":"A","PriorityLevel":"2","RequestedTaskIDs":"T1"}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("workers.json"), "[]").unwrap();
        std::fs::write(
            dir.path().join("tasks.json"),
            r#"[{"Task ID":"T1","Task Name":"Build","Duration":3}]"#,
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.source.input_dir = Some(dir.path().to_string_lossy().to_string());
        let options = ValidateOptions {
            output: OutputFormat::Json,
            show_attributes: false,
        };

        assert!(run_validate(&config, &options).await.unwrap());

        std::fs::write(dir.path().join("workers.json"), "{\"data\": 5}").unwrap();
        assert!(run_validate(&config, &options).await.is_err());
    }
}
