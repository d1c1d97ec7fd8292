use std::time::Duration;

use html_to_pdf::utils::logging;
use html_to_pdf::{BatchConverter, ChromeEngine, Config, JobOutcome};

#[tokio::test]
#[ignore] // 需要本机安装 Chrome / Chromium：cargo test -- --ignored
async fn test_convert_with_real_browser() {
    logging::init(true);

    let dir = tempfile::tempdir().expect("创建临时目录失败");
    std::fs::write(
        dir.path().join("a.html"),
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><style>@page { size: A4; }</style></head>
<body><h1>スキルシート</h1><p>hello</p></body></html>"#,
    )
    .expect("写入 HTML 失败");

    let config = Config::from_env().expect("加载配置失败");
    let engine = ChromeEngine::launch(
        config.chrome_executable.as_deref(),
        config.idle_quiet(),
    )
    .await
    .expect("启动浏览器失败");

    let converter = BatchConverter::new(
        vec![dir.path().join("a.html"), dir.path().join("missing.html")],
        config.layout.clone(),
        Duration::from_secs(30),
    );
    let report = converter.run(&engine).await;
    engine.shutdown().await;

    assert!(matches!(report.outcomes[0], JobOutcome::Converted { .. }));
    assert!(matches!(report.outcomes[1], JobOutcome::NotFound { .. }));

    let pdf = std::fs::read(dir.path().join("a.pdf")).expect("读取 PDF 失败");
    assert!(pdf.starts_with(b"%PDF"), "输出应该是 PDF 文件");
}

#[tokio::test]
#[ignore]
async fn test_browser_launch() {
    logging::init(false);

    let config = Config::from_env().expect("加载配置失败");
    let result = ChromeEngine::launch(
        config.chrome_executable.as_deref(),
        config.idle_quiet(),
    )
    .await;

    assert!(result.is_ok(), "应该能够成功启动浏览器");
    if let Ok(engine) = result {
        engine.shutdown().await;
    }
}
