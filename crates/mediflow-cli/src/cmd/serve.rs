use anyhow::Context;
use mediflow_core::config::Config;
use mediflow_core::source;
use mediflow_server::AppState;
use std::path::Path;
use std::sync::Arc;

pub fn run(root: &Path, port: Option<u16>, open_browser: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let port = port.unwrap_or(config.server.port);
    let name = config.project.name.clone();

    // Built before the runtime: the REST client blocks and must not be
    // created inside an async context.
    let source = source::open(root, &config).context("failed to open data source")?;
    let state = AppState::new(root.to_path_buf(), config, Arc::from(source));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("failed to bind port {port}"))?;
        let actual_port = listener.local_addr()?.port();
        println!("MediFlow dashboard for '{name}' → http://localhost:{actual_port}");

        let shutdown = state.clone();
        let result = tokio::select! {
            res = mediflow_server::serve_on(state, listener, open_browser) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        };

        shutdown.close().await;
        result
    })
}
