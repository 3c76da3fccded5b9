use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use stock_engine::{
    load_rules_file, ContentRenderer, HttpRenderer, HttpSettings, LogNotifier, MonitorContext,
    MonitorManager, PhantomJsRenderer, ScraperRegistry,
};
use stock_logging::{stock_error, stock_info, stock_warn};

use crate::config::{Cli, RendererKind};
use crate::state::AppState;
use crate::web::build_router;

/// Built-in scrapers plus any rules from `--scrapers`.
pub fn build_registry(cli: &Cli) -> Result<ScraperRegistry> {
    let mut registry =
        ScraperRegistry::with_builtin_scrapers().context("built-in scraper rules are invalid")?;
    if let Some(path) = &cli.scrapers {
        let rules = load_rules_file(path)
            .with_context(|| format!("failed to load scraper rules from {}", path.display()))?;
        for entry in rules {
            stock_info!("Registering scraper for domain '{}'", entry.domain);
            registry.register_rules(entry)?;
        }
    }
    Ok(registry)
}

pub fn build_renderer(kind: RendererKind) -> Result<Arc<dyn ContentRenderer>> {
    let renderer: Arc<dyn ContentRenderer> = match kind {
        RendererKind::Phantomjs => {
            Arc::new(PhantomJsRenderer::from_env().context("failed to set up phantomjs")?)
        }
        RendererKind::Http => Arc::new(
            HttpRenderer::new(HttpSettings::default()).context("failed to build HTTP client")?,
        ),
    };
    Ok(renderer)
}

pub fn build_manager(cli: &Cli) -> Result<MonitorManager> {
    let ctx = MonitorContext {
        registry: Arc::new(build_registry(cli)?),
        renderer: build_renderer(cli.renderer)?,
        notifier: Arc::new(LogNotifier),
        config: cli.monitor_config(),
    };
    Ok(MonitorManager::new(ctx))
}

/// One URL per line. Blank lines and lines starting with `#` are skipped.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read URL list {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Starts a worker per URL; failures are logged and skipped. Returns how many
/// workers were started.
pub fn seed_urls(manager: &MonitorManager, urls: &[String]) -> usize {
    urls.iter()
        .filter(|url| match manager.start_monitoring(url) {
            Ok(()) => true,
            Err(err) => {
                stock_warn!("Skipping startup URL: {}", err);
                false
            }
        })
        .count()
}

pub async fn run(cli: Cli) -> Result<()> {
    let manager = Arc::new(build_manager(&cli)?);
    stock_info!(
        "Scrapers registered for: {}",
        manager.registry().domains().join(", ")
    );

    if let Some(path) = &cli.urls {
        let urls = read_url_list(path)?;
        let started = seed_urls(&manager, &urls);
        stock_info!("Monitoring {} of {} URLs from {}", started, urls.len(), path.display());
    }

    let app = build_router(AppState {
        manager: manager.clone(),
    });
    let listener = tokio::net::TcpListener::bind(cli.listen_address)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen_address))?;
    stock_info!("Listening on {}", cli.listen_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    stock_info!("Shutting down {} workers", manager.worker_count());
    manager.shutdown().await;
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            stock_error!("Failed to listen for ctrl-c: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(err) => {
                stock_warn!("Failed to register SIGTERM handler: {}", err);
                ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}
