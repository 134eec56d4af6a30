mod app;
mod cli;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("sitewrap=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "sitewrap=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("sitewrap v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match sitewrap_config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(url) = args.url {
        config.target_url = url;
    }
    tracing::info!(name = %config.name, url = %config.target_url, "config loaded");

    if let Err(e) = sitewrap_platform::paths::ensure_dirs() {
        tracing::warn!("failed to create data directories: {e}");
    }

    let instance = if config.single_instance {
        match app::acquire() {
            app::Instance::Primary(guard) => Some(guard),
            app::Instance::Secondary => {
                tracing::info!("already running, handed off to the primary instance");
                return;
            }
        }
    } else {
        None
    };

    // Where a maximize-flag rewrite lands: the explicit path, or the
    // default location when a config file actually lives there.
    let config_path = args.config.or_else(|| {
        sitewrap_config::default_config_path()
            .ok()
            .filter(|p| p.exists())
    });

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut shell = app::ShellApp::new(config, config_path, instance);

    tracing::info!("entering event loop");
    if let Err(e) = event_loop.run_app(&mut shell) {
        tracing::error!("event loop error: {e}");
    }
    tracing::info!("shutdown complete");
}
