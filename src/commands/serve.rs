use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;

use crate::{
    ServeArgs,
    build::{BuildResult, Builder, ChangeKind, FileWatcher, WatchEvent, WatchPaths, resolve_path},
    commands::load_config,
    config::Config,
};

pub async fn run(args: &ServeArgs) -> Result<(), anyhow::Error> {
    let loaded = load_config(args.config_file.as_deref())?;
    let config_path = loaded.config_path;
    let base_path = loaded.base_path;
    let config = loaded.config;

    // Build the site first
    println!("Building site...");
    let result = do_build(&config, &base_path)?;
    println!(
        "Built {} pages from {} articles",
        result.pages, result.articles
    );

    // Set up file watcher if enabled
    let _watcher_handle = if args.watch {
        let watch_paths = WatchPaths::new(
            resolve_path(&base_path, &config.paths.content),
            resolve_path(&base_path, &config.paths.templates),
            resolve_path(&base_path, &config.paths.static_dir),
            config_path.clone(),
        );

        match FileWatcher::new(&config.serve.watch, &watch_paths) {
            Ok(watcher) => {
                println!("Watching for changes...");

                let rebuild_config = config.clone();
                let rebuild_base = base_path.clone();
                let rebuild_config_path = config_path.clone();

                Some(tokio::task::spawn_blocking(move || {
                    rebuild_loop(watcher, rebuild_config, &rebuild_base, &rebuild_config_path)
                }))
            }
            Err(e) => {
                eprintln!("Warning: Failed to start file watcher: {}", e);
                None
            }
        }
    } else {
        None
    };

    // Create the static file server
    let serve_dir = ServeDir::new(&result.output_dir).append_index_html_on_directories(true);
    let app = Router::new().fallback_service(serve_dir);

    // Parse the address
    let bind = args.bind.clone().unwrap_or_else(|| config.serve.bind.clone());
    let port = args.port.unwrap_or(config.serve.port);
    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;

    // Determine the URL to display
    let display_host = if bind == "0.0.0.0" {
        "localhost"
    } else {
        &bind
    };
    let url = format!("http://{}:{}", display_host, port);

    println!("\nServing site at {}", url);
    println!("Press Ctrl+C to stop\n");

    // Open browser if requested
    if args.open
        && let Err(e) = open::that(&url)
    {
        eprintln!("Failed to open browser: {}", e);
    }

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Rebuild the site on every batch of changes until the watcher stops.
///
/// A config change reloads the config before rebuilding. A config that
/// no longer loads keeps the previous one.
fn rebuild_loop(watcher: FileWatcher, mut config: Config, base_path: &Path, config_path: &Path) {
    while let Some(event) = watcher.recv() {
        match event {
            WatchEvent::FilesChanged(changes) => {
                println!("\nDetected {} change(s), rebuilding...", changes.len());
                tracing::debug!(?changes, "rebuild triggered");

                if changes.contains(&ChangeKind::Config) {
                    match Config::load_from_arg(Some(config_path)) {
                        Ok(reloaded) => {
                            println!("Reloaded {}", config_path.display());
                            config = reloaded;
                        }
                        Err(e) => eprintln!("Config error, keeping previous config: {}", e),
                    }
                }

                match do_build(&config, base_path) {
                    Ok(result) => println!("Rebuilt {} pages", result.pages),
                    Err(e) => eprintln!("Build error: {}", e),
                }
            }
            WatchEvent::Error(e) => {
                eprintln!("Watch error: {}", e);
            }
        }
    }
}

/// Helper function to run the build
fn do_build(config: &Config, base_path: &Path) -> Result<BuildResult, anyhow::Error> {
    let builder = Builder::new(config.clone(), base_path.to_path_buf());
    Ok(builder.build()?)
}
