use anyhow::Context;
use clap::Parser;
use get_shit_done::core::app::USAGE;
use get_shit_done::core::Environment;
use get_shit_done::utils::logger;
use get_shit_done::{
    App, CliConfig, DesktopNotifier, DomainStore, GsdError, HostsBlockManager, LocalStorage,
    SystemCacheRefresher, SystemEnvironment,
};
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if std::env::var("GSD_LOG_FORMAT").as_deref() == Ok("json") {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let env = SystemEnvironment::new();
    if !env.is_privileged() {
        exit_with_error(&GsdError::PermissionDenied {
            message: "Please run as root".to_string(),
        });
    }

    let settings = config
        .settings(&env)
        .unwrap_or_else(|e| exit_with_error(&e));

    let storage = LocalStorage::new();
    let mut app = App::new(
        DomainStore::new(storage.clone(), settings.store_path.clone()),
        HostsBlockManager::new(storage, SystemCacheRefresher::new(), settings.hosts.clone()),
        DesktopNotifier::new(),
        io::stdout().lock(),
        settings.dry_run,
    );

    // A failed first-run setup surfaces again when the mode reads the store.
    if let Err(e) = app.prepare() {
        tracing::warn!("Could not initialize {}: {}", settings.store_path.display(), e);
    }

    let mode = config.mode().unwrap_or_else(|e| exit_with_error(&e));
    if let Err(e) = app.run(&mode) {
        exit_with_error(&e);
    }

    app.into_output().flush().context("failed to flush stdout")?;
    Ok(())
}

fn exit_with_error(err: &GsdError) -> ! {
    tracing::error!("{} (category: {:?})", err, err.category());
    eprintln!("{}", err.user_friendly_message());
    eprintln!("{}", USAGE);
    std::process::exit(err.exit_code());
}
