use std::path::Path;

use agdata_server::{AgDataServer, ServerConfig};
use agdata_store::{RecordStore, SqliteRecordStore};
use anyhow::Context;
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let base = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Serve(args) => cmd_serve(resolve_serve(base, &args)),
        Command::InitDb(args) => cmd_init_db(resolve_db(base, &args)),
        Command::Config => cmd_config(&base),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

fn resolve_db(mut config: ServerConfig, args: &DbArgs) -> ServerConfig {
    if let Some(db) = &args.db {
        config.database.path = db.clone();
    }
    config
}

fn resolve_serve(config: ServerConfig, args: &ServeArgs) -> ServerConfig {
    let mut config = resolve_db(config, &args.db);
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    config
}

fn cmd_serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!(db = %config.database.path.display(), "opening record store");
    let server = AgDataServer::open(config).context("opening record store")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_init_db(config: ServerConfig) -> anyhow::Result<()> {
    let path = config.database.path.clone();
    let store = SqliteRecordStore::open(config.database).context("opening record store")?;
    let count = store.count()?;
    println!(
        "{} Database ready at {} ({} records)",
        "✓".green().bold(),
        path.display().to_string().bold(),
        count
    );
    Ok(())
}

fn cmd_config(config: &ServerConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
