use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use bview_server::{BviewServer, ServerConfig};
use bview_store::{BucketStore, Store};
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.db),
        Command::Buckets => with_store(cli.db, cmd_buckets),
        Command::Get(args) => with_store(cli.db, |store| cmd_get(store, args)),
        Command::All(args) => with_store(cli.db, |store| cmd_all(store, args)),
        Command::Set(args) => with_store(cli.db, |store| cmd_set(store, args)),
        Command::Insert(args) => with_store(cli.db, |store| cmd_insert(store, args)),
        Command::Delete(args) => with_store(cli.db, |store| cmd_delete(store, args)),
    }
}

/// Open the database for a single command and close it afterwards.
fn with_store<F>(db: Option<PathBuf>, f: F) -> anyhow::Result<()>
where
    F: FnOnce(&dyn BucketStore) -> anyhow::Result<()>,
{
    let path = db.unwrap_or_else(|| ServerConfig::default().db_path);
    let store = Store::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let result = f(&store);
    store.close();
    result
}

fn cmd_serve(args: ServeArgs, db: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(db) = db {
        config.db_path = db;
    }
    tracing::debug!(?config, "resolved server config");

    let store = Arc::new(
        Store::open(&config.db_path)
            .with_context(|| format!("opening {}", config.db_path.display()))?,
    );
    println!(
        "bview on {} (db: {})",
        config.bind_addr.to_string().bold(),
        config.db_path.display()
    );

    let server = BviewServer::new(config, store.clone());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    drop(runtime);

    if let Ok(store) = Arc::try_unwrap(store) {
        store.close();
    }
    Ok(())
}

fn cmd_buckets(store: &dyn BucketStore) -> anyhow::Result<()> {
    let buckets = store.list_buckets()?;
    if buckets.is_empty() {
        println!("No buckets.");
    }
    for name in buckets {
        println!("{}", name.yellow());
    }
    Ok(())
}

fn cmd_get(store: &dyn BucketStore, args: KeyArgs) -> anyhow::Result<()> {
    let value = store.get(&args.bucket, &args.key)?;
    println!("{}", String::from_utf8_lossy(&value));
    Ok(())
}

fn cmd_all(store: &dyn BucketStore, args: BucketArgs) -> anyhow::Result<()> {
    for (key, value) in store.entries(&args.bucket)? {
        println!("{}: {}", key.cyan(), String::from_utf8_lossy(&value));
    }
    Ok(())
}

fn cmd_set(store: &dyn BucketStore, args: SetArgs) -> anyhow::Result<()> {
    store.set(&args.bucket, &args.key, args.value.as_bytes())?;
    println!("{} Set {}/{}", "✓".green(), args.bucket.yellow(), args.key.bold());
    Ok(())
}

fn cmd_insert(store: &dyn BucketStore, args: InsertArgs) -> anyhow::Result<()> {
    let id = store.insert(&args.bucket, args.value.as_bytes())?;
    println!("{} Inserted {}/{}", "✓".green(), args.bucket.yellow(), id.to_string().bold());
    Ok(())
}

fn cmd_delete(store: &dyn BucketStore, args: KeyArgs) -> anyhow::Result<()> {
    store.delete(&args.bucket, &args.key)?;
    println!("{} Deleted {}/{}", "✓".green(), args.bucket.yellow(), args.key.bold());
    Ok(())
}
