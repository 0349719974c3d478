//! Resolves the startup settings the way the web application does, installs
//! logging from them and prints the record with secrets redacted.

use clap::{Parser, ValueEnum};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use settings::logging::bootstrap_subscriber;
use settings::{CacheSettings, EnvSettings, InvocationContext, Settings};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Summary,
}

#[derive(Debug, Parser)]
#[command(version, about = "Resolve and print the web application settings")]
struct Args {
    /// Resolve as if a test harness launched the process.
    #[arg(long)]
    testing: bool,
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Connect to the configured database and report its server version.
    #[arg(long)]
    ping_database: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = tracing::subscriber::with_default(bootstrap_subscriber(), || resolve(args.testing))?;
    settings.logging.init_tracing()?;
    info!(mode = %settings.mode, debug = settings.debug, "settings resolved");
    for advisory in &settings.advisories {
        warn!(%advisory, "settings advisory");
    }

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&settings)?),
        Format::Summary => println!("{}", summary(&settings)),
    }

    if args.ping_database {
        ping_database(&settings).await?;
    }
    Ok(())
}

fn resolve(testing: bool) -> anyhow::Result<Settings> {
    if !testing {
        return Ok(Settings::from_env()?);
    }
    let env = EnvSettings::new()?;
    Ok(Settings::resolve(&env, InvocationContext::test_runner()))
}

fn summary(settings: &Settings) -> String {
    let cache = match &settings.cache {
        CacheSettings::Redis { location, .. } => format!("redis {location}"),
        CacheSettings::LocalMemory { .. } => "local memory".to_string(),
    };
    let db = &settings.database;
    format!(
        "mode={} debug={} database={} {}@{}:{} cache={} broker={} storage={} production={}",
        settings.mode,
        settings.debug,
        db.engine,
        db.name,
        db.host.as_deref().unwrap_or("-"),
        db.port.map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
        cache,
        settings.task_queue.broker_url,
        if settings.file_storage.is_remote() { "s3" } else { "local" },
        settings.is_production(),
    )
}

async fn ping_database(settings: &Settings) -> anyhow::Result<()> {
    let Some(config) = settings.database.to_pg_config() else {
        info!(engine = %settings.database.engine, "database is not reachable over the network, skipping ping");
        return Ok(());
    };

    let tls_connector = TlsConnector::builder().build()?;
    let connector = MakeTlsConnector::new(tls_connector);

    let (client, connection) = config.connect(connector).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!(%e, "connection error");
        }
    });

    let row = client.query_one("SELECT version()", &[]).await?;
    let version: String = row.get(0);
    info!(%version, "database reachable");
    Ok(())
}
