use clap::Parser;
use qstock_core::{config, PatternIndex};
use qstock_server::api::create_router;
use qstock_server::api::handlers::AppState;
use qstock_server::api::metrics;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "qstock",
    about = "Find similar historical stock patterns using quantum feature embeddings"
)]
struct Args {
    /// Address to bind
    #[arg(long, env = "QSTOCK_HOST", default_value = config::DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "QSTOCK_PORT", default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Fitted scaler artifact (JSON)
    #[arg(long, env = "QSTOCK_SCALER", default_value = config::DEFAULT_SCALER_PATH)]
    scaler: PathBuf,

    /// Embedding bundle artifact (JSON): matrix, feature names, qubit count, records
    #[arg(long, env = "QSTOCK_FEATURES", default_value = config::DEFAULT_FEATURES_PATH)]
    features: PathBuf,

    /// Directory with the front-end served at `/`
    #[arg(long, env = "QSTOCK_STATIC_DIR", default_value = config::DEFAULT_STATIC_DIR)]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("qstock_server=info".parse()?)
                .add_directive("qstock_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.port == 0 {
        eprintln!("Error: port must be > 0");
        std::process::exit(1);
    }

    let index = match PatternIndex::open(&args.scaler, &args.features) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("{}", "=".repeat(80));
            eprintln!("ERROR: Model files could not be loaded: {}", e);
            eprintln!(
                "Run the feature-building script to generate '{}' and '{}'.",
                args.scaler.display(),
                args.features.display()
            );
            eprintln!("{}", "=".repeat(80));
            std::process::exit(1);
        }
    };

    if !args.static_dir.join("index.html").is_file() {
        tracing::warn!(
            static_dir = %args.static_dir.display(),
            "No index.html in static directory; front-end will return 404"
        );
    }

    let prometheus_handle =
        metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;
    metrics::record_index_gauges(&index);

    let records = index.len();
    let n_qubits = index.n_qubits();
    let state = AppState {
        index: Arc::new(index),
        prometheus_handle,
        static_dir: args.static_dir.clone(),
        start_time: Instant::now(),
    };
    let app = create_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %addr,
        records,
        n_qubits,
        static_dir = %args.static_dir.display(),
        "qstock ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    tracing::info!("Shutting down gracefully, draining in-flight requests...");
}
