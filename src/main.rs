use clap::Parser;
use quizdeck::{db::Db, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database path or `file:` URL.
    #[arg(long, env, default_value = "file:quiz.db")]
    database_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:3000")]
    address: String,

    /// Directory that uploaded profile images are written under.
    #[arg(long, env, default_value = "uploads")]
    uploads_dir: std::path::PathBuf,

    /// Drop the `Secure` cookie attribute for plain-http local development.
    #[arg(long, env, default_value_t = false)]
    insecure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "axum=info,quizdeck=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(args.database_url).await?;
    let state = AppState {
        db,
        uploads_dir: args.uploads_dir,
        secure_cookies: !args.insecure_cookies,
    };
    let routes = quizdeck::router(state);

    let address = args.address.parse::<std::net::SocketAddr>()?;
    tracing::info!("listening on {address}");
    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, routes).await?;

    Ok(())
}
