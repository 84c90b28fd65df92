use axum::{middleware, routing::get, Router};
use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

mod config;
mod database;
mod error;
mod extractors;
mod logging;
mod menu;
mod models;
mod repository;
mod resource;

use config::AppConfig;
use repository::{BackendKind, RepositorySet};

#[derive(Parser, Debug)]
#[command(name = "biblioteca-server")]
#[command(about = "Library management CRUD service over PostgreSQL and MongoDB")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Run the interactive terminal menu instead of the HTTP server
    #[arg(long)]
    menu: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env values are merged into the environment before anything reads it
    dotenvy::dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::fmt::init();

    // Load configuration from specified file or use defaults
    let (mut app_config, using_defaults) =
        if args.config == "config.yaml" && !std::path::Path::new("config.yaml").exists() {
            println!("⚠️  No config.yaml found, using default configuration:");
            println!("   - PostgreSQL from POSTGRES_CONN (localhost fallback)");
            println!("   - MongoDB from MONGO_URL (localhost fallback)");
            println!("   - Server on 127.0.0.1:3000\n");
            (AppConfig::default_config(), true)
        } else {
            let config = AppConfig::load_from_file(&args.config)
                .map_err(|e| format!("Failed to load configuration: {}", e))?;
            (config, false)
        };

    // Override with command line arguments if provided
    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = args.host {
        app_config.server.host = host;
    }

    if !using_defaults {
        println!("🔧 Configuration loaded:");
        println!(
            "   Server: {}:{}",
            app_config.server.host, app_config.server.port
        );
        println!("   PostgreSQL: {}", app_config.postgres.url);
        println!(
            "   MongoDB: {} (database: {})",
            app_config.mongo.url, app_config.mongo.database
        );
    }

    if args.menu {
        run_menu(&app_config).await
    } else {
        run_server(&app_config).await
    }
}

/// Interactive mode: one backend, chosen at the prompt.
async fn run_menu(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    let Some(kind) = menu::choose_backend(&mut input) else {
        return Err("Opção inválida. Saindo.".into());
    };

    let repos = match kind {
        BackendKind::Postgres => {
            println!("Conectando ao PostgreSQL...");
            let pool = database::connect_postgres(&config.postgres).await?;
            repository::postgres::schema::init_schema(&pool).await?;
            RepositorySet::postgres(pool)
        }
        BackendKind::Mongo => {
            println!("Conectando ao MongoDB...");
            let db = database::connect_mongo(&config.mongo).await?;
            RepositorySet::mongo(db)
        }
    };

    menu::Menu::new(repos, input).run().await;
    Ok(())
}

/// Server mode: both backends connected, each under its own URL prefix.
async fn run_server(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pool = database::connect_postgres(&config.postgres).await?;
    repository::postgres::schema::init_schema(&pool).await?;
    let mongo_db = database::connect_mongo(&config.mongo).await?;

    let postgres_set = RepositorySet::postgres(pool);
    let mongo_set = RepositorySet::mongo(mongo_db);

    let app = Router::new()
        .nest("/postgres", resource::routes(postgres_set))
        .nest("/mongo", resource::routes(mongo_set))
        .route("/health", get(resource::health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(logging::logging_middleware));

    let host: std::net::IpAddr = config.server.host.parse().unwrap_or_else(|_| {
        eprintln!("Invalid host address: {}, using 127.0.0.1", config.server.host);
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, config.server.port));
    println!("🚀 Biblioteca server listening on {}", addr);
    println!("   📚 PostgreSQL routes: http://{}/postgres", addr);
    println!("   📚 MongoDB routes:    http://{}/mongo", addr);
    println!("   ❤️  Health check:      http://{}/health", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
