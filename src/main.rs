use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use folio::api;
use folio::assets::AssetLoader;
use folio::models::AppConfig;
use folio::server;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5001";

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - render HTML documents to PDF with headless Chrome")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render an HTML file directly to a PDF file
    Render {
        /// HTML file to render
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio API",
        description = "HTML to PDF conversion server",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_generate_pdf),
    components(schemas(api::ConvertRequest, api::ErrorResponse)),
    tags(
        (name = "Conversion", description = "HTML to PDF rendering")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Render { input, output }) => run_render_command(&input, &output).await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn asset_loader_from_env() -> AssetLoader {
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    AssetLoader::new(config_file)
}

/// Render a local HTML file to PDF (no server needed)
///
/// Goes through the same pipeline as `POST /generate-pdf`, so the scratch
/// directory, timeout, and page layout all apply.
async fn run_render_command(input: &Path, output: &Path) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let html = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;

    let state = server::create_app_state(Arc::new(asset_loader_from_env()))?;
    let pdf = state
        .converter
        .convert(html)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    tokio::fs::write(output, &pdf.bytes).await?;
    println!("Rendered {} ({} bytes)", output.display(), pdf.bytes.len());

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Folio v{VERSION} - HTML to PDF conversion server\n");

    println!("Environment Variables:");
    let default_bind = format!("{DEFAULT_BIND_ADDR} (default)");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or(&default_bind)
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    let config = AppConfig::load_from_assets(&asset_loader_from_env());

    println!("\nConfiguration ({config_source}):");
    println!("  scratch_dir            = {}", config.scratch_dir().display());
    println!("  max_concurrent_renders = {}", config.max_concurrent_renders);
    println!("  render_timeout_secs    = {}", config.render_timeout_secs);
    println!(
        "  chrome.path            = {}",
        config
            .chrome
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(auto-detect)".to_string())
    );
    println!("  chrome.sandbox         = {}", config.chrome.sandbox);
    println!(
        "  chrome.idle_timeout    = {}s (effective)",
        config.browser_config().idle_timeout_secs
    );

    let static_files = AssetLoader::list_static();
    println!("\nEmbedded static files ({}):", static_files.len());
    for file in &static_files {
        println!("  /static/{file}");
    }

    println!("\nCommands:");
    println!("  folio serve    Start the HTTP server");
    println!("  folio render   Render an HTML file to PDF");
    println!("\nRun 'folio --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let asset_loader = Arc::new(asset_loader_from_env());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    tracing::info!(
        config = ?asset_loader
            .config_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Config source"
    );

    let state = server::create_app_state(asset_loader)?;

    // Build router: shared routes plus production-only API docs
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Folio server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
