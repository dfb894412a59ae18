use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mock_server::Site;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let mut site = Site::sample();
    if let Ok(username) = std::env::var("WORDPRESS_USERNAME") {
        site.username = username;
    }
    if let Ok(password) = std::env::var("WORDPRESS_PASSWORD") {
        site.password = password;
    }

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, username = %site.username, "mock WordPress listening");
    mock_server::run_with(listener, site).await
}
