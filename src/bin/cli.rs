use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // reqwest is built without a bundled crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();
    lokalise_sync::cli::run().await
}
