#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser as _;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = catppuccin_theme_toggle::CliArgs::parse();
    catppuccin_theme_toggle::run(args).await
}

// The browser entry point lives in the library (`wasm_bindgen(start)`).
#[cfg(target_arch = "wasm32")]
fn main() {}
