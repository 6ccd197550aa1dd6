// src/bin/generate_qr.rs

//! Offline batch QR generation: writes one PNG per registered group to
//! the static output directory, encoding `{QR_BASE_URL}/g/{code}`.

use dotenvy::dotenv;
use quiz_backend::config::Config;
use quiz_backend::models::group::GroupRegistry;
use quiz_backend::qr;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use url::Url;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.rust_log))
        .with_target(false)
        .init();

    // Validate and normalize the configured base URL up front.
    let base = Url::parse(&config.qr_base_url)?;
    let base = base.as_str().trim_end_matches('/');

    let out_dir = Path::new(&config.qr_output_dir);
    fs::create_dir_all(out_dir)?;

    let groups = GroupRegistry::default();
    for code in groups.codes() {
        let target = format!("{}/g/{}", base, code);
        let png = qr::render_png(&target)?;
        let path = out_dir.join(format!("{}.png", code));
        fs::write(&path, png)?;
        tracing::info!("Created {} -> {}", path.display(), target);
    }

    Ok(())
}
