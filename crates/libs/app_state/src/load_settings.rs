use crate::AppSettings;
use color_eyre::eyre::Result;
use std::fs;
use std::path::{absolute, Path};
use tracing::debug;

/// Load settings from `config/settings.yaml`, with `APP__`-prefixed
/// environment variables taking precedence (e.g. `APP__API__PORT=8080`).
pub fn load_app_settings() -> Result<AppSettings> {
    // Load .env first so overrides from it are visible to the builder.
    dotenv::from_path(".env").ok();
    let config_path = Path::new("config/settings.yaml").canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path.clone()))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let mut settings = builder.build()?.try_deserialize::<AppSettings>()?;
    settings.storage.thumbnail_root = absolute(&settings.storage.thumbnail_root)?;
    fs::create_dir_all(&settings.storage.thumbnail_root)?;
    debug!("Loaded settings from {}", config_path.display());

    Ok(settings)
}
