use anyhow::{bail, Context};
use image::GenericImageView;
use landmarks::{Dataset, LandmarksConfig};
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "landmarks.json";

/// Decodes every sample of one partition and reports the ones that fail
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = LandmarksConfig::from_file(&config_path)
        .with_context(|| format!("loading config {}", config_path))?;
    let dataset = config
        .load_dataset()
        .with_context(|| format!("building dataset from {}", config_path))?;
    info!(
        data_dir = %config.data_dir.display(),
        is_test = config.is_test,
        len = dataset.len(),
        "dataset ready"
    );

    let failures = (0..dataset.len())
        .into_par_iter()
        .filter(|&idx| match dataset.get(idx) {
            Ok((img, label)) => {
                let (width, height) = img.dimensions();
                info!(idx, width, height, label, "ok");
                false
            }
            Err(err) => {
                error!(idx, error = %err, "failed to load sample");
                true
            }
        })
        .count();

    if failures > 0 {
        bail!("{} of {} samples failed to load", failures, dataset.len());
    }
    info!("all {} samples loaded", dataset.len());
    Ok(())
}
