pub mod calculate;
pub mod compare;
pub mod init;
pub mod list;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use admitcalc_core::catalog::Catalog;
use admitcalc_core::config::AdmitConfig;

/// Catalog from the command line, else from config, else the built-in one.
pub(crate) fn load_catalog(cli_path: Option<&Path>, config: &AdmitConfig) -> Result<Catalog> {
    match cli_path.or(config.catalog.as_deref()) {
        Some(path) => {
            tracing::debug!("using catalog {}", path.display());
            Catalog::load(path)
        }
        None => Catalog::builtin(),
    }
}
