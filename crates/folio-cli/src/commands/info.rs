use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::catalog::LoadedCatalog;
use crate::summary::print_catalog_summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Catalog manifest (TOML) or directory of page images
    pub catalog: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let loaded = LoadedCatalog::open(&args.catalog)?;
    let probes = loaded.probe();
    print_catalog_summary(
        loaded.catalog.title(),
        &loaded.base.display().to_string(),
        &probes,
    );
    Ok(())
}
