use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use docscan_core::gallery::load_gallery;
use docscan_core::identity::{Identity, IdentityProvider};
use docscan_core::store::Backend;

use super::load_config;
use crate::summary;

#[derive(Args)]
pub struct GalleryArgs {
    /// List documents of this user id instead of the configured identity
    #[arg(long)]
    pub user: Option<String>,

    /// Print stored URLs for each document
    #[arg(long)]
    pub urls: bool,
}

pub fn run(args: &GalleryArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let identity = match &args.user {
        Some(user) => Some(Identity::new(user.clone())),
        None => config.identity_provider().current(),
    };

    let backend = Backend::from_config(&config.backend)
        .with_context(|| format!("Failed to open backend {}", config.backend))?;
    let state = load_gallery(backend.metadata.as_ref(), identity.as_ref())?;

    summary::print_gallery(&state, identity.as_ref(), args.urls);
    Ok(())
}
