use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use docscan_core::identity::{Identity, IdentityProvider};
use docscan_core::media::SourceFile;
use docscan_core::upload::{ProgressReporter, UploadJob, UploadStep};
use indicatif::{ProgressBar, ProgressStyle};

use super::{build_sequencer, load_config};
use crate::summary;

#[derive(Args)]
pub struct UploadArgs {
    /// Input PNG, JPEG or PDF file
    pub file: PathBuf,

    /// Upload as this user id instead of the configured identity
    #[arg(long)]
    pub user: Option<String>,
}

/// Drives an indicatif bar from upload progress.
struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_step(&self, step: UploadStep) {
        self.bar.set_message(step.to_string());
    }

    fn progress(&self, percent: f32) {
        self.bar.set_position(percent.round() as u64);
    }
}

pub fn run(args: &UploadArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let identity = match &args.user {
        Some(user) => Some(Identity::new(user.clone())),
        None => config.identity_provider().current(),
    };
    let Some(identity) = identity else {
        bail!("No identity configured. Pass --user or set [identity] in the config");
    };

    let sequencer = build_sequencer(&config)?;
    summary::print_upload_summary(&config, &args.file, &identity);

    let source = SourceFile::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut job = UploadJob::new();
    if let Err(e) = sequencer.prepare(&mut job, source) {
        let message = job.message().map(|m| m.text.clone()).unwrap_or_default();
        bail!("{message} ({e})");
    }

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { bar: pb.clone() };

    match sequencer.save(&mut job, Some(&identity), &reporter) {
        Ok(record) => {
            pb.finish_with_message("Done");
            summary::print_record(&record);
            Ok(())
        }
        Err(e) => {
            pb.abandon_with_message("Failed");
            let message = job
                .message()
                .map(|m| m.text.clone())
                .unwrap_or_else(|| e.to_string());
            bail!(message)
        }
    }
}
