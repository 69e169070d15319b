//! Ensure command - extract the bundled Chrome and print its path

use crate::chrome::BinarySource;
use crate::config::Config;
use crate::error::PupprinteerResult;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the ensure command
pub async fn execute(config: &Config, ctx: &UiContext) -> PupprinteerResult<()> {
    let mut spinner = TaskSpinner::new(ctx);
    spinner.start("Preparing Chrome...");

    let resolved = match config.chrome.resolve_binary().await {
        Ok(resolved) => resolved,
        Err(e) => {
            if e.is_fatal_extraction() {
                spinner.stop_error("Chrome extraction failed");
            } else {
                spinner.stop_error("Chrome is not available");
            }
            return Err(e);
        }
    };

    match resolved.source {
        BinarySource::ReusedUnversioned => {
            spinner.stop_warn("Reusing a Chrome binary of unknown version");
            ui::step_warn_hint(
                ctx,
                "Bundled archive not found",
                "Run `pupprinteer clear` after restoring the bundle to re-extract",
            );
        }
        source => spinner.stop(&format!("Chrome ready ({})", source)),
    }

    println!("{}", resolved.executable_path.display());
    Ok(())
}
