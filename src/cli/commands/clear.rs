//! Clear command - remove the extracted Chrome cache

use crate::chrome;
use crate::cli::args::ClearArgs;
use crate::config::Config;
use crate::error::PupprinteerResult;
use crate::ui::{self, UiContext};

/// Execute the clear command
pub async fn execute(args: ClearArgs, config: &Config, ctx: &UiContext) -> PupprinteerResult<()> {
    let location = config.chrome.location()?;
    let root = location.cache_root.display().to_string();

    if !location.cache_root.exists() {
        ui::step_ok_detail(ctx, "Nothing to clear", &root);
        return Ok(());
    }

    let ctx = ctx.clone().with_auto_yes(args.yes);
    let confirmed = ui::confirm(&ctx, &format!("Remove Chrome cache at {}?", root), false).await?;
    if !confirmed {
        ui::step_warn_hint(&ctx, "Cache left in place", "Pass --yes to skip confirmation");
        return Ok(());
    }

    if chrome::clear(&location).await? {
        ui::step_ok(&ctx, &format!("Removed Chrome cache at {}", root));
    } else {
        ui::step_ok_detail(&ctx, "Nothing to clear", &root);
    }

    Ok(())
}
