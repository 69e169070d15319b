//! Confirmation prompt with non-interactive fallback

use super::context::UiContext;
use crate::error::{PupprinteerError, PupprinteerResult};

/// Ask for confirmation; `--yes` approves, non-interactive returns `default`
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> PupprinteerResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| PupprinteerError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| PupprinteerError::User(format!("Prompt failed: {}", e)))
}
