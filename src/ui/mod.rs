//! Terminal output helpers
//!
//! Uses `cliclack` on an interactive terminal and plain `[OK]`/`[WARN]`
//! lines otherwise. Everything here writes to stderr.

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{key_value, key_value_status, section, step_ok, step_ok_detail, step_warn_hint};
pub use progress::TaskSpinner;
pub use prompts::confirm;
