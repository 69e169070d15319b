//! Bundled chrome-headless-shell extraction and version cache
//!
//! The release ships a platform-specific zip of `chrome-headless-shell`.
//! On first use it is unpacked into a cache directory under the OS temp
//! folder and its version is recorded, so later runs can skip extraction.
//!
//! # Cache Layout
//!
//! ```text
//! <temp>/pupprinteer-chrome/
//! ├── version.txt                         # version of the extracted binary
//! ├── chrome-temp.zip                     # scratch copy, only during extraction
//! ├── .lock                               # advisory lock for extraction
//! └── chrome-headless-shell-<platform>/
//!     └── chrome-headless-shell[.exe]
//! ```
//!
//! # Reuse Rules
//!
//! | Marker | Executable | Result |
//! |--------|------------|--------|
//! | missing | any | extract |
//! | different version | any | extract |
//! | same version | missing | extract |
//! | same version | present | reuse |

pub mod bundle;
pub mod extract;
pub mod location;
pub mod lock;
pub mod manager;
pub mod marker;
pub mod platform;
pub mod reuse;

pub use bundle::{default_bundle_dir, BundleReference, BUNDLE_ARCHIVE, BUNDLE_VERSION_FILE};
pub use extract::{extract, ExtractOutcome};
pub use location::{default_cache_root, CacheLocation};
pub use manager::{
    clear, ensure_extracted, inspect, BinarySource, CacheStatus, ResolvedBinary,
};
pub use marker::{read_marker, record_version};
pub use platform::PlatformId;
pub use reuse::can_reuse;
