//! Layered configuration for the momo memory plugin.
//!
//! Every field is resolved independently from six tiers, highest first:
//! 1. **Primary env** - `MOMO_PI_*`
//! 2. **Secondary env** - `MOMO_*`
//! 3. **Project** - `$CWD/.momo.jsonc`, else `$CWD/momo.jsonc`
//! 4. **Global pi** - `~/.pi/momo.jsonc`
//! 5. **Global momo** - `~/.momo/momo.jsonc`
//! 6. **Defaults**
//!
//! ## Files
//! Files use JSON with `//` and `/* */` comments and trailing commas. A file
//! that fails to read, parse, or contains an unknown key is ignored as a whole.
//!
//! ## Values
//! `baseUrl`, `apiKey` and `containerTag` expand `${NAME}` from the
//! environment; an unset `NAME` fails the whole resolution. Booleans and
//! bounded integers are coerced leniently and never fail.
//!
//! ## Environment Variables
//! - `MOMO_PI_BASE_URL` / `MOMO_BASE_URL`
//! - `MOMO_PI_API_KEY` / `MOMO_API_KEY`
//! - `MOMO_PI_CONTAINER_TAG` / `MOMO_CONTAINER_TAG`
//! - `MOMO_PI_AUTO_RECALL` / `MOMO_AUTO_RECALL`
//! - `MOMO_PI_AUTO_CAPTURE` / `MOMO_AUTO_CAPTURE`
//! - `MOMO_PI_MAX_RECALL_RESULTS` / `MOMO_MAX_RECALL_RESULTS`
//! - `MOMO_PI_PROFILE_FREQUENCY` / `MOMO_PROFILE_FREQUENCY`
//! - `MOMO_PI_DEBUG` / `MOMO_DEBUG`

mod env;
mod files;
mod jsonc;
mod loader;
mod normalize;
mod types;

pub use env::{EnvSource, ProcessEnv};
pub use files::{ConfigFile, DiscoveredFiles, FileRejection, FoundFile, load_config_file};
pub use jsonc::strip_jsonc;
pub use loader::{
    ConfigPaths, ConfigResolver, RawValue, Winner, load_config, resolve_config,
};
pub use normalize::{coerce_bool, coerce_bounded_int, interpolate, sanitize_container_tag};
pub use types::*;
