//! Check that every model loaded by a value-calculation service only needs
//! features the feature-calculation service provides.
//!
//! Both services publish an `/actuator/info` document. The feature-calculation
//! document lists the supported feature names per category, the
//! value-calculation document lists the loaded models and the feature names
//! each of them requires.
//!
//! ## Example
//!
//! ```no_run
//! use feature_check::{process_infos, Fetcher, Outcome};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let fetcher = Fetcher::builder().build();
//!     let fc_url = fetcher.info_url("prod-feature-calculation:8081")?;
//!     let vc_url = fetcher.info_url("prod-value-calculation:8081")?;
//!
//!     let outcome = process_infos(
//!         fetcher.fetch_infos(fc_url, vc_url),
//!         false,
//!         &mut std::io::stdout(),
//!     )
//!     .await?;
//!     assert_eq!(outcome, Outcome::Ok);
//!     Ok(())
//! }
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! * Apache License, Version 2.0
//!   ([LICENSE-APACHE](LICENSE-APACHE) or http://www.apache.org/licenses/LICENSE-2.0)
//! * MIT license
//!   ([LICENSE-MIT](LICENSE-MIT) or http://opensource.org/licenses/MIT)
//! at your option.

use std::future::Future;
use std::io::{self, Write};

pub use feature_check_model as model;

pub use args::*;
pub use check::*;
pub use fetch::*;
pub use report::*;

macro_rules! recv {
    ($url:expr, $len:expr, $content:expr) => {
        log::trace!(target: "feature_check::http", "<< {} [{} bytes] {}", $url, $len, $content);
    };
}

mod args;
mod check;
mod fetch;
mod report;

/// Environment variable which makes a failed check exit with [`EXIT_FAILED`].
pub const STRICT_ENV: &str = "FEATURE_CHECK_STRICT";

/// Exit code of a usage error.
pub const EXIT_USAGE: i32 = 1;

/// Exit code of a failed check in strict mode.
pub const EXIT_FAILED: i32 = 2;

/// Feature Check Error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO Error.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// HTTP Request Error.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Deserialize Error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Failed to parse URL.
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),

    /// Fetch task panicked or was cancelled.
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

    /// Feature-calculation or value-calculation info missing.
    #[error("infos not found: need one feature-calculation and one value-calculation info")]
    InfosNotFound,
}

/// Feature Check Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Overall outcome of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every model is compliant.
    Ok,
    /// At least one model requires an unsupported feature.
    Failed,
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Process exit code. A failed check is only signalled when `strict`.
    pub fn exit_code(&self, strict: bool) -> i32 {
        match self {
            Self::Failed if strict => EXIT_FAILED,
            _ => 0,
        }
    }
}

/// Await fetched infos, check every model and write the report.
///
/// The supported features are listed first when `verbose`.
pub async fn process_infos<F, W>(infos: F, verbose: bool, out: &mut W) -> Result<Outcome>
where
    F: Future<Output = Result<Infos>>,
    W: Write,
{
    let Infos { fc_info, vc_info } = infos.await?;
    let fc_feature_names = feature_names_from(&fc_info);

    let mut reporter = Reporter::new(out);
    if verbose {
        reporter.feature_names(&fc_feature_names)?;
    }

    let results = check(&vc_info.models, &fc_feature_names);
    log::debug!(
        "checked {} models against {} features",
        results.len(),
        fc_feature_names.len()
    );

    if contains_failures(&results) {
        reporter.failed(&results)?;
        Ok(Outcome::Failed)
    } else {
        reporter.ok()?;
        Ok(Outcome::Ok)
    }
}
