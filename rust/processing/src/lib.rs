// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Site analysis pipeline: buildable envelope plus ground-level sun
//! exposure around it, with a combined JSON report.

pub mod error;
pub mod options;
pub mod pipeline;

pub use error::{Error, Result};
pub use options::{ShadowSettings, SiteAnalysisOptions};
pub use pipeline::{analyze_site, analyze_sites, site_report, SiteAnalysis, SiteRequest};
