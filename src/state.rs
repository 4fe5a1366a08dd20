//! State and province codes served by the weather bucket.
//!
//! The bucket keys archives by a two-letter region code. Codes are parsed
//! into [`StateCode`] before they are spliced into a URL or a local file
//! name, so an unknown code fails fast instead of producing a bogus request.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use strum::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Error returned when a string is not one of the served region codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized state code '{code}'")]
pub struct StateError {
    /// The rejected input.
    pub code: String,
}

/// Region codes with an archive under `Weather/by_state_2/`.
///
/// Mixes US states, DC, Canadian provinces, and the `NaN` bucket holding
/// stations with no region assigned.
#[derive(
    Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter, Serialize,
)]
#[allow(missing_docs, clippy::upper_case_acronyms)]
pub enum StateCode {
    AB, // Alberta
    AL, // Alabama
    AR, // Arkansas
    AZ, // Arizona
    BC, // British Columbia
    CA, // California
    CO, // Colorado
    CT, // Connecticut
    DC, // District of Columbia
    DE, // Delaware
    FL, // Florida
    GA, // Georgia
    IA, // Iowa
    ID, // Idaho
    IL, // Illinois
    IN, // Indiana
    KS, // Kansas
    KY, // Kentucky
    LA, // Louisiana
    MA, // Massachusetts
    MB, // Manitoba
    MD, // Maryland
    ME, // Maine
    MI, // Michigan
    MN, // Minnesota
    MO, // Missouri
    MS, // Mississippi
    MT, // Montana
    NaN, // no region assigned
    NB, // New Brunswick
    NC, // North Carolina
    ND, // North Dakota
    NE, // Nebraska
    NH, // New Hampshire
    NJ, // New Jersey
    NM, // New Mexico
    NV, // Nevada
    NY, // New York
    OH, // Ohio
    OK, // Oklahoma
    ON, // Ontario
    OR, // Oregon
    PA, // Pennsylvania
    QC, // Quebec
    RI, // Rhode Island
    SC, // South Carolina
    SD, // South Dakota
    SK, // Saskatchewan
    TN, // Tennessee
    TX, // Texas
    UT, // Utah
    VA, // Virginia
    VT, // Vermont
    WA, // Washington
    WI, // Wisconsin
    WV, // West Virginia
    WY, // Wyoming
}

impl StateCode {
    /// Get a static string representation.
    #[must_use]
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// Parses a region code, rejecting anything outside the served set.
    ///
    /// Matching is case-sensitive: object keys in the bucket are.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] when `code` is not a served region.
    pub fn parse(code: &str) -> Result<Self, StateError> {
        Self::from_str(code).map_err(|_| StateError {
            code: code.to_string(),
        })
    }

    /// Default archive file name, `<code>.tgz`.
    #[must_use]
    pub fn archive_name(self) -> String {
        format!("{}.tgz", self.as_static_str())
    }

    /// Default extracted artifact name, `<code>.parquet`.
    #[must_use]
    pub fn artifact_name(self) -> String {
        format!("{}.parquet", self.as_static_str())
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_static_str())
    }
}
