//! Strongly-typed identifiers and reference codes
//!
//! Claim lines and catalog entries are keyed by the codes that arrive on
//! remittance data (payer ids, CPT/HCPCS codes, CARC and RARC codes). Wrapping
//! them in newtypes keeps a payer id from being looked up in the procedure
//! table, and normalizes whitespace and case once at construction so catalog
//! joins are exact-match.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new_v7()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }
    };
}

macro_rules! define_code {
    ($(#[$meta:meta])* $name:ident, $normalize:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl AsRef<str>) -> Self {
                Self($normalize(raw.as_ref()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the normalized code is empty
            pub fn is_blank(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::new(raw)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl From<$name> for String {
            fn from(code: $name) -> String {
                code.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

fn trimmed(raw: &str) -> String {
    raw.trim().to_string()
}

fn upper(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

define_id!(RunId, "RUN");

define_code!(
    /// Claim identifier as issued by the billing system (case preserved)
    ClaimId,
    trimmed
);
define_code!(
    /// Payer identifier
    PayerId,
    upper
);
define_code!(
    /// CPT/HCPCS procedure code
    ProcedureCode,
    upper
);
define_code!(
    /// Group-qualified adjustment reason code, e.g. `CO-16` or `PR-1`
    DenialCode,
    upper
);
define_code!(
    /// Remittance advice remark code, e.g. `N362`
    RemarkCode,
    upper
);

impl DenialCode {
    /// The group-code prefix (`CO`, `PR`, `OA`, `PI`) when the code is group-qualified
    pub fn group_prefix(&self) -> Option<&str> {
        self.0.split_once('-').map(|(group, _)| group)
    }
}
