// ── Site identity ──
//
// SiteId unifies the integer primary keys the service uses today with
// string identifiers it may hand out later.

use serde::{Deserialize, Serialize};
use std::fmt;

use autoseo_api::WireId;

/// Identifier of a Site, stable for the site's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteId {
    Numeric(i64),
    Named(String),
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Named(s) => f.write_str(s),
        }
    }
}

impl From<WireId> for SiteId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Int(n) => Self::Numeric(n),
            WireId::Str(s) => Self::Named(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_keep_their_shape() {
        assert_eq!(SiteId::from(WireId::Int(42)), SiteId::Numeric(42));
        assert_eq!(
            SiteId::from(WireId::Str("site-42".into())),
            SiteId::Named("site-42".into())
        );
    }

    #[test]
    fn display_is_the_path_segment() {
        assert_eq!(SiteId::Numeric(7).to_string(), "7");
        assert_eq!(SiteId::Named("abc".into()).to_string(), "abc");
    }
}
