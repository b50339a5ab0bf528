//! Product listing sort modes.
//!
//! Sort parameters arrive as query strings. They are parsed into closed enums
//! here so that only known orderings ever reach the query builder.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for an unrecognized sort parameter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {param} '{value}', expected one of: {expected}")]
pub struct SortParseError {
    /// Query parameter name.
    pub param: &'static str,
    /// Value that was rejected.
    pub value: String,
    /// Accepted values, comma separated.
    pub expected: &'static str,
}

/// Which product attribute a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ProductSort {
    /// Newest first, ignoring the requested direction.
    #[default]
    Default,
    /// By unit price.
    Price,
    /// By creation time.
    Date,
    /// Favorites first, then newest first; ignores the requested direction.
    Favorite,
}

impl ProductSort {
    const EXPECTED: &'static str = "price, date, createdAt, favorite";

    /// Parse an optional `sortBy` query value.
    ///
    /// Missing or blank values yield [`ProductSort::Default`]. `createdAt` is
    /// accepted as an alias for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`SortParseError`] for any other value.
    pub fn parse_param(value: Option<&str>) -> Result<Self, SortParseError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::Default),
            Some(v) => v.parse(),
        }
    }
}

impl std::str::FromStr for ProductSort {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(Self::Price),
            "date" | "createdAt" => Ok(Self::Date),
            "favorite" => Ok(Self::Favorite),
            "default" => Ok(Self::Default),
            other => Err(SortParseError {
                param: "sortBy",
                value: other.to_owned(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Default => "default",
            Self::Price => "price",
            Self::Date => "date",
            Self::Favorite => "favorite",
        };
        f.write_str(s)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse an optional `sortOrder` query value, falling back to `default`.
    ///
    /// # Errors
    ///
    /// Returns [`SortParseError`] for anything other than `asc`/`desc`
    /// (case-insensitive).
    pub fn parse_param(value: Option<&str>, default: Self) -> Result<Self, SortParseError> {
        match value.map(str::trim) {
            None | Some("") => Ok(default),
            Some(v) => v.parse(),
        }
    }

    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(SortParseError {
                param: "sortOrder",
                value: s.to_owned(),
                expected: "asc, desc",
            })
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_sort_defaults() {
        assert_eq!(ProductSort::parse_param(None).unwrap(), ProductSort::Default);
        assert_eq!(
            ProductSort::parse_param(Some("  ")).unwrap(),
            ProductSort::Default
        );
    }

    #[test]
    fn test_product_sort_known_values() {
        assert_eq!(
            ProductSort::parse_param(Some("price")).unwrap(),
            ProductSort::Price
        );
        assert_eq!(
            ProductSort::parse_param(Some("createdAt")).unwrap(),
            ProductSort::Date
        );
        assert_eq!(
            ProductSort::parse_param(Some("favorite")).unwrap(),
            ProductSort::Favorite
        );
    }

    #[test]
    fn test_product_sort_rejects_unknown_column() {
        let err = ProductSort::parse_param(Some("name; DROP TABLE product")).unwrap_err();
        assert_eq!(err.param, "sortBy");
        assert!(err.to_string().contains("invalid sortBy"));
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(
            SortOrder::parse_param(None, SortOrder::Desc).unwrap(),
            SortOrder::Desc
        );
        assert_eq!(
            SortOrder::parse_param(Some("ASC"), SortOrder::Desc).unwrap(),
            SortOrder::Asc
        );
        assert!(SortOrder::parse_param(Some("up"), SortOrder::Asc).is_err());
        assert_eq!(SortOrder::Desc.as_sql(), "DESC");
    }
}
