//! Descriptor normalization.
//!
//! Structured descriptors are rendered into media query strings:
//!
//! - Feature names go from camelCase to kebab-case (`maxWidth` -> `max-width`)
//! - Numbers on width/height features get a `px` unit (`1000` -> `1000px`)
//! - `true` renders the bare feature (`screen`), `false` renders `not screen`
//! - Everything else renders as `(feature: value)`
//! - Features of one set are joined with ` and `, sets of a list with `, `

use crate::descriptor::{FeatureSet, FeatureValue, QueryDescriptor};
use crate::error::{Error, Result};
use alloc::string::String;

/// Turns a query descriptor into a media query string.
pub trait Normalize {
    /// Normalizes `descriptor`. Raw strings are returned unchanged.
    fn normalize(&self, descriptor: &QueryDescriptor) -> Result<String>;
}

impl<F> Normalize for F
where
    F: Fn(&QueryDescriptor) -> Result<String>,
{
    fn normalize(&self, descriptor: &QueryDescriptor) -> Result<String> {
        self(descriptor)
    }
}

/// The default normalizer.
#[derive(Clone, Copy, Debug, Default)]
pub struct MediaQueryNormalizer;

impl Normalize for MediaQueryNormalizer {
    fn normalize(&self, descriptor: &QueryDescriptor) -> Result<String> {
        match descriptor {
            QueryDescriptor::Raw(query) => Ok(query.clone()),
            QueryDescriptor::Features(set) => feature_set_to_query(set),
            QueryDescriptor::AnyOf(sets) => {
                if sets.is_empty() {
                    return Err(Error::invalid_descriptor("query list is empty"));
                }
                let mut query = String::new();
                for (i, set) in sets.iter().enumerate() {
                    if i > 0 {
                        query.push_str(", ");
                    }
                    query.push_str(&feature_set_to_query(set)?);
                }
                Ok(query)
            }
        }
    }
}

/// Renders one feature set as a conjunction.
pub fn feature_set_to_query(set: &FeatureSet) -> Result<String> {
    if set.is_empty() {
        return Err(Error::invalid_descriptor("feature set is empty"));
    }

    let mut query = String::new();
    for (i, (name, value)) in set.iter().enumerate() {
        if name.is_empty() {
            return Err(Error::invalid_descriptor("feature name is empty"));
        }
        if i > 0 {
            query.push_str(" and ");
        }

        let feature = camel_to_kebab(name);
        match value {
            FeatureValue::Bool(true) => query.push_str(&feature),
            FeatureValue::Bool(false) => {
                query.push_str("not ");
                query.push_str(&feature);
            }
            FeatureValue::Number(n) => {
                if !n.is_finite() {
                    return Err(Error::invalid_descriptor(alloc::format!(
                        "feature {} has a non-finite value",
                        name
                    )));
                }
                let unit = if is_dimension(&feature) { "px" } else { "" };
                query.push_str(&alloc::format!("({}: {}{})", feature, n, unit));
            }
            FeatureValue::Text(text) => {
                if text.is_empty() {
                    return Err(Error::invalid_descriptor(alloc::format!(
                        "feature {} has an empty value",
                        name
                    )));
                }
                query.push_str(&alloc::format!("({}: {})", feature, text));
            }
        }
    }
    Ok(query)
}

/// `maxDeviceWidth` -> `max-device-width`.
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[inline]
fn is_dimension(feature: &str) -> bool {
    feature.ends_with("width") || feature.ends_with("height")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn normalize(descriptor: impl Into<QueryDescriptor>) -> Result<String> {
        MediaQueryNormalizer.normalize(&descriptor.into())
    }

    #[test]
    fn test_raw_passthrough() {
        assert_eq!(
            normalize("(max-width: 1000px)").unwrap(),
            "(max-width: 1000px)"
        );
        // Raw strings are not validated
        assert_eq!(normalize("").unwrap(), "");
    }

    #[test]
    fn test_camel_to_kebab() {
        assert_eq!(camel_to_kebab("maxWidth"), "max-width");
        assert_eq!(camel_to_kebab("maxDeviceWidth"), "max-device-width");
        assert_eq!(camel_to_kebab("screen"), "screen");
    }

    #[test]
    fn test_dimension_gets_px() {
        assert_eq!(
            normalize(FeatureSet::new().with("maxWidth", 1000)).unwrap(),
            "(max-width: 1000px)"
        );
        assert_eq!(
            normalize(FeatureSet::new().with("minDeviceHeight", 480.5)).unwrap(),
            "(min-device-height: 480.5px)"
        );
    }

    #[test]
    fn test_non_dimension_number_has_no_unit() {
        assert_eq!(
            normalize(FeatureSet::new().with("minResolution", 2)).unwrap(),
            "(min-resolution: 2)"
        );
        assert_eq!(
            normalize(FeatureSet::new().with("color", 8)).unwrap(),
            "(color: 8)"
        );
    }

    #[test]
    fn test_dimension_text_is_verbatim() {
        assert_eq!(
            normalize(FeatureSet::new().with("maxWidth", "40em")).unwrap(),
            "(max-width: 40em)"
        );
    }

    #[test]
    fn test_boolean_features() {
        assert_eq!(
            normalize(FeatureSet::new().with("screen", true)).unwrap(),
            "screen"
        );
        assert_eq!(
            normalize(FeatureSet::new().with("handheld", false)).unwrap(),
            "not handheld"
        );
    }

    #[test]
    fn test_conjunction() {
        let set = FeatureSet::new()
            .with("screen", true)
            .with("minWidth", 100)
            .with("orientation", "landscape");
        assert_eq!(
            normalize(set).unwrap(),
            "screen and (min-width: 100px) and (orientation: landscape)"
        );
    }

    #[test]
    fn test_any_of() {
        let sets = vec![
            FeatureSet::new().with("screen", true).with("maxWidth", 500),
            FeatureSet::new().with("print", true),
        ];
        assert_eq!(
            normalize(sets).unwrap(),
            "screen and (max-width: 500px), print"
        );
    }

    #[test]
    fn test_structured_matches_raw_equivalent() {
        assert_eq!(
            normalize(FeatureSet::new().with("maxWidth", 1000)).unwrap(),
            normalize("(max-width: 1000px)").unwrap()
        );
    }

    #[test]
    fn test_malformed_descriptors() {
        assert!(matches!(
            normalize(FeatureSet::new()),
            Err(Error::InvalidDescriptor { .. })
        ));
        assert!(matches!(
            normalize(Vec::<FeatureSet>::new()),
            Err(Error::InvalidDescriptor { .. })
        ));
        assert!(normalize(FeatureSet::new().with("", 1)).is_err());
        assert!(normalize(FeatureSet::new().with("maxWidth", f64::NAN)).is_err());
        assert!(normalize(FeatureSet::new().with("orientation", "")).is_err());
        assert!(normalize(vec![FeatureSet::new().with("print", true), FeatureSet::new()]).is_err());
    }

    #[test]
    fn test_closure_normalizer() {
        let upper = |d: &QueryDescriptor| -> Result<String> {
            d.as_raw()
                .map(|s| s.to_ascii_uppercase())
                .ok_or_else(|| Error::invalid_descriptor("raw only"))
        };
        assert_eq!(upper.normalize(&"print".into()).unwrap(), "PRINT");
        assert!(upper
            .normalize(&FeatureSet::new().with("print", true).into())
            .is_err());
    }
}
