//! Data model of the `/actuator/info` documents served by the
//! feature-calculation and value-calculation services.
//!
//! ## Example
//!
//! ```
//! use feature_check_model::Info;
//!
//! let info = Info::from_value(serde_json::json!({
//!     "application-name": "feature-calculation",
//!     "features": {
//!         "Feature1": ["Foo.Bar.Baz", "What.Ever"],
//!         "Feature2": ["node"]
//!     }
//! }))
//! .unwrap();
//!
//! if let Info::FeatureCalculation(info) = info {
//!     assert_eq!(info.feature_names(), vec!["Foo.Bar.Baz", "What.Ever", "node"]);
//! }
//! ```

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

/// Discriminant field shared by both documents.
pub const APPLICATION_NAME: &str = "application-name";

/// Discriminant value of [`FeatureCalculationInfo`].
pub const FEATURE_CALCULATION: &str = "feature-calculation";

/// Discriminant value of [`ValueCalculationInfo`].
pub const VALUE_CALCULATION: &str = "value-calculation";

/// Info document, tagged by `application-name`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "application-name")]
pub enum Info {
    /// `application-name: feature-calculation`
    #[serde(rename = "feature-calculation")]
    FeatureCalculation(FeatureCalculationInfo),

    /// `application-name: value-calculation`
    #[serde(rename = "value-calculation")]
    ValueCalculation(ValueCalculationInfo),

    /// Any other application.
    #[serde(other)]
    Unknown,
}

impl Info {
    /// Narrow an arbitrary JSON document.
    ///
    /// A document without an `application-name` string is [`Info::Unknown`];
    /// a document with a known name but the wrong shape is an error.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        match value.get(APPLICATION_NAME) {
            Some(Value::String(..)) => serde_json::from_value(value),
            _ => Ok(Self::Unknown),
        }
    }

    /// The `application-name` this variant stands for.
    pub fn application_name(&self) -> Option<&'static str> {
        match self {
            Self::FeatureCalculation(..) => Some(FEATURE_CALCULATION),
            Self::ValueCalculation(..) => Some(VALUE_CALCULATION),
            Self::Unknown => None,
        }
    }
}

/// Feature categories in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories(Vec<(String, Vec<String>)>);

impl Categories {
    /// Iterate `(category, feature names)` in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<(String, Vec<String>)>> for Categories {
    fn from(v: Vec<(String, Vec<String>)>) -> Self {
        Self(v)
    }
}

struct CategoriesVisitor;

impl<'de> Visitor<'de> for CategoriesVisitor {
    type Value = Categories;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of category name to feature names")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut categories = Vec::with_capacity(map.size_hint().unwrap_or_default());
        while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
            categories.push(entry);
        }
        Ok(Categories(categories))
    }
}

impl<'de> Deserialize<'de> for Categories {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CategoriesVisitor)
    }
}

/// Info of the feature-calculation service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeatureCalculationInfo {
    #[serde(rename = "application-version")]
    pub application_version: Option<String>,
    pub features: Categories,
}

impl FeatureCalculationInfo {
    /// All feature names of all categories, in category order, duplicates kept.
    pub fn feature_names(&self) -> Vec<String> {
        self.features
            .iter()
            .flat_map(|(_, names)| names.iter().cloned())
            .collect()
    }
}

/// Info of the value-calculation service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValueCalculationInfo {
    #[serde(rename = "application-version")]
    pub application_version: Option<String>,
    #[serde(default)]
    pub models: Vec<Model>,
}

/// Model loaded by the value-calculation service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Model {
    #[serde(rename = "loaded-from-file")]
    pub loaded_from_file: String,
    #[serde(rename = "feature-names")]
    pub feature_names: String,
    pub created: Option<String>,
    pub version: Option<String>,
}

impl Model {
    /// Comma separated `feature-names`, trimmed.
    ///
    /// Empty pieces are kept, so `""` yields `[""]`.
    pub fn required_features(&self) -> Vec<String> {
        self.feature_names
            .split(',')
            .map(|it| it.trim().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fc_json() -> Value {
        json!({
            "application-name": "feature-calculation",
            "application-version": "1.1",
            "features": {
                "Feature1": ["Foo.Bar.Baz", "What.Ever", "Age.Max", "duplicate"],
                "Feature2": ["node", "for", "newbies", "duplicate"]
            }
        })
    }

    #[test]
    fn test_feature_calculation() {
        let info = Info::from_value(fc_json()).unwrap();
        let info = match info {
            Info::FeatureCalculation(info) => info,
            other => panic!("{:?}", other),
        };
        assert_eq!(info.application_version.as_deref(), Some("1.1"));
        assert_eq!(info.features.len(), 2);
        assert_eq!(
            info.feature_names(),
            vec![
                "Foo.Bar.Baz",
                "What.Ever",
                "Age.Max",
                "duplicate",
                "node",
                "for",
                "newbies",
                "duplicate"
            ]
        );
    }

    #[test]
    fn test_category_document_order() {
        let info: FeatureCalculationInfo = serde_json::from_str(
            r#"{"features": {"Zeta": ["z"], "Alpha": ["a"], "Mid": ["m", "a"]}}"#,
        )
        .unwrap();
        let keys = info.features.iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(info.feature_names(), vec!["z", "a", "m", "a"]);
    }

    #[test]
    fn test_value_calculation() {
        let info = Info::from_value(json!({
            "application-name": "value-calculation",
            "application-version": "1.1",
            "models": [{
                "feature-names": "foo, bar, baz",
                "created": "2018-08-16T11:00:00.000Z",
                "loaded-from-file": "/home/models/model.zip",
                "version": "1.0"
            }]
        }))
        .unwrap();
        let info = match info {
            Info::ValueCalculation(info) => info,
            other => panic!("{:?}", other),
        };
        assert_eq!(info.models.len(), 1);
        let model = &info.models[0];
        assert_eq!(model.loaded_from_file, "/home/models/model.zip");
        assert_eq!(model.version.as_deref(), Some("1.0"));
        assert_eq!(model.required_features(), vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn test_unknown() {
        let info = Info::from_value(json!({"application-name": "other"})).unwrap();
        assert_eq!(info, Info::Unknown);
        assert_eq!(info.application_name(), None);

        let info = Info::from_value(json!({"features": {}})).unwrap();
        assert_eq!(info, Info::Unknown);

        let info = Info::from_value(json!([1, 2])).unwrap();
        assert_eq!(info, Info::Unknown);
    }

    #[test]
    fn test_known_name_wrong_shape() {
        let result = Info::from_value(json!({
            "application-name": "feature-calculation",
            "features": ["not", "a", "map"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_required_features_blank() {
        let model = Model {
            loaded_from_file: "/m.zip".into(),
            feature_names: "".into(),
            ..Default::default()
        };
        assert_eq!(model.required_features(), vec![""]);

        let model = Model {
            feature_names: " a ,, b,a ".into(),
            ..Default::default()
        };
        assert_eq!(model.required_features(), vec!["a", "", "b", "a"]);
    }
}
