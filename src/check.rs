use std::collections::HashSet;

use crate::model::{FeatureCalculationInfo, Model};

/// Unsupported features of one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// `loaded-from-file` of the model.
    pub model_path: String,
    /// Required but unsupported feature names, in required order.
    pub unsupported_features: Vec<String>,
}

impl CheckResult {
    pub fn is_compliant(&self) -> bool {
        self.unsupported_features.is_empty()
    }
}

/// Supported feature names of all categories, in category order.
pub fn feature_names_from(info: &FeatureCalculationInfo) -> Vec<String> {
    info.feature_names()
}

/// Check the required features of every model against `supported`.
pub fn check<S>(models: &[Model], supported: &[S]) -> Vec<CheckResult>
where
    S: AsRef<str>,
{
    let supported = supported.iter().map(AsRef::as_ref).collect::<HashSet<_>>();

    models
        .iter()
        .map(|model| {
            let unsupported_features = model
                .required_features()
                .into_iter()
                .filter(|name| !supported.contains(name.as_str()))
                .collect::<Vec<_>>();
            log::trace!(
                "{}: {} unsupported",
                model.loaded_from_file,
                unsupported_features.len()
            );

            CheckResult {
                model_path: model.loaded_from_file.clone(),
                unsupported_features,
            }
        })
        .collect()
}

/// Whether any model requires an unsupported feature.
pub fn contains_failures(results: &[CheckResult]) -> bool {
    results.iter().any(|result| !result.is_compliant())
}

/// `noun` with a plural `s` for more than one item.
pub fn plural_s<T>(noun: &str, items: &[T]) -> String {
    if items.len() > 1 {
        format!("{}s", noun)
    } else {
        noun.to_string()
    }
}
