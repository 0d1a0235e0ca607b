// psi-core/src/categorizers/categorical_categorizer.rs
//! A `Categorizer` that treats every raw value (missing included) as its own
//! category. No binning parameter is consulted.
//! License: MIT OR APACHE 2.0

use crate::category::Category;
use crate::engine::Categorizer;
use crate::sample::{DataKind, Sample};

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalCategorizer;

impl CategoricalCategorizer {
    pub fn new() -> Self {
        Self
    }
}

impl Categorizer for CategoricalCategorizer {
    fn categorize(&self, sample: &Sample) -> Vec<Category> {
        sample.values().iter().map(Category::from_value).collect()
    }

    fn data_kind(&self) -> DataKind {
        DataKind::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::FloatKey;
    use crate::sample::Value;

    #[test]
    fn test_identity_mapping() {
        let sample = Sample::new(vec![
            Value::from(1.0),
            Value::from("a"),
            Value::Missing,
            Value::Number(f64::NAN),
        ]);
        let categories = CategoricalCategorizer::new().categorize(&sample);
        assert_eq!(
            categories,
            vec![
                Category::Number(FloatKey::new(1.0).unwrap()),
                Category::Label("a".into()),
                Category::Missing,
                Category::Missing,
            ]
        );
        assert!(CategoricalCategorizer.edges().is_none());
    }
}
