//! The persisted fold record.
//!
//! Field names and nesting are a compatibility contract with every stored history entry:
//! renaming anything here requires migrating all persisted content.

use super::base::Base;
use super::oligo::Oligo;
use super::params::FoldParameters;
use super::target::TargetConditions;
use serde::{Deserialize, Deserializer, Serialize};

/// Pairings indexed by temperature; missing temperatures are `null`.
pub type PairsTable = Vec<Option<Vec<i32>>>;
/// Parameter slot arrays indexed by temperature; missing temperatures are `null`.
pub type ParamsTable = Vec<Option<FoldParameters>>;

/// A value per pseudoknot mode, keyed `"false"` / `"true"` on disk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Partitioned<T> {
    #[serde(rename = "false")]
    pub nested: T,
    #[serde(rename = "true")]
    pub pseudoknotted: T,
}

impl<T> Partitioned<T> {
    pub fn get(&self, pseudoknots: bool) -> &T {
        if pseudoknots {
            &self.pseudoknotted
        } else {
            &self.nested
        }
    }

    pub fn get_mut(&mut self, pseudoknots: bool) -> &mut T {
        if pseudoknots {
            &mut self.pseudoknotted
        } else {
            &mut self.nested
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldData {
    #[serde(rename = "sequence_")]
    pub sequence: Vec<Base>,
    #[serde(rename = "pairs_array_", default)]
    pub pairs_array: Partitioned<PairsTable>,
    #[serde(rename = "params_array_", default)]
    pub params_array: Partitioned<ParamsTable>,
    #[serde(rename = "stable_", default)]
    pub stable: bool,
    #[serde(rename = "target_oligo_", default)]
    pub target_oligo: Option<Vec<Base>>,
    #[serde(rename = "target_oligos_", default)]
    pub target_oligos: Option<Vec<Oligo>>,
    #[serde(rename = "oligo_order_", default)]
    pub oligo_order: Option<Vec<usize>>,
    #[serde(rename = "oligos_paired_", default)]
    pub oligos_paired: usize,
    #[serde(rename = "target_pairs_", default, deserialize_with = "null_as_empty")]
    pub target_pairs: Vec<i32>,
    #[serde(rename = "target_oligo_order_", default)]
    pub target_oligo_order: Option<Vec<usize>>,
    #[serde(rename = "puzzle_locks_", default)]
    pub puzzle_locks: Option<Vec<bool>>,
    #[serde(rename = "forced_struct_", default, deserialize_with = "null_as_empty")]
    pub forced_struct: Vec<i32>,
    #[serde(rename = "target_conditions_", default)]
    pub target_conditions: Option<TargetConditions>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn emits_legacy_key_set() {
        let record = FoldData {
            sequence: vec![Base::Guanine],
            pairs_array: Partitioned::default(),
            params_array: Partitioned::default(),
            stable: false,
            target_oligo: None,
            target_oligos: None,
            oligo_order: None,
            oligos_paired: 0,
            target_pairs: vec![],
            target_oligo_order: None,
            puzzle_locks: Some(vec![]),
            forced_struct: vec![],
            target_conditions: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "forced_struct_",
                "oligo_order_",
                "oligos_paired_",
                "pairs_array_",
                "params_array_",
                "puzzle_locks_",
                "sequence_",
                "stable_",
                "target_conditions_",
                "target_oligo_",
                "target_oligo_order_",
                "target_oligos_",
                "target_pairs_",
            ]
        );
        assert_eq!(value["pairs_array_"], json!({"false": [], "true": []}));
    }

    #[test]
    fn tolerates_missing_and_null_optional_fields() {
        let record: FoldData = serde_json::from_value(json!({
            "sequence_": [1, 2],
            "pairs_array_": {},
            "forced_struct_": null,
            "target_pairs_": null
        }))
        .unwrap();
        assert!(record.pairs_array.nested.is_empty());
        assert!(record.forced_struct.is_empty());
        assert!(record.puzzle_locks.is_none());
        assert!(!record.stable);
    }

    #[test]
    fn sparse_temperature_rows_deserialize_with_holes() {
        let record: FoldData = serde_json::from_value(json!({
            "sequence_": [1, 3],
            "pairs_array_": {"false": [null, null, [1, 0]], "true": []}
        }))
        .unwrap();
        assert_eq!(record.pairs_array.get(false)[2], Some(vec![1, 0]));
        assert!(record.pairs_array.get(false)[0].is_none());
        assert!(record.pairs_array.get(true).is_empty());
    }
}
