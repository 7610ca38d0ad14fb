use super::cache::{FoldCondition, FoldTable};
use super::error::EngineError;
use super::undo_block::UndoBlock;
use crate::core::models::record::{FoldData, PairsTable, ParamsTable, Partitioned};
use serde_json::Value;
use tracing::debug;

impl From<&UndoBlock> for FoldData {
    fn from(block: &UndoBlock) -> Self {
        let mut pairs_array: Partitioned<PairsTable> = Partitioned::default();
        let mut params_array: Partitioned<ParamsTable> = Partitioned::default();

        for (condition, cell) in block.folds.iter() {
            let index = condition.temperature as usize;
            if let Some(pairing) = cell.pairing() {
                place(pairs_array.get_mut(condition.pseudoknots), index, pairing.to_vec());
            }
            if let Some(parameters) = cell.parameters() {
                place(params_array.get_mut(condition.pseudoknots), index, parameters.clone());
            }
        }

        FoldData {
            sequence: block.sequence.clone(),
            pairs_array,
            params_array,
            stable: block.stable,
            target_oligo: block.target_oligo.clone(),
            target_oligos: block.target_oligos.clone(),
            oligo_order: block.oligo_order.clone(),
            oligos_paired: block.oligos_paired,
            target_pairs: block.target_pairs.clone(),
            target_oligo_order: block.target_oligo_order.clone(),
            puzzle_locks: block.puzzle_locks.clone(),
            forced_struct: block.forced_struct.clone(),
            target_conditions: block.target_conditions.clone(),
        }
    }
}

// Temperature-indexed tables are sparse; holes stay `None` and serialize as `null`.
fn place<T>(table: &mut Vec<Option<T>>, index: usize, value: T) {
    if table.len() <= index {
        table.resize_with(index + 1, || None);
    }
    table[index] = Some(value);
}

impl From<FoldData> for UndoBlock {
    fn from(record: FoldData) -> Self {
        let mut folds = FoldTable::new();
        for pseudoknots in [false, true] {
            let pairs = record.pairs_array.get(pseudoknots);
            for (temperature, pairing) in pairs.iter().enumerate() {
                if let Some(pairing) = pairing {
                    folds.set_pairing(
                        FoldCondition::new(temperature as u32, pseudoknots),
                        pairing.clone(),
                    );
                }
            }
            let params = record.params_array.get(pseudoknots);
            for (temperature, parameters) in params.iter().enumerate() {
                if let Some(parameters) = parameters {
                    folds.set_parameters(
                        FoldCondition::new(temperature as u32, pseudoknots),
                        parameters.clone(),
                    );
                }
            }
        }

        let mut block = UndoBlock::new(&record.sequence);
        block.folds = folds;
        block.stable = record.stable;
        block.target_oligo = record.target_oligo;
        block.target_oligos = record.target_oligos;
        block.oligo_order = record.oligo_order;
        block.oligos_paired = record.oligos_paired;
        block.target_pairs = record.target_pairs;
        block.target_oligo_order = record.target_oligo_order;
        block.puzzle_locks = record.puzzle_locks;
        block.forced_struct = record.forced_struct;
        block.target_conditions = record.target_conditions;
        block
    }
}

impl UndoBlock {
    /// The persisted form of this block. Plot buffers are not part of it.
    pub fn to_record(&self) -> FoldData {
        FoldData::from(self)
    }

    pub fn from_record(record: FoldData) -> Self {
        Self::from(record)
    }

    pub fn to_value(&self) -> Result<Value, EngineError> {
        serde_json::to_value(self.to_record()).map_err(|e| EngineError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string(&self.to_record())
            .map_err(|e| EngineError::Serialization(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(&self.to_record())
            .map_err(|e| EngineError::Serialization(e.to_string()))
    }

    /// Restores a block from a persisted record. Any malformed field fails the whole
    /// record with [`EngineError::Deserialization`].
    pub fn from_value(value: Value) -> Result<Self, EngineError> {
        let record: FoldData =
            serde_json::from_value(value).map_err(|e| EngineError::Deserialization(e.to_string()))?;
        Ok(Self::from_record(record))
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let record: FoldData =
            serde_json::from_str(json).map_err(|e| EngineError::Deserialization(e.to_string()))?;
        debug!(
            length = record.sequence.len(),
            "Restored fold record."
        );
        Ok(Self::from_record(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::folding::mock::RecordingFolder;
    use crate::core::models::base::{Base, parse_sequence};
    use crate::core::models::oligo::Oligo;
    use crate::core::models::params::ParamKind;
    use crate::core::models::target::TargetConditions;
    use crate::core::structure::pairs::from_dot_bracket;
    use serde_json::json;

    fn populated_block() -> UndoBlock {
        let mut block = UndoBlock::new(&parse_sequence("GGGGAAAACCCC").unwrap());
        block.set_pairing(&from_dot_bracket("((((....))))").unwrap(), 37, false);
        block.set_pairing(&from_dot_bracket("((((....))))").unwrap(), 37, true);
        block
            .compute_basics(&RecordingFolder::new(), 37, false)
            .unwrap();
        block.set_stable(true);
        block.set_oligos_paired(2);
        block.set_target_pairs(&from_dot_bracket("((((....))))").unwrap());
        block.set_target_oligos(Some(&[
            Oligo::new(parse_sequence("AA").unwrap()).with_name("first"),
            Oligo::new(parse_sequence("UUU").unwrap()),
        ]));
        block.set_oligo_order(Some(&[1, 0]));
        block.set_puzzle_locks(Some(&[true, false]));
        block.set_forced_struct(&[-1, -1]);
        let conditions: TargetConditions = serde_json::from_value(json!({
            "type": "multistrand",
            "secstruct": "((((....))))",
            "oligos": [{"sequence": "AA", "name": "first"}],
            "custom-layout": [[0.5, 1.0]],
            "shift_limit": 3
        }))
        .unwrap();
        block.set_target_conditions(Some(&conditions));
        block
    }

    #[test]
    fn record_round_trip_preserves_every_field() {
        let block = populated_block();
        let json = block.to_json().unwrap();
        let restored = UndoBlock::from_json(&json).unwrap();
        assert_eq!(restored, block);
    }

    #[test]
    fn tables_are_indexed_by_temperature() {
        let value = populated_block().to_value().unwrap();
        let nested = value["pairs_array_"]["false"].as_array().unwrap();
        assert_eq!(nested.len(), 38);
        assert!(nested[0].is_null());
        assert!(nested[36].is_null());
        assert_eq!(nested[37][0], json!(11));

        let params = value["params_array_"]["false"][37].as_array().unwrap();
        assert_eq!(params[ParamKind::GcPairs.index()], json!(4));
        assert!(params[ParamKind::Mfe.index()].is_null());
        assert!(value["params_array_"]["true"].as_array().unwrap().is_empty());
    }

    #[test]
    fn unknown_target_condition_keys_survive() {
        let value = populated_block().to_value().unwrap();
        let conditions = &value["target_conditions_"];
        assert_eq!(conditions["type"], json!("multistrand"));
        assert_eq!(conditions["custom-layout"], json!([[0.5, 1.0]]));
        assert_eq!(conditions["shift_limit"], json!(3));
    }

    #[test]
    fn plot_buffers_are_not_persisted() {
        let mut block = populated_block();
        block
            .update_melting_point_and_dot_plot(&RecordingFolder::new(), false)
            .unwrap();
        assert!(block.melt_curve().is_some());

        let restored = UndoBlock::from_json(&block.to_json().unwrap()).unwrap();
        assert!(restored.melt_curve().is_none());
        assert!(restored.dot_plot().is_none());
        assert_eq!(restored.parameters(37, false), block.parameters(37, false));
    }

    #[test]
    fn sparse_and_odd_typed_content_survives_a_round_trip() {
        let cases = [
            (json!({"type": "single"}), json!(null)),
            (
                json!({"type": "multistrand", "secstruct": "..", "oligos": []}),
                json!([{"sequence": [1, 2], "extra_key": 5}]),
            ),
            (
                json!({"type": "multistrand", "oligos": [{"sequence": "GG"}], "fold_mode": null}),
                json!([{"sequence": [2, 2], "malus": 0, "concentration": "5"}]),
            ),
            (
                json!({"type": "aptamer", "secstruct": null, "site": [2, 3], "concentration": "100"}),
                json!([]),
            ),
        ];
        for (conditions, oligos) in cases {
            let record = json!({
                "sequence_": [2, 2, 1, 4, 4],
                "target_oligos_": oligos,
                "target_conditions_": conditions
            });
            let value = UndoBlock::from_value(record).unwrap().to_value().unwrap();
            assert_eq!(value["target_conditions_"], conditions);
            assert_eq!(value["target_oligos_"], oligos);

            let again = UndoBlock::from_value(value.clone()).unwrap().to_value().unwrap();
            assert_eq!(again, value);
        }
    }

    #[test]
    fn restores_legacy_record() {
        let block = UndoBlock::from_value(json!({
            "sequence_": [2, 2, 1, 4, 4],
            "pairs_array_": {"false": [null, null, [4, 3, -1, 1, 0]], "true": []},
            "params_array_": {"false": [null, null, [0, 2, 0, null, 0, 2, -3.4]], "true": []},
            "stable_": false,
            "target_oligo_": [3, 3],
            "target_oligos_": null,
            "oligo_order_": null,
            "oligos_paired_": 0,
            "target_pairs_": [],
            "target_oligo_order_": null,
            "puzzle_locks_": null,
            "forced_struct_": [],
            "target_conditions_": {"type": "oligo", "secstruct": ".....", "fold_mode": "2"}
        }))
        .unwrap();

        assert_eq!(block.sequence()[3], Base::Cytosine);
        assert_eq!(block.pairing(2, false), Some(&[4, 3, -1, 1, 0][..]));
        assert_eq!(block.parameters(2, false).unwrap().free_energy, Some(-3.4));
        assert_eq!(block.target_oligo(), Some(&[Base::Uracil, Base::Uracil][..]));
        assert!(block.puzzle_locks().is_none());
        assert_eq!(block.oligo_mode().code(), 2);
    }

    #[test]
    fn malformed_records_are_wrapped() {
        let cases = [
            "not json",
            r#"{"pairs_array_": {}}"#,
            r#"{"sequence_": [1, 99]}"#,
            r#"{"sequence_": [1], "params_array_": {"false": [[1.5]]}}"#,
            r#"{"sequence_": [1], "target_conditions_": {"type": "unknown"}}"#,
        ];
        for json in cases {
            let err = UndoBlock::from_json(json).unwrap_err();
            assert!(matches!(err, EngineError::Deserialization(_)), "{json}");
            assert!(
                err.to_string().starts_with("Error parsing UndoBlock JSON: "),
                "{err}"
            );
        }
    }
}
