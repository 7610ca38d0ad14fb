use crate::core::models::params::FoldParameters;
use std::collections::BTreeMap;

/// Temperature at which primary metrics are computed and the reference fold is taken.
pub const REFERENCE_TEMPERATURE: u32 = 37;

/// Identifies one cached fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoldCondition {
    pub pseudoknots: bool,
    pub temperature: u32,
}

impl FoldCondition {
    pub const fn new(temperature: u32, pseudoknots: bool) -> Self {
        Self {
            pseudoknots,
            temperature,
        }
    }

    pub const fn reference(pseudoknots: bool) -> Self {
        Self::new(REFERENCE_TEMPERATURE, pseudoknots)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoldCell {
    pub(crate) pairing: Option<Vec<i32>>,
    pub(crate) parameters: Option<FoldParameters>,
}

impl FoldCell {
    pub fn pairing(&self) -> Option<&[i32]> {
        self.pairing.as_deref()
    }

    pub fn parameters(&self) -> Option<&FoldParameters> {
        self.parameters.as_ref()
    }
}

/// Sparse store of folds keyed by `(pseudoknots, temperature)`.
///
/// Both pseudoknot partitions always exist implicitly; an absent key is simply an
/// uncomputed fold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoldTable {
    cells: BTreeMap<FoldCondition, FoldCell>,
}

impl FoldTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairing(&self, condition: FoldCondition) -> Option<&[i32]> {
        self.cells.get(&condition).and_then(FoldCell::pairing)
    }

    pub fn set_pairing(&mut self, condition: FoldCondition, pairing: Vec<i32>) {
        self.cells.entry(condition).or_default().pairing = Some(pairing);
    }

    pub fn parameters(&self, condition: FoldCondition) -> Option<&FoldParameters> {
        self.cells.get(&condition).and_then(FoldCell::parameters)
    }

    /// The parameter row for `condition`, allocated empty on first use.
    pub fn parameters_mut(&mut self, condition: FoldCondition) -> &mut FoldParameters {
        self.cells
            .entry(condition)
            .or_default()
            .parameters
            .get_or_insert_with(FoldParameters::default)
    }

    pub fn set_parameters(&mut self, condition: FoldCondition, parameters: FoldParameters) {
        self.cells.entry(condition).or_default().parameters = Some(parameters);
    }

    /// All cached cells ordered by pseudoknot mode, then temperature.
    pub fn iter(&self) -> impl Iterator<Item = (FoldCondition, &FoldCell)> {
        self.cells.iter().map(|(k, v)| (*k, v))
    }

    /// Cells of one pseudoknot partition in increasing temperature order.
    pub fn partition(&self, pseudoknots: bool) -> impl Iterator<Item = (u32, &FoldCell)> {
        self.iter()
            .filter(move |(k, _)| k.pseudoknots == pseudoknots)
            .map(|(k, v)| (k.temperature, v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::params::ParamKind;

    #[test]
    fn new_table_has_no_cells() {
        let table = FoldTable::new();
        assert!(table.is_empty());
        assert!(table.pairing(FoldCondition::reference(false)).is_none());
        assert!(table.parameters(FoldCondition::reference(true)).is_none());
    }

    #[test]
    fn set_pairing_is_scoped_to_its_condition() {
        let mut table = FoldTable::new();
        table.set_pairing(FoldCondition::new(47, false), vec![1, 0]);

        assert_eq!(table.pairing(FoldCondition::new(47, false)), Some(&[1, 0][..]));
        assert!(table.pairing(FoldCondition::new(47, true)).is_none());
        assert!(table.pairing(FoldCondition::new(37, false)).is_none());
    }

    #[test]
    fn parameters_mut_allocates_row_lazily() {
        let mut table = FoldTable::new();
        let condition = FoldCondition::new(57, true);
        assert!(table.parameters(condition).is_none());

        table
            .parameters_mut(condition)
            .set(ParamKind::PairScore, 0.5)
            .unwrap();

        assert_eq!(table.parameters(condition).unwrap().pair_score, Some(0.5));
        assert!(table.pairing(condition).is_none());
    }

    #[test]
    fn partition_iterates_in_temperature_order() {
        let mut table = FoldTable::new();
        table.set_pairing(FoldCondition::new(67, false), vec![]);
        table.set_pairing(FoldCondition::new(37, false), vec![]);
        table.set_pairing(FoldCondition::new(47, true), vec![]);

        let temps: Vec<u32> = table.partition(false).map(|(t, _)| t).collect();
        assert_eq!(temps, vec![37, 67]);
        assert_eq!(table.partition(true).count(), 1);
    }
}
