use super::error::EngineError;
use super::undo_block::UndoBlock;
use crate::core::models::oligo::Oligo;

/// Builds the position map used to keep base identity stable when oligos are reordered.
///
/// Positions of the primary sequence map to themselves. Each oligo owns a range of
/// `oligo.len() + 1` positions (its leading cut included), laid out in the current order
/// after the primary sequence. `new_order[k]` is the new slot of the oligo currently at
/// `k`; the ranges are emitted slot by slot. Without `new_order` the order is unchanged.
pub fn reordered_index_map(
    sequence_length: usize,
    oligos: &[Oligo],
    new_order: Option<&[usize]>,
) -> Result<Vec<usize>, EngineError> {
    let mut ranges = Vec::with_capacity(oligos.len());
    let mut first = sequence_length;
    for oligo in oligos {
        ranges.push(first..first + oligo.span());
        first += oligo.span();
    }

    let identity: Vec<usize> = (0..oligos.len()).collect();
    let order = new_order.unwrap_or(&identity[..]);
    if !is_permutation(order, oligos.len()) {
        return Err(EngineError::InvalidOligoOrder {
            order: order.to_vec(),
            count: oligos.len(),
        });
    }

    let mut map: Vec<usize> = (0..sequence_length).collect();
    for slot in 0..oligos.len() {
        let current = order
            .iter()
            .position(|&target| target == slot)
            .ok_or_else(|| EngineError::Internal(format!("no oligo assigned to slot {slot}")))?;
        map.extend(ranges[current].clone());
    }
    Ok(map)
}

fn is_permutation(order: &[usize], count: usize) -> bool {
    if order.len() != count {
        return false;
    }
    let mut seen = vec![false; count];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

impl UndoBlock {
    /// `None` when the block carries no target oligos.
    pub fn reordered_oligos_index_map(
        &self,
        new_order: Option<&[usize]>,
    ) -> Result<Option<Vec<usize>>, EngineError> {
        self.target_oligos
            .as_deref()
            .map(|oligos| reordered_index_map(self.sequence.len(), oligos, new_order))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::base::parse_sequence;

    fn oligos(lengths: &[usize]) -> Vec<Oligo> {
        lengths
            .iter()
            .map(|&n| Oligo::new(parse_sequence(&"A".repeat(n)).unwrap()))
            .collect()
    }

    #[test]
    fn swapping_two_oligos_swaps_their_ranges() {
        let map = reordered_index_map(10, &oligos(&[3, 4]), Some(&[1, 0])).unwrap();
        let expected: Vec<usize> = (0..10).chain(14..19).chain(10..14).collect();
        assert_eq!(map, expected);
    }

    #[test]
    fn missing_order_is_identity() {
        let map = reordered_index_map(4, &oligos(&[2, 1]), None).unwrap();
        assert_eq!(map, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn three_oligo_rotation() {
        // Oligo 0 moves to slot 2, 1 to 0, 2 to 1.
        let map = reordered_index_map(2, &oligos(&[1, 2, 1]), Some(&[2, 0, 1])).unwrap();
        let expected: Vec<usize> = (0..2).chain(4..7).chain(7..9).chain(2..4).collect();
        assert_eq!(map, expected);
    }

    #[test]
    fn map_is_a_permutation_of_all_positions() {
        let map = reordered_index_map(5, &oligos(&[2, 3, 4]), Some(&[1, 2, 0])).unwrap();
        let mut sorted = map.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..5 + 3 + 4 + 5).collect::<Vec<_>>());
        assert_eq!(&map[..5], &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn rejects_orders_that_are_not_permutations() {
        let set = oligos(&[1, 1]);
        for order in [&[0, 0][..], &[0][..], &[0, 2][..], &[0, 1, 2][..]] {
            let result = reordered_index_map(3, &set, Some(order));
            assert!(
                matches!(result, Err(EngineError::InvalidOligoOrder { count: 2, .. })),
                "order {:?} should be rejected",
                order
            );
        }
    }

    #[test]
    fn block_without_oligos_has_no_map() {
        let block = UndoBlock::new(&parse_sequence("GGAA").unwrap());
        assert_eq!(block.reordered_oligos_index_map(Some(&[0])).unwrap(), None);
    }

    #[test]
    fn block_map_uses_its_own_sequence_length() {
        let mut block = UndoBlock::new(&parse_sequence("GGAA").unwrap());
        block.set_target_oligos(Some(&oligos(&[2, 2])));
        let map = block.reordered_oligos_index_map(Some(&[1, 0])).unwrap().unwrap();
        let expected: Vec<usize> = (0..4).chain(7..10).chain(4..7).collect();
        assert_eq!(map, expected);
    }
}
