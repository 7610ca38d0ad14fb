use thiserror::Error;

/// Sentinel stored for a base without a partner.
pub const UNPAIRED: i32 = -1;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StructureError {
    #[error("Unbalanced '{symbol}' at position {position}")]
    Unbalanced { symbol: char, position: usize },
    #[error("Unexpected character '{symbol}' at position {position}")]
    UnexpectedSymbol { symbol: char, position: usize },
}

/// Partner of base `i`, if it is paired to a valid index.
#[inline]
pub fn partner(pairs: &[i32], i: usize) -> Option<usize> {
    pairs
        .get(i)
        .and_then(|&j| usize::try_from(j).ok())
        .filter(|&j| j != i)
}

/// Iterates `(i, j)` with `i < j` for every pair in the array.
pub fn pair_iter(pairs: &[i32]) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..pairs.len()).filter_map(move |i| partner(pairs, i).filter(|&j| j > i).map(|j| (i, j)))
}

pub fn unpaired(len: usize) -> Vec<i32> {
    vec![UNPAIRED; len]
}

const OPENERS: [char; 4] = ['(', '[', '{', '<'];
const CLOSERS: [char; 4] = [')', ']', '}', '>'];

/// Parses dot-bracket notation. `[]`, `{}` and `<>` carry pseudoknotted helices;
/// `&` and `+` mark strand cuts and occupy a position like any other base.
pub fn from_dot_bracket(text: &str) -> Result<Vec<i32>, StructureError> {
    let mut pairs = Vec::with_capacity(text.len());
    let mut stacks: [Vec<usize>; 4] = Default::default();

    for (position, symbol) in text.chars().enumerate() {
        pairs.push(UNPAIRED);
        if let Some(kind) = OPENERS.iter().position(|&c| c == symbol) {
            stacks[kind].push(position);
        } else if let Some(kind) = CLOSERS.iter().position(|&c| c == symbol) {
            let open = stacks[kind]
                .pop()
                .ok_or(StructureError::Unbalanced { symbol, position })?;
            pairs[open] = position as i32;
            pairs[position] = open as i32;
        } else if !matches!(symbol, '.' | '&' | '+') {
            return Err(StructureError::UnexpectedSymbol { symbol, position });
        }
    }

    for (kind, stack) in stacks.iter().enumerate() {
        if let Some(&position) = stack.last() {
            return Err(StructureError::Unbalanced {
                symbol: OPENERS[kind],
                position,
            });
        }
    }
    Ok(pairs)
}

/// Renders nested pairs as `()`; pairs crossing an open helix use `[]`.
pub fn to_dot_bracket(pairs: &[i32]) -> String {
    let mut out = vec!['.'; pairs.len()];
    let mut open_round: Vec<usize> = Vec::new();
    for i in 0..pairs.len() {
        match partner(pairs, i) {
            Some(j) if j > i => {
                let crosses = open_round
                    .last()
                    .and_then(|&o| partner(pairs, o))
                    .is_some_and(|closing| j > closing);
                if crosses {
                    out[i] = '[';
                    out[j] = ']';
                } else {
                    out[i] = '(';
                    out[j] = ')';
                    open_round.push(i);
                }
            }
            Some(j) if out[i] == ')' && open_round.last() == Some(&j) => {
                open_round.pop();
            }
            _ => {}
        }
    }
    out.into_iter().collect()
}
