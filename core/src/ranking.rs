//! Standard competition ranking ("1224"), the semantics of SQL RANK().
//!
//! Rows are ordered by score descending, ties broken by ascending id so the
//! output order is stable. Tied scores share a rank; the next distinct score
//! gets 1 + the number of rows strictly ahead of it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<T> {
    pub rank: u32,
    #[serde(flatten)]
    pub row: T,
}

/// Rank every row. The caller truncates for display; ranks are always
/// computed over the full input.
pub fn rank_descending<T>(
    mut rows: Vec<T>,
    score: impl Fn(&T) -> f64,
    id: impl Fn(&T) -> i64,
) -> Vec<Ranked<T>> {
    rows.sort_by(|a, b| score(b).total_cmp(&score(a)).then_with(|| id(a).cmp(&id(b))));

    let mut ranked = Vec::with_capacity(rows.len());
    let mut previous: Option<f64> = None;
    let mut rank = 0u32;
    for (position, row) in rows.into_iter().enumerate() {
        let s = score(&row);
        if previous != Some(s) {
            rank = position as u32 + 1;
            previous = Some(s);
        }
        ranked.push(Ranked { rank, row });
    }
    ranked
}
