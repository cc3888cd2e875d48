/// Symmetric meeting-affinity matrix.
///
/// Cell (i, j) is the relative likelihood that participants i and j are paired
/// in the next round. Zero means "already met, do not pair until necessary".
/// Rows are kept as uniform distributions over the remaining positive cells.
use crate::constants::{FULLY_ELIGIBLE, MET};
use crate::error::{Error, Result};
use crate::types::ParticipantId;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AffinityMatrix {
    size: usize,
    /// Row-major, `size * size` cells.
    cells: Vec<f64>,
}

impl AffinityMatrix {
    /// An empty 0×0 matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh matrix for `count` participants: every cross cell equal, diagonal zero.
    pub fn with_participants(count: usize) -> Self {
        let mut matrix = Self::new();
        matrix.expand(count);
        matrix
    }

    /// Rebuild from stored rows. Rejects non-square input, a non-zero
    /// diagonal and values outside [0, 1].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::InconsistentState(format!(
                    "matrix row {i} has {} cells, expected {size}",
                    row.len()
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                if !(0.0..=1.0).contains(&value) {
                    return Err(Error::InconsistentState(format!(
                        "matrix cell ({i}, {j}) = {value} is outside [0, 1]"
                    )));
                }
                if i == j && value != MET {
                    return Err(Error::InconsistentState(format!(
                        "matrix diagonal cell ({i}, {i}) must be zero"
                    )));
                }
            }
            cells.extend(row);
        }
        Ok(AffinityMatrix { size, cells })
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.cells.chunks(self.size.max(1)).take(self.size).map(<[f64]>::to_vec).collect()
    }

    /// Number of participants ever registered, removed ones included.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: ParticipantId, j: ParticipantId) -> f64 {
        self.cells[self.offset(i, j)]
    }

    pub fn row(&self, i: ParticipantId) -> &[f64] {
        assert!(i < self.size, "matrix row {} out of range (size {})", i, self.size);
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    /// Sum of the row's entries (zeros contribute nothing).
    pub fn positive_row_sum(&self, i: ParticipantId) -> f64 {
        self.row(i).iter().filter(|&&v| v > 0.0).sum()
    }

    /// Grow by `new_count` participants. New cross cells start fully eligible,
    /// existing cells keep their value, then every row is renormalized.
    pub fn expand(&mut self, new_count: usize) {
        if new_count == 0 {
            return;
        }
        let old = self.size;
        let size = old + new_count;
        let mut cells = vec![FULLY_ELIGIBLE; size * size];
        for i in 0..old {
            cells[i * size..i * size + old].copy_from_slice(&self.cells[i * old..(i + 1) * old]);
        }
        for i in 0..size {
            cells[i * size + i] = MET;
        }
        self.size = size;
        self.cells = cells;
        self.renormalize_all_rows();
    }

    /// Mark a pair as having met: both (i, j) and (j, i) become zero.
    pub fn zero_pair(&mut self, i: ParticipantId, j: ParticipantId) {
        let a = self.offset(i, j);
        let b = self.offset(j, i);
        self.cells[a] = MET;
        self.cells[b] = MET;
    }

    /// Every positive entry in a row becomes 1 / (number of positive entries).
    /// Rows with no positive entries stay all zero.
    pub fn renormalize_all_rows(&mut self) {
        let size = self.size;
        for row in self.cells.chunks_mut(size.max(1)).take(size) {
            let positive = row.iter().filter(|&&v| v > 0.0).count();
            if positive == 0 {
                continue;
            }
            let share = 1.0 / positive as f64;
            for v in row.iter_mut().filter(|v| **v > 0.0) {
                *v = share;
            }
        }
    }

    /// True if row `i` still has a positive cell toward anyone in `among`.
    pub fn has_eligible_partner(&self, i: ParticipantId, among: &[ParticipantId]) -> bool {
        among.iter().any(|&j| j != i && self.get(i, j) > 0.0)
    }

    /// Make everyone in `among` eligible to meet each other again.
    /// Values are not normalized; call `renormalize_all_rows` afterwards.
    pub fn restore_among(&mut self, among: &[ParticipantId]) {
        for &i in among {
            for &j in among {
                if i != j {
                    let k = self.offset(i, j);
                    self.cells[k] = FULLY_ELIGIBLE;
                }
            }
        }
    }

    /// Forget all meeting history: every cross cell eligible again, rows uniform.
    pub fn reset_all(&mut self) {
        let size = self.size;
        for (k, v) in self.cells.iter_mut().enumerate() {
            *v = if k / size == k % size { MET } else { FULLY_ELIGIBLE };
        }
        self.renormalize_all_rows();
    }

    fn offset(&self, i: ParticipantId, j: ParticipantId) -> usize {
        assert!(
            i < self.size && j < self.size,
            "matrix cell ({}, {}) out of range (size {})",
            i, j, self.size
        );
        i * self.size + j
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn assert_rows_normalized(m: &AffinityMatrix) {
        for i in 0..m.size() {
            let sum = m.positive_row_sum(i);
            if m.row(i).iter().any(|&v| v > 0.0) {
                assert!((sum - 1.0).abs() < EPS, "row {} sums to {}", i, sum);
            }
        }
    }

    #[test]
    fn test_fresh_matrix_is_uniform() {
        let m = AffinityMatrix::with_participants(4);
        assert_eq!(m.size(), 4);
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 0.0 } else { 1.0 / 3.0 };
                assert!((m.get(i, j) - expected).abs() < EPS);
            }
        }
        assert_rows_normalized(&m);
    }

    #[test]
    fn test_single_participant_row_stays_zero() {
        let m = AffinityMatrix::with_participants(1);
        assert_eq!(m.get(0, 0), 0.0);
    }

    #[test]
    fn test_zero_pair_is_symmetric() {
        let mut m = AffinityMatrix::with_participants(4);
        m.zero_pair(1, 3);
        assert_eq!(m.get(1, 3), 0.0);
        assert_eq!(m.get(3, 1), 0.0);
        assert!(m.get(1, 2) > 0.0);
    }

    #[test]
    fn test_renormalize_after_zeroing() {
        let mut m = AffinityMatrix::with_participants(4);
        m.zero_pair(0, 1);
        m.zero_pair(2, 3);
        m.renormalize_all_rows();
        assert!((m.get(0, 2) - 0.5).abs() < EPS);
        assert!((m.get(0, 3) - 0.5).abs() < EPS);
        assert_eq!(m.get(0, 1), 0.0);
        assert_rows_normalized(&m);
    }

    #[test]
    fn test_expand_keeps_history_and_adds_eligible_cells() {
        let mut m = AffinityMatrix::with_participants(4);
        m.zero_pair(0, 1);
        m.renormalize_all_rows();
        m.expand(2);

        assert_eq!(m.size(), 6);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(4, 4), 0.0);
        // Row 0: partners 2, 3, 4, 5
        assert!((m.get(0, 4) - 0.25).abs() < EPS);
        // Row 4: partners 0, 1, 2, 3, 5
        assert!((m.get(4, 0) - 0.2).abs() < EPS);
        assert_rows_normalized(&m);
    }

    #[test]
    fn test_restore_among_leaves_other_cells_alone() {
        let mut m = AffinityMatrix::with_participants(4);
        m.zero_pair(0, 1);
        m.zero_pair(0, 2);
        m.zero_pair(0, 3);
        m.zero_pair(1, 2);
        assert!(!m.has_eligible_partner(0, &[0, 1, 2]));

        m.restore_among(&[0, 1, 2]);
        m.renormalize_all_rows();
        assert!(m.get(0, 1) > 0.0 && m.get(1, 2) > 0.0 && m.get(2, 0) > 0.0);
        assert_eq!(m.get(0, 3), 0.0);
        assert_eq!(m.get(0, 0), 0.0);
        assert_rows_normalized(&m);
    }

    #[test]
    fn test_reset_all() {
        let mut m = AffinityMatrix::with_participants(3);
        m.zero_pair(0, 1);
        m.reset_all();
        assert_eq!(m, AffinityMatrix::with_participants(3));
    }

    #[test]
    fn test_rows_round_trip_through_validation() {
        let m = AffinityMatrix::with_participants(3);
        let rebuilt = AffinityMatrix::from_rows(m.to_rows()).unwrap();
        assert_eq!(m, rebuilt);
        assert_eq!(AffinityMatrix::from_rows(Vec::new()).unwrap().size(), 0);
    }

    #[test]
    fn test_from_rows_rejects_bad_shapes() {
        assert!(AffinityMatrix::from_rows(vec![vec![0.0, 1.0]]).is_err());
        assert!(AffinityMatrix::from_rows(vec![vec![0.5, 0.5], vec![1.0, 0.0]]).is_err());
        assert!(AffinityMatrix::from_rows(vec![vec![0.0, 2.0], vec![1.0, 0.0]]).is_err());
    }
}
