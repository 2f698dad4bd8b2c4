/**
 * ItemSim
 * Copyright (C) 2026 The ItemSim developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::sync::Mutex;

use scoped_pool::Pool;

use crate::matrix::InteractionMatrix;
use crate::types::{DenseVector, SparseVector};

/// Dense item-by-item cosine similarity matrix. Symmetric; the diagonal is
/// exactly 1 for items with at least one stored interaction. Items with an
/// all-zero column have similarity 0 to every item, themselves included,
/// since the cosine of a zero vector is undefined.
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {

    pub fn num_items(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, item_a: usize, item_b: usize) -> f64 {
        self.rows[item_a][item_b]
    }

    pub fn row(&self, item: usize) -> &[f64] {
        &self.rows[item]
    }
}

/// Computes the cosine similarity between all pairs of item columns of the
/// interaction matrix. Rows are independent, so they are filled by a worker
/// pool; each worker owns exactly one output row.
pub fn cosine_similarities(matrix: &InteractionMatrix, pool_size: usize) -> SimilarityMatrix {

    let num_items = matrix.num_items();
    let norms = column_norms(matrix);

    let row_cells: Vec<Mutex<Vec<f64>>> =
        (0..num_items).map(|_| Mutex::new(Vec::new())).collect();

    let pool = Pool::new(pool_size);

    pool.scoped(|scope| {
        for item in 0..num_items {

            let cell = &row_cells[item];
            let reference_to_columns = matrix.columns();
            let reference_to_norms = &norms;

            scope.execute(move || {
                let row = similarity_row(item, reference_to_columns, reference_to_norms);
                *cell.lock().unwrap() = row;
            });
        }
    });

    let rows = row_cells
        .into_iter()
        .map(|cell| cell.into_inner().unwrap())
        .collect();

    SimilarityMatrix { rows }
}

fn column_norms(matrix: &InteractionMatrix) -> DenseVector {
    matrix
        .columns()
        .iter()
        .map(|column| column.values().map(|value| value * value).sum::<f64>().sqrt())
        .collect()
}

fn similarity_row(item: usize, columns: &[SparseVector], norms: &[f64]) -> Vec<f64> {

    let num_items = columns.len();
    let mut row = vec![0.0; num_items];

    if norms[item] == 0.0 {
        return row;
    }

    for other_item in 0..num_items {

        if other_item == item {
            row[item] = 1.0;
            continue;
        }

        if norms[other_item] == 0.0 {
            continue;
        }

        let product = dot(&columns[item], &columns[other_item]);
        if product != 0.0 {
            row[other_item] = product / (norms[item] * norms[other_item]);
        }
    }

    row
}

// Iterates the smaller of the two columns and probes the larger one.
fn dot(column_a: &SparseVector, column_b: &SparseVector) -> f64 {

    let (smaller, larger) = if column_a.len() <= column_b.len() {
        (column_a, column_b)
    } else {
        (column_b, column_a)
    };

    smaller
        .iter()
        .map(|(user, value)| larger.get(user).map_or(0.0, |other_value| value * other_value))
        .sum()
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::matrix::{InteractionMatrix, MalformedRecordPolicy};
    use crate::stats::DataDictionary;

    const TOLERANCE: f64 = 1e-9;

    fn matrix_from(records: &[(String, String, f64)]) -> InteractionMatrix {
        let data_dict = DataDictionary::from(records.iter());
        InteractionMatrix::from_records(
            records.iter(),
            &data_dict,
            MalformedRecordPolicy::Skip,
        ).unwrap()
    }

    fn record(user: &str, item: &str, rating: f64) -> (String, String, f64) {
        (user.to_string(), item.to_string(), rating)
    }

    #[test]
    fn matches_the_pairwise_definition() {
        // m1 = (5, 5), m2 = (5, 0), m3 = (0, 1) over users (u1, u2)
        let records = vec![
            record("u1", "m1", 5.0),
            record("u1", "m2", 5.0),
            record("u2", "m1", 5.0),
            record("u2", "m3", 1.0),
        ];

        let similarities = cosine_similarities(&matrix_from(&records), 2);

        let expected_m1_m2 = 25.0 / (50.0_f64.sqrt() * 5.0);
        let expected_m1_m3 = 5.0 / (50.0_f64.sqrt() * 1.0);

        assert!((similarities.get(0, 1) - expected_m1_m2).abs() < TOLERANCE);
        assert!((similarities.get(0, 2) - expected_m1_m3).abs() < TOLERANCE);
        assert!((similarities.get(1, 2) - 0.0).abs() < TOLERANCE);
    }

    #[test]
    fn is_symmetric() {
        let records = vec![
            record("u1", "m1", 5.0),
            record("u1", "m2", 3.0),
            record("u2", "m1", 1.0),
            record("u2", "m3", 4.0),
            record("u3", "m2", 2.0),
            record("u3", "m3", 5.0),
        ];

        let similarities = cosine_similarities(&matrix_from(&records), 2);

        for item_a in 0..similarities.num_items() {
            for item_b in 0..similarities.num_items() {
                let forward = similarities.get(item_a, item_b);
                let backward = similarities.get(item_b, item_a);
                assert!((forward - backward).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn diagonal_is_one_for_rated_items() {
        let records = vec![
            record("u1", "m1", 5.0),
            record("u2", "m1", 2.0),
            record("u1", "m2", 1.0),
        ];

        let similarities = cosine_similarities(&matrix_from(&records), 2);

        assert_eq!(similarities.get(0, 0), 1.0);
        assert_eq!(similarities.get(1, 1), 1.0);
    }

    #[test]
    fn unrated_items_have_zero_similarity_everywhere() {
        // m2 only appears in a skipped record, so its column is all-zero
        let records = vec![
            record("u1", "m1", 5.0),
            record("u1", "m2", f64::NAN),
            record("u2", "m1", 3.0),
        ];

        let similarities = cosine_similarities(&matrix_from(&records), 2);

        assert_eq!(similarities.get(1, 1), 0.0);
        assert_eq!(similarities.get(1, 0), 0.0);
        assert_eq!(similarities.get(0, 1), 0.0);
    }

    #[test]
    fn identical_columns_have_similarity_one() {
        let records = vec![
            record("u1", "m1", 2.0),
            record("u1", "m2", 4.0),
            record("u2", "m1", 3.0),
            record("u2", "m2", 6.0),
        ];

        let similarities = cosine_similarities(&matrix_from(&records), 2);

        // cosine ignores magnitude, m2 = 2 * m1
        assert!((similarities.get(0, 1) - 1.0).abs() < TOLERANCE);
    }
}
