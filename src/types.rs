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

use fnv::FnvHashMap;

pub type DenseVector = Vec<f64>;

pub type SparseVector = FnvHashMap<u32, f64>;
pub type SparseMatrix = Vec<SparseVector>;

pub fn new_sparse_matrix(num_rows: usize) -> SparseMatrix {
    vec![FnvHashMap::with_capacity_and_hasher(0, Default::default()); num_rows]
}
