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

use std::cmp::Ordering;

use serde_derive::{Deserialize, Serialize};

use crate::similarity::SimilarityMatrix;

/// Precomputed ranking of all other items per item, by descending cosine
/// similarity, ties broken by ascending item index. Built once from a
/// similarity matrix and read-only afterwards; on new interaction data the
/// whole table is rebuilt and swapped in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankingTable {
    rankings: Vec<Vec<u32>>,
}

impl RankingTable {

    pub fn from_similarities(similarities: &SimilarityMatrix) -> Self {

        let num_items = similarities.num_items();

        let rankings = (0..num_items)
            .map(|item| {
                let row = similarities.row(item);

                let mut ranked: Vec<u32> = (0..num_items as u32)
                    .filter(|other_item| *other_item as usize != item)
                    .collect();

                ranked.sort_unstable_by(|&item_a, &item_b| {
                    // similarities are finite by construction
                    row[item_b as usize]
                        .partial_cmp(&row[item_a as usize])
                        .unwrap_or(Ordering::Equal)
                        .then_with(|| item_a.cmp(&item_b))
                });

                ranked
            })
            .collect();

        RankingTable { rankings }
    }

    pub fn num_items(&self) -> usize {
        self.rankings.len()
    }

    pub fn ranking(&self, item: usize) -> &[u32] {
        &self.rankings[item]
    }
}
