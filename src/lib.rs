//! Item-to-item recommendations from user-item ratings via cosine
//! similarity. The batch pipeline encodes raw identifiers to dense indices,
//! assembles a sparse user-item matrix, computes the item-by-item cosine
//! similarity matrix and precomputes a full per-item ranking, so that serving
//! top-N similar items is a constant-time lookup.

use std::time::Instant;

pub mod errors;
pub mod io;
pub mod matrix;
pub mod rankings;
pub mod recommend;
pub mod similarity;
pub mod stats;
pub mod types;
pub mod utils;


use crate::errors::Error;
use crate::matrix::{InteractionMatrix, MalformedRecordPolicy};
use crate::rankings::RankingTable;
use crate::stats::DataDictionary;

/// Runs the offline batch: builds the sparse interaction matrix from the
/// records, computes all pairwise item similarities on `pool_size` workers
/// and derives the ranking table. The phases run strictly in order; a failure
/// in any phase aborts the batch without producing a table.
pub fn rankings(
    records: &[(String, String, f64)],
    data_dict: &DataDictionary,
    pool_size: usize,
    policy: MalformedRecordPolicy,
) -> Result<RankingTable, Error> {

    let batch_start = Instant::now();

    let matrix = InteractionMatrix::from_records(records.iter(), data_dict, policy)?;

    println!(
        "Assembled a {} x {} interaction matrix with {} nonzero entries ({} records skipped)",
        matrix.num_users(),
        matrix.num_items(),
        matrix.num_nonzeros(),
        matrix.num_skipped(),
    );

    let similarities = similarity::cosine_similarities(&matrix, pool_size);
    let table = RankingTable::from_similarities(&similarities);

    let duration_for_batch = utils::to_millis(batch_start.elapsed());
    println!(
        "Ranked {} items against each other, {}ms batch time",
        table.num_items(),
        duration_for_batch,
    );

    Ok(table)
}
