use crate::errors::Error;
use crate::stats::DataDictionary;
use crate::types::{self, SparseMatrix, SparseVector};

/// What to do with records whose rating cannot be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MalformedRecordPolicy {
    /// Abort the whole batch on the first malformed record.
    Abort,
    /// Drop malformed records and count them.
    Skip,
}

/// Sparse user-item interaction matrix, stored column-major: one sparse
/// vector per item, mapping user index to rating. Only nonzero ratings are
/// stored.
///
/// Duplicate (user, item) pairs: the last value wins. A rating of exactly
/// zero removes the cell, so re-rating an item with zero retracts the
/// earlier interaction.
pub struct InteractionMatrix {
    columns: SparseMatrix,
    num_users: usize,
    num_skipped: u64,
}

impl InteractionMatrix {

    pub fn from_records<'a, I>(
        records: I,
        data_dict: &DataDictionary,
        policy: MalformedRecordPolicy,
    ) -> Result<Self, Error>
    where
        I: Iterator<Item = &'a (String, String, f64)>,
    {
        let mut columns = types::new_sparse_matrix(data_dict.num_items());
        let mut num_skipped: u64 = 0;

        for (user, item, rating) in records {

            if !rating.is_finite() {
                match policy {
                    MalformedRecordPolicy::Abort => {
                        return Err(Error::MalformedRecord(format!(
                            "non-finite rating {} for user {} and item {}",
                            rating, user, item
                        )));
                    },
                    MalformedRecordPolicy::Skip => {
                        num_skipped += 1;
                        continue;
                    },
                }
            }

            let user_index = data_dict.user_index(user)?;
            let item_index = data_dict.item_index(item)? as usize;

            if *rating == 0.0 {
                columns[item_index].remove(&user_index);
            } else {
                columns[item_index].insert(user_index, *rating);
            }
        }

        Ok(InteractionMatrix {
            columns,
            num_users: data_dict.num_users(),
            num_skipped,
        })
    }

    pub fn num_users(&self) -> usize {
        self.num_users
    }

    pub fn num_items(&self) -> usize {
        self.columns.len()
    }

    pub fn num_nonzeros(&self) -> usize {
        self.columns.iter().map(SparseVector::len).sum()
    }

    pub fn num_skipped(&self) -> u64 {
        self.num_skipped
    }

    pub fn column(&self, item_index: usize) -> &SparseVector {
        &self.columns[item_index]
    }

    pub fn columns(&self) -> &[SparseVector] {
        &self.columns
    }
}
