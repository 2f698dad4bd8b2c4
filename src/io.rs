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

use std::fs::File;
use std::io::prelude::*;
use std::io::stdout;
use std::path::Path;

use serde_derive::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::Error;
use crate::matrix::MalformedRecordPolicy;
use crate::rankings::RankingTable;
use crate::recommend::Recommender;
use crate::stats::Renaming;

/// Opens a CSV input file. We expect NO headers, and a user-item-rating
/// triple per line with tab separation.
pub fn csv_reader(file: &str) -> Result<csv::Reader<File>, Error> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_path(file)?;

    Ok(reader)
}

/// Streams (user, item, rating) triples from a CSV reader. Rows that do not
/// parse and rows with a non-finite rating come out as
/// [MalformedRecord](Error::MalformedRecord) rather than being dropped.
pub fn interactions_from_csv<'a, R>(
    reader: &'a mut csv::Reader<R>,
) -> impl Iterator<Item = Result<(String, String, f64), Error>> + 'a
where
    R: std::io::Read,
{
    reader
        .deserialize::<(String, String, f64)>()
        .map(|result| -> Result<(String, String, f64), Error> {
            let (user, item, rating): (String, String, f64) =
                result.map_err(|failure| Error::MalformedRecord(failure.to_string()))?;

            if !rating.is_finite() {
                return Err(Error::MalformedRecord(format!(
                    "non-finite rating {} for user {} and item {}",
                    rating, user, item
                )));
            }

            Ok((user, item, rating))
        })
}

/// Reads all interactions from a CSV file, applying the malformed-record
/// policy. Returns the records together with the number of skipped rows.
pub fn read_interactions(
    file: &str,
    policy: MalformedRecordPolicy,
) -> Result<(Vec<(String, String, f64)>, u64), Error> {

    let mut reader = csv_reader(file)?;

    let mut records = Vec::new();
    let mut num_skipped: u64 = 0;

    for result in interactions_from_csv(&mut reader) {
        match result {
            Ok(record) => records.push(record),
            Err(failure) => match policy {
                MalformedRecordPolicy::Abort => return Err(failure),
                MalformedRecordPolicy::Skip => num_skipped += 1,
            },
        }
    }

    Ok((records, num_skipped))
}

/// Struct used for JSON serialization of the computed rankings. Field names
/// will be used in JSON.
#[derive(Serialize)]
struct RankedItems<'a> {
    for_item: &'a str,
    ranked_items: Vec<&'a str>,
}

/// Output the top entries of each item's ranking in JSON format, using the
/// original identifiers from the input file. If a `rankings_path` is
/// supplied, we write to a file at the specified path, otherwise, we output
/// to stdout.
pub fn write_rankings(
    table: &RankingTable,
    renaming: &Renaming,
    num_similar: usize,
    rankings_path: Option<String>,
) -> Result<(), Error> {

    let mut out: Box<dyn Write> = match rankings_path {
        Some(path) => Box::new(File::create(&Path::new(&path))?),
        _ => Box::new(stdout()),
    };

    for item_index in 0..table.num_items() {

        let for_item = renaming.item_name(item_index as u32)?;

        let ranking = table.ranking(item_index);
        let num_results = num_similar.min(ranking.len());

        let ranked_items = ranking[..num_results]
            .iter()
            .map(|other_item| renaming.item_name(*other_item))
            .collect::<Result<Vec<&str>, Error>>()?;

        let rankings_as_json = json!(RankedItems { for_item, ranked_items });

        writeln!(out, "{}", rankings_as_json)?;
    }

    Ok(())
}

/// Persisted form of the serving snapshot: the item ids in index order plus
/// the ranking table. Loading it reproduces identical recommend outputs.
#[derive(Serialize, Deserialize)]
struct Artifact {
    items: Vec<String>,
    table: RankingTable,
}

pub fn save_recommender(recommender: &Recommender, path: &str) -> Result<(), Error> {

    let artifact = Artifact {
        items: recommender.item_ids().to_vec(),
        table: recommender.table().clone(),
    };

    let file = File::create(&Path::new(path))?;
    serde_json::to_writer(file, &artifact)?;

    Ok(())
}

pub fn load_recommender(path: &str) -> Result<Recommender, Error> {

    let file = File::open(&Path::new(path))?;
    let artifact: Artifact = serde_json::from_reader(file)?;

    Ok(Recommender::from_parts(artifact.items, artifact.table))
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::matrix::{InteractionMatrix, MalformedRecordPolicy};
    use crate::rankings::RankingTable;
    use crate::similarity::cosine_similarities;
    use crate::stats::DataDictionary;

    fn reader_over(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .from_reader(data.as_bytes())
    }

    #[test]
    fn parses_tab_separated_triples() {
        let data = "u1\tm1\t5.0\nu1\tm2\t3.5\n";
        let mut reader = reader_over(data);

        let records: Vec<_> = interactions_from_csv(&mut reader)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], ("u1".to_string(), "m1".to_string(), 5.0));
        assert_eq!(records[1], ("u1".to_string(), "m2".to_string(), 3.5));
    }

    #[test]
    fn surfaces_malformed_rows() {
        let data = "u1\tm1\t5.0\nu2\tm1\tnot-a-number\nu2\tm2\tNaN\n";
        let mut reader = reader_over(data);

        let results: Vec<_> = interactions_from_csv(&mut reader).collect();

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::MalformedRecord(_))));
        assert!(matches!(results[2], Err(Error::MalformedRecord(_))));
    }

    #[test]
    fn artifact_round_trip_reproduces_recommendations() {
        let records = vec![
            ("u1".to_string(), "m1".to_string(), 5.0),
            ("u1".to_string(), "m2".to_string(), 5.0),
            ("u2".to_string(), "m1".to_string(), 5.0),
            ("u2".to_string(), "m3".to_string(), 1.0),
        ];

        let data_dict = DataDictionary::from(records.iter());
        let matrix = InteractionMatrix::from_records(
            records.iter(),
            &data_dict,
            MalformedRecordPolicy::Abort,
        ).unwrap();
        let similarities = cosine_similarities(&matrix, 2);
        let table = RankingTable::from_similarities(&similarities);
        let recommender = Recommender::new(&data_dict, table);

        let path = std::env::temp_dir().join("itemsim_artifact_roundtrip.json");
        let path = path.to_str().unwrap();

        save_recommender(&recommender, path).unwrap();
        let restored = load_recommender(path).unwrap();

        assert_eq!(restored.num_items(), recommender.num_items());
        for item in recommender.item_ids() {
            assert_eq!(
                recommender.recommend(item, 10).unwrap(),
                restored.recommend(item, 10).unwrap()
            );
        }

        std::fs::remove_file(path).unwrap();
    }
}
