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

use std::env;
use std::error::Error;
use std::process;

use getopts::Options;

use itemsim::io;
use itemsim::matrix::MalformedRecordPolicy;
use itemsim::recommend::Recommender;
use itemsim::stats::{DataDictionary, Renaming};

fn main() {

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("i", "inputfile", "Input file name (required). The input consists of rated \
        interactions between users and items. The input file must contain a user, item and \
        rating triple per line, separated by tabs.", "PATH");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to stdout \
        by default).", "PATH");
    opts.optopt("n", "num-similar", "Number of similar items to write per item (optional, \
        defaults to 10).", "NUMBER");
    opts.optopt("a", "artifact", "Path to additionally store the serving artifact (item ids plus \
        ranking table) as JSON (optional).", "PATH");
    opts.optflag("s", "skip-malformed", "Skip records with unparseable or non-finite ratings \
        instead of aborting.");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    if !matches.opt_present("i") {
        return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify an inputfile via --inputfile."),
        );
    }

    let interactions_path = matches.opt_str("i").unwrap();
    let rankings_path = matches.opt_str("o");
    let artifact_path = matches.opt_str("a");

    let policy = if matches.opt_present("s") {
        MalformedRecordPolicy::Skip
    } else {
        MalformedRecordPolicy::Abort
    };

    let num_similar: usize = match matches.opt_get_default("n", 10) {
        Ok(num_similar) => num_similar,
        Err(failure) => {
            let hint = format!("Problem with option 'n': {}", failure.to_string());
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if num_similar == 0 {
        return print_usage_and_exit(&program, opts, Some("Option 'n' must be positive."));
    }

    if let Err(failure) = compute_rankings(
        &interactions_path,
        num_similar,
        policy,
        rankings_path,
        artifact_path,
    ) {
        eprintln!("{}", failure);
        process::exit(1);
    }
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));
}

fn compute_rankings(
    interactions_path: &str,
    num_similar: usize,
    policy: MalformedRecordPolicy,
    rankings_path: Option<String>,
    artifact_path: Option<String>,
) -> Result<(), Box<dyn Error>> {

    println!("Reading {} (pass 1/2)", interactions_path);

    let (records, num_skipped_rows) = io::read_interactions(interactions_path, policy)?;
    let data_dict = DataDictionary::from(records.iter());

    println!(
        "Found {} interactions between {} users and {} items ({} rows skipped).",
        data_dict.num_interactions(),
        data_dict.num_users(),
        data_dict.num_items(),
        num_skipped_rows,
    );

    println!("Computing item similarity rankings (pass 2/2)");

    let table = itemsim::rankings(&records, &data_dict, num_cpus::get(), policy)?;

    if let Some(path) = artifact_path {
        println!("Writing serving artifact to {}", path);
        let recommender = Recommender::new(&data_dict, table.clone());
        io::save_recommender(&recommender, &path)?;
    }

    // Build reverse index, make sure we consume the data dictionary
    let renaming: Renaming = data_dict.into();

    println!("Writing rankings...");
    io::write_rankings(&table, &renaming, num_similar, rankings_path)?;

    Ok(())
}
