//! Interactive estimator: prompts for a model file, evaluates it and
//! prints the cost breakdown with a geometry summary.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use archeocost::display::{format_cost_breakdown, write_geometry_csv};
use archeocost::{load_model, Evaluator, StoreError};

fn main() -> ExitCode {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let (mut graph, root) = loop {
        print!("Enter the file name or 'stop'. ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }
        let Some(Ok(line)) = lines.next() else {
            return ExitCode::SUCCESS;
        };
        let filename = line.trim();
        if filename.eq_ignore_ascii_case("stop") {
            return ExitCode::SUCCESS;
        }
        match load_model(filename) {
            Ok(loaded) => break loaded,
            Err(StoreError::NotFound(_)) => println!("File not found."),
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    };

    let mut evaluator = Evaluator::new(&mut graph);
    let total = match evaluator.run(root) {
        Ok(total) => total,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    println!("{}", format_cost_breakdown(evaluator.trace()));
    println!("Total cost: {total}");
    println!();

    let mut stdout = io::stdout();
    if let Err(err) = write_geometry_csv(&mut stdout, &graph, root) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
