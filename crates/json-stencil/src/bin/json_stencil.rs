//! `json-stencil`: apply a JSON template to a context, or recover the
//! context from a result.
//!
//! Usage:
//!   json-stencil [OPTIONS] <TEMPLATE> <CONTEXT>
//!   json-stencil --reverse [OPTIONS] <TEMPLATE> <RESULT>
//!   json-stencil --emit-reverse-template [OPTIONS] <TEMPLATE>
//!
//! The output document is written to stdout.

use clap::Parser;
use json_stencil::cli::{init_logging, render, run, Args};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args).and_then(|value| render(&value, args.compact)) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
