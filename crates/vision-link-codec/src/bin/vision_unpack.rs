//! `vision-unpack`: decode one vision-link frame (stdin) to JSON (stdout).
//!
//! Usage:
//!   vision-unpack [--record] [--pretty] [--json]
//!
//! Frames are MessagePack unless `--json` is given.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::io::{self, Read, Write};
use vision_link_codec::cli::{
    unpack_json_record, unpack_json_snapshot, unpack_record, unpack_snapshot,
};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    let mut pretty = false;
    let mut record = false;
    let mut json = false;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--pretty" => pretty = true,
            "--record" => record = true,
            "--json" => json = true,
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(2);
            }
        }
    }

    let mut buf = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let result = match (json, record) {
        (false, false) => unpack_snapshot(&buf, pretty),
        (false, true) => unpack_record(&buf, pretty),
        (true, _) => match String::from_utf8(buf) {
            Ok(text) if record => unpack_json_record(&text, pretty),
            Ok(text) => unpack_json_snapshot(&text, pretty),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
    };
    match result {
        Ok(json) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{json}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
