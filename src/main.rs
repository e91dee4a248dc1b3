use std::path::PathBuf;

use clap::Parser;
use flashdrill::Drill;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV, TSV or JSON file to load the questions from
    #[arg(short, long)]
    file: PathBuf,

    /// Seconds before an answer is revealed automatically (0 = reveal on keypress)
    #[arg(short, long, default_value_t = 5)]
    delay: u64,
}

fn main() {
    let args = Args::parse();

    let drill = match Drill::from_file(&args.file, args.delay) {
        Ok(drill) => drill,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = drill.run() {
        eprintln!("Error running drill: {}", e);
        std::process::exit(1);
    }
}
