use clap::Parser;

use genflagged::cli::{Cli, Input};

fn main() {
  let cli = Cli::parse();
  if cli.verbose {
    tracing_subscriber::fmt()
      .with_max_level(tracing::Level::TRACE)
      .with_target(false)
      .without_time()
      .init();
  }

  let command_line = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
  let result = Input::new(cli, command_line).and_then(|input| genflagged::run(&input));
  if let Err(err) = result {
    eprintln!("genflagged: error: {err}");
    std::process::exit(1);
  }
}
