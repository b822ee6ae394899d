//! CLI entry point for the halftone renderer

use clap::Parser;
use halftile::io::cli::{Cli, FileProcessor};
use halftile::io::logging::{LoggingConfig, init_logging};

fn main() -> halftile::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose));
    let mut processor = FileProcessor::new(cli);
    let rendered = processor.process()?;
    log::info!("rendered {rendered} file(s)");
    Ok(())
}
