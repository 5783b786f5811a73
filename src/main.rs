use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use chessmind::prelude::*;

fn main() -> Result<()>
{
    // Read the dotenv file.
    dotenvy::dotenv().ok();

    // Parse the cli options.
    let options = UciOptions::parse();

    // Set the logger to write-and-flush so that it doesn't compete with the search thread.
    // Stdout belongs to the GUI, so logs go to stderr.
    let _logger = Logger::try_with_env_or_str(options.log_level.clone())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(AdaptiveFormat::WithThread)
        .set_palette("b196;208;195;111;67".to_owned())
        .start()?;

    log::info!("♞ starting {} v{} ♞", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    // Run the main UCI loop.
    if let Err(e) = Server::<evaluators::Material>::new(options).run()
    {
        log::error!("fatal error: {}", e);
        return Err(e);
    }

    Ok(())
}
