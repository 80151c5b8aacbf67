use anyhow::Context;
use clap::Parser;
use raw2fits::cli::Args;
use raw2fits::image_pipeline::RawToFitsPipeline;
use raw2fits::logger;

use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    info!("Starting raw2fits...");

    let config = args.to_config();
    debug!("Configuration: {:?}", config);
    let pipeline = RawToFitsPipeline::new(config);

    let report = pipeline
        .convert_file(&args.image)
        .with_context(|| format!("Conversion of {} failed", args.image.display()))?;

    info!(
        width = report.width,
        height = report.height,
        files = report.written.len(),
        "Conversion successful!"
    );

    Ok(())
}
