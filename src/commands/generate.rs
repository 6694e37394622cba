//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

/// Export the whole site into the public directory
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(folio)?;
    let exported = generator.generate()?;

    tracing::info!(
        "Generated {} posts into {:?} in {:.2}s",
        exported,
        folio.public_dir,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
