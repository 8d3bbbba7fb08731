//! Compile `./sources` into the `./structure.js` navigation manifest

use starcodex::compiler::ManifestCompiler;
use starcodex::core::config::CompilerConfig;
use starcodex::core::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    let compiler = ManifestCompiler::new(CompilerConfig::default());
    compiler.build(chrono::Utc::now())?;

    tracing::info!("Build finished");
    Ok(())
}
