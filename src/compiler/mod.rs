//! Manifest compiler: source directory in, navigation manifest out

pub mod artifact;
pub mod scan;
pub mod stats;
pub mod subjects;

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::core::config::CompilerConfig;
use crate::core::error::ManifestError;
use crate::core::node::Tree;
use artifact::render_artifact;
use scan::{ScanReport, Scanner};
use stats::ManifestStats;
use subjects::SubjectCatalog;

/// Documents written when the source directory does not exist yet
const SAMPLE_SOURCES: &[(&str, &str)] = &[
    ("Бестиарий/Вампир.md", "# Вампир\n\nОпасное ночное существо...\n"),
    ("Бестиарий/Дракон.md", "# Дракон\n\nМогучее крылатое существо...\n"),
    ("Бестиарий/Гоблин.md", "# Гоблин\n\nМелкое хитрое существо...\n"),
    ("Классы/Механик.md", "# Механик\n\nСпециалист по технологиям...\n"),
    ("Классы/Солдат.md", "# Солдат\n\nБоевой специалист...\n"),
    ("Расы/Андроид.md", "# Андроид\n\nИскусственная раса...\n"),
    ("Расы/Человек.md", "# Человек\n\nУниверсальная раса...\n"),
    ("Навыки.md", "# Навыки\n\nСистема навыков персонажа...\n"),
    ("Черты.md", "# Черты\n\nЧерты и особенности...\n"),
];

/// Outcome of one compiler run
#[derive(Debug)]
pub struct BuildReport {
    pub tree: Tree,
    pub stats: ManifestStats,
    pub scan: ScanReport,
}

pub struct ManifestCompiler {
    config: CompilerConfig,
    scanner: Scanner,
}

impl ManifestCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        let scanner = Scanner::new(
            config.skip_names.clone(),
            SubjectCatalog::new(&config.subjects),
        );
        Self { config, scanner }
    }

    /// Write the sample tree when the source directory is missing
    pub fn ensure_sources(&self) -> std::io::Result<()> {
        let root = &self.config.sources_dir;
        if root.exists() {
            return Ok(());
        }

        tracing::info!("Creating sample sources in {}", root.display());
        for (rel, content) in SAMPLE_SOURCES {
            let path = root.join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, content)?;
            tracing::info!("Created: {}", rel);
        }
        Ok(())
    }

    /// Scan the configured source directory
    pub fn compile(&self) -> (Tree, ScanReport) {
        let mut report = ScanReport::default();
        let tree = self.scanner.scan(
            &self.config.sources_dir,
            &self.config.reference_prefix,
            &mut report,
        );
        (tree, report)
    }

    /// Full run: sample sources if needed, scan, write the artifact, report
    pub fn build(&self, now: DateTime<Utc>) -> Result<BuildReport, ManifestError> {
        tracing::info!("Building manifest from {}", self.config.sources_dir.display());

        if let Err(e) = self.ensure_sources() {
            tracing::error!("Failed to create sample sources: {}", e);
        }

        let (tree, scan) = self.compile();
        write_artifact(&self.config.output_file, &tree, now)?;
        tracing::info!("Wrote {}", self.config.output_file.display());

        let stats = ManifestStats::collect(&tree);
        stats.log();
        if !scan.errors.is_empty() {
            tracing::warn!("{} entries could not be scanned", scan.errors.len());
        }
        if !scan.collisions.is_empty() {
            tracing::warn!("{} subject name collisions", scan.collisions.len());
        }

        Ok(BuildReport { tree, stats, scan })
    }
}

fn write_artifact(path: &Path, tree: &Tree, now: DateTime<Utc>) -> Result<(), ManifestError> {
    let text = render_artifact(tree, now)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, text).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}
