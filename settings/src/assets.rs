use std::path::PathBuf;

use serde::Serialize;

use crate::paths::ProjectPaths;

pub const BUNDLE_DIR_NAME: &str = "js/";
pub const DEV_STATS_FILE: &str = "webpack-stats.dev.json";
pub const PROD_STATS_FILE: &str = "webpack-stats.prod.json";

/// Where the asset pipeline finds the bundle manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleLoaderSettings {
    pub bundle_dir_name: String,
    pub stats_file: PathBuf,
    /// Keep the parsed manifest in memory. Off while bundles are being rebuilt.
    pub cache: bool,
}

impl BundleLoaderSettings {
    pub fn resolve(paths: &ProjectPaths, debug: bool) -> Self {
        let stats = if debug { DEV_STATS_FILE } else { PROD_STATS_FILE };
        Self {
            bundle_dir_name: BUNDLE_DIR_NAME.to_string(),
            stats_file: paths.bundle_stats_dir.join(stats),
            cache: !debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_reads_dev_manifest_uncached() {
        let loader = BundleLoaderSettings::resolve(&ProjectPaths::from_root("/p"), true);
        assert_eq!(loader.stats_file, PathBuf::from("/p/src/client/webpack-stats.dev.json"));
        assert!(!loader.cache);
    }

    #[test]
    fn release_reads_prod_manifest_cached() {
        let loader = BundleLoaderSettings::resolve(&ProjectPaths::from_root("/p"), false);
        assert_eq!(loader.stats_file, PathBuf::from("/p/src/client/webpack-stats.prod.json"));
        assert!(loader.cache);
        assert_eq!(loader.bundle_dir_name, BUNDLE_DIR_NAME);
    }
}
