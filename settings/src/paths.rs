use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{non_empty, EnvSettings};

/// Directory layout of the project checkout, rooted at `PROJECT_DIR`.
///
/// ```text
/// <project>/src/client          bundle stats
/// <project>/src/server          base: templates, fixtures, static root, media
/// <project>/src/server/webapp   app: static sources, service worker
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProjectPaths {
    pub project_dir: PathBuf,
    pub src_dir: PathBuf,
    pub base_dir: PathBuf,
    pub app_dir: PathBuf,
    pub bundle_stats_dir: PathBuf,
    pub template_dirs: Vec<PathBuf>,
    pub fixture_dirs: Vec<PathBuf>,
    pub service_worker: PathBuf,
}

impl ProjectPaths {
    pub fn resolve(env: &EnvSettings) -> Self {
        Self::from_root(non_empty(&env.project_dir).unwrap_or("."))
    }

    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let project_dir = root.as_ref().to_path_buf();
        let src_dir = project_dir.join("src");
        let base_dir = src_dir.join("server");
        let app_dir = base_dir.join("webapp");
        let bundle_stats_dir = src_dir.join("client");
        Self {
            template_dirs: vec![base_dir.join("templates")],
            fixture_dirs: vec![base_dir.join("fixtures")],
            service_worker: app_dir.join("static").join("js").join("serviceworker.js"),
            project_dir,
            src_dir,
            base_dir,
            app_dir,
            bundle_stats_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_hangs_off_project_dir() {
        let paths = ProjectPaths::from_root("/srv/site");
        assert_eq!(paths.base_dir, PathBuf::from("/srv/site/src/server"));
        assert_eq!(paths.app_dir, PathBuf::from("/srv/site/src/server/webapp"));
        assert_eq!(paths.bundle_stats_dir, PathBuf::from("/srv/site/src/client"));
        assert_eq!(
            paths.service_worker,
            PathBuf::from("/srv/site/src/server/webapp/static/js/serviceworker.js")
        );
        assert_eq!(paths.template_dirs, vec![PathBuf::from("/srv/site/src/server/templates")]);
        assert_eq!(paths.fixture_dirs, vec![PathBuf::from("/srv/site/src/server/fixtures")]);
    }

    #[test]
    fn defaults_to_current_dir() {
        let paths = ProjectPaths::resolve(&EnvSettings::default());
        assert_eq!(paths.project_dir, PathBuf::from("."));
    }
}
