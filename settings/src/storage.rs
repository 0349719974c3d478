//! Static files, uploaded media and where uploads are stored.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::EnvSettings;
use crate::paths::ProjectPaths;
use crate::security::Secret;

pub const STATIC_URL: &str = "/static/";
pub const MEDIA_URL: &str = "/media/";
pub const MEDIA_BUCKET: &str = "noel-wilson.co.uk";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticFilesStorage {
    /// Hashed file names plus pre-compressed copies, served by the app.
    CompressedManifest,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaticFilesSettings {
    pub url: String,
    pub root: PathBuf,
    pub dirs: Vec<PathBuf>,
    pub storage: StaticFilesStorage,
}

impl StaticFilesSettings {
    pub fn resolve(paths: &ProjectPaths) -> Self {
        Self {
            url: STATIC_URL.to_string(),
            root: paths.base_dir.join("staticfiles"),
            dirs: vec![
                paths.app_dir.join("static"),
                paths.src_dir.join("client").join("build").join("static"),
            ],
            storage: StaticFilesStorage::CompressedManifest,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum FileStorage {
    Local { media_root: PathBuf, media_url: String },
    S3(S3Settings),
}

impl FileStorage {
    pub fn local(paths: &ProjectPaths) -> Self {
        Self::Local {
            media_root: paths.base_dir.join("media"),
            media_url: MEDIA_URL.to_string(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::S3(_))
    }
}

/// Remote bucket for uploads. Only built by the production resolver.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct S3Settings {
    pub bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<Secret>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<Secret>,
    /// Public bucket: object URLs carry no signature.
    pub querystring_auth: bool,
}

impl S3Settings {
    pub(crate) fn resolve(env: &EnvSettings) -> Self {
        Self {
            bucket: MEDIA_BUCKET.to_string(),
            access_key_id: Secret::non_empty(&env.access_key),
            secret_access_key: Secret::non_empty(&env.secret),
            querystring_auth: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_layout() {
        let paths = ProjectPaths::from_root("/app");
        let files = StaticFilesSettings::resolve(&paths);
        assert_eq!(files.root, PathBuf::from("/app/src/server/staticfiles"));
        assert_eq!(
            files.dirs,
            vec![
                PathBuf::from("/app/src/server/webapp/static"),
                PathBuf::from("/app/src/client/build/static"),
            ]
        );
    }

    #[test]
    fn local_media() {
        let storage = FileStorage::local(&ProjectPaths::from_root("/app"));
        assert!(!storage.is_remote());
        match storage {
            FileStorage::Local { media_root, media_url } => {
                assert_eq!(media_root, PathBuf::from("/app/src/server/media"));
                assert_eq!(media_url, MEDIA_URL);
            }
            FileStorage::S3(_) => panic!("expected local storage"),
        }
    }

    #[test]
    fn s3_reads_credentials() {
        let env = EnvSettings {
            access_key: Some(Secret::new("AKIA")),
            ..Default::default()
        };
        let s3 = S3Settings::resolve(&env);
        assert_eq!(s3.bucket, MEDIA_BUCKET);
        assert_eq!(s3.access_key_id.as_ref().map(Secret::expose), Some("AKIA"));
        assert!(s3.secret_access_key.is_none());
        assert!(!s3.querystring_auth);
    }
}
