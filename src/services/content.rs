//! Site content store
//!
//! One JSON file per language under the configured data directory. Reads
//! never fail: a missing document is initialized with the built-in default,
//! an unreadable one is replaced by the default in the response only.
//! Writes replace the whole document atomically (temp file + rename).

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::{config::ContentConfig, error::{AppError, AppResult}, models::SiteContent};

#[derive(Clone)]
pub struct ContentService {
    data_dir: PathBuf,
    default_language: String,
    languages: Vec<String>,
}

impl ContentService {
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            default_language: config.default_language.clone(),
            languages: config.languages.clone(),
        }
    }

    /// Resolve an optional `lang` query value to a supported language
    pub fn language(&self, requested: Option<&str>) -> AppResult<String> {
        let lang = requested
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.default_language.clone());

        if self.languages.iter().any(|l| *l == lang) {
            Ok(lang)
        } else {
            Err(AppError::BadRequest(format!("Unsupported language: {}", lang)))
        }
    }

    /// Current document for `lang`
    pub async fn get(&self, lang: &str) -> SiteContent {
        let path = self.document_path(lang);

        match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<SiteContent>(&bytes) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Corrupt content document, serving default: {}", e);
                    SiteContent::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => self.initialize(&path).await,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Unreadable content document, serving default: {}", e);
                SiteContent::default()
            }
        }
    }

    /// Overwrite the whole document for `lang`
    pub async fn replace(&self, lang: &str, content: &SiteContent) -> AppResult<()> {
        let path = self.document_path(lang);
        let temp = self.write_temp(content).await?;

        if let Err(e) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        tracing::info!(lang, "Site content replaced");
        Ok(())
    }

    /// Persist the default document unless another writer got there first
    async fn initialize(&self, path: &Path) -> SiteContent {
        let default = SiteContent::default();

        match self.persist_if_absent(path, &default).await {
            Ok(true) => {
                tracing::info!(path = %path.display(), "Initialized content document with defaults");
                default
            }
            // Someone else created the document meanwhile; serve theirs.
            Ok(false) => match tokio::fs::read(path).await {
                Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or(default),
                Err(_) => default,
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), "Could not persist default content: {}", e);
                default
            }
        }
    }

    /// Link a fully written temp file into place; fails with AlreadyExists
    /// instead of clobbering a concurrent write.
    async fn persist_if_absent(&self, path: &Path, content: &SiteContent) -> AppResult<bool> {
        let temp = self.write_temp(content).await?;
        let linked = tokio::fs::hard_link(&temp, path).await;
        let _ = tokio::fs::remove_file(&temp).await;

        match linked {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_temp(&self, content: &SiteContent) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.data_dir).await?;

        let bytes = serde_json::to_vec_pretty(content)
            .map_err(|e| AppError::Internal(format!("Failed to serialize content: {}", e)))?;
        let temp = self
            .data_dir
            .join(format!(".content-{}.tmp", Uuid::new_v4()));
        tokio::fs::write(&temp, bytes).await?;
        Ok(temp)
    }

    fn document_path(&self, lang: &str) -> PathBuf {
        self.data_dir.join(format!("content_{}.json", lang))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn service(dir: &TempDir) -> ContentService {
        ContentService::new(&ContentConfig {
            data_dir: dir.path().to_path_buf(),
            default_language: "fr".to_string(),
            languages: vec!["fr".to_string(), "en".to_string()],
        })
    }

    fn document(value: serde_json::Value) -> SiteContent {
        SiteContent::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn empty_store_is_initialized_with_default() {
        let dir = TempDir::new().unwrap();
        let store = service(&dir);

        let first = store.get("fr").await;
        assert_eq!(first, SiteContent::default());
        assert!(dir.path().join("content_fr.json").exists());

        let second = store.get("fr").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn concurrent_first_reads_agree() {
        let dir = TempDir::new().unwrap();
        let store = service(&dir);

        let (a, b, c) = tokio::join!(store.get("fr"), store.get("fr"), store.get("fr"));
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(store.get("fr").await, a);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let dir = TempDir::new().unwrap();
        let store = service(&dir);

        let doc_a = document(json!({ "footer": { "copyright": "A" } }));
        let doc_b = document(json!({ "footer": { "copyright": "B" }, "navbar": {} }));
        store.replace("fr", &doc_a).await.unwrap();
        store.replace("fr", &doc_b).await.unwrap();

        assert_eq!(store.get("fr").await, doc_b);
    }

    #[tokio::test]
    async fn replaced_footer_is_served() {
        let dir = TempDir::new().unwrap();
        let store = service(&dir);

        let mut content = store.get("fr").await;
        content
            .0
            .insert("footer".to_string(), json!({ "copyright": "X" }));
        store.replace("fr", &content).await.unwrap();

        let served = store.get("fr").await;
        assert_eq!(served.0["footer"]["copyright"], json!("X"));
        assert!(served.0.contains_key("home"));
    }

    #[tokio::test]
    async fn older_documents_are_not_migrated() {
        let dir = TempDir::new().unwrap();
        let store = service(&dir);

        let partial = document(json!({ "footer": { "copyright": "2024" } }));
        store.replace("fr", &partial).await.unwrap();

        let served = store.get("fr").await;
        assert_eq!(served, partial);
        assert!(!served.0.contains_key("home"));
    }

    #[tokio::test]
    async fn corrupt_document_falls_back_without_overwriting() {
        let dir = TempDir::new().unwrap();
        let store = service(&dir);
        let path = dir.path().join("content_fr.json");
        std::fs::write(&path, b"{ not json").unwrap();

        assert_eq!(store.get("fr").await, SiteContent::default());
        assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
    }

    #[tokio::test]
    async fn languages_are_separate_slots() {
        let dir = TempDir::new().unwrap();
        let store = service(&dir);

        let english = document(json!({ "footer": { "copyright": "All rights reserved." } }));
        store.replace("en", &english).await.unwrap();

        assert_eq!(store.get("en").await, english);
        assert_eq!(store.get("fr").await, SiteContent::default());
    }

    #[tokio::test]
    async fn broken_store_fails_writes_and_serves_default() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let store = ContentService::new(&ContentConfig {
            data_dir: blocker.clone(),
            default_language: "fr".to_string(),
            languages: vec!["fr".to_string()],
        });

        let err = store.replace("fr", &SiteContent::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));

        assert_eq!(store.get("fr").await, SiteContent::default());
        assert!(blocker.is_file());
    }

    #[test]
    fn language_resolution() {
        let dir = TempDir::new().unwrap();
        let store = service(&dir);

        assert_eq!(store.language(None).unwrap(), "fr");
        assert_eq!(store.language(Some("EN")).unwrap(), "en");
        assert_eq!(store.language(Some("")).unwrap(), "fr");
        assert!(matches!(store.language(Some("de")), Err(AppError::BadRequest(_))));
        assert!(store.language(Some("../etc")).is_err());
    }
}
