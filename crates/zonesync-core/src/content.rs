//! Content resolution
//!
//! Expands a [`RecordContent`] into the literal values the backend stores. A
//! `round-robin` content is the only way one declared record becomes several
//! backend records.

use std::path::{Path, PathBuf};

use crate::document::{ContentKind, RecordContent, RoundRobins};
use crate::error::SyncError;

impl RecordContent {
    /// Resolve this content into an ordered list of values.
    ///
    /// `directory` is the base for relative `file` paths, normally the
    /// directory containing the declaration document.
    pub fn resolve_values(
        &self,
        directory: &Path,
        round_robins: &RoundRobins,
    ) -> Result<Vec<String>, SyncError> {
        match &self.kind {
            ContentKind::Raw => Ok(vec![self.value.clone()]),
            ContentKind::File => {
                let path = self.file_path(directory);
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| SyncError::Io { path, source })?;
                Ok(vec![contents.trim().to_string()])
            }
            ContentKind::RoundRobin => round_robins
                .get(&self.value)
                .cloned()
                .ok_or_else(|| SyncError::Reference(self.value.clone())),
            ContentKind::Unknown(kind) => Err(SyncError::Validation(format!(
                "Invalid record value type \"{}\"",
                kind
            ))),
        }
    }

    fn file_path(&self, directory: &Path) -> PathBuf {
        let path = Path::new(&self.value);
        if path.has_root() {
            path.to_path_buf()
        } else {
            directory.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn round_robins() -> RoundRobins {
        let mut rrs = HashMap::new();
        rrs.insert(
            "web".to_string(),
            vec![
                "192.0.2.1".to_string(),
                "192.0.2.2".to_string(),
                "192.0.2.3".to_string(),
            ],
        );
        rrs
    }

    #[test]
    fn test_raw_returns_value_unchanged() {
        let values = RecordContent::raw("  keep spaces ")
            .resolve_values(Path::new("/unused"), &HashMap::new())
            .unwrap();
        assert_eq!(values, vec!["  keep spaces "]);
    }

    #[test]
    fn test_round_robin_fans_out_in_order() {
        let values = RecordContent::round_robin("web")
            .resolve_values(Path::new("/unused"), &round_robins())
            .unwrap();
        assert_eq!(values, vec!["192.0.2.1", "192.0.2.2", "192.0.2.3"]);
    }

    #[test]
    fn test_missing_round_robin_is_reference_error() {
        let err = RecordContent::round_robin("missing-name")
            .resolve_values(Path::new("/unused"), &HashMap::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(err.to_string().contains("missing-name"));
    }

    #[test]
    fn test_relative_file_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "  1.2.3.4\n").unwrap();

        let values = RecordContent::file("a.txt")
            .resolve_values(dir.path(), &HashMap::new())
            .unwrap();
        assert_eq!(values, vec!["1.2.3.4"]);
    }

    #[test]
    fn test_absolute_file_ignores_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dkim.txt");
        std::fs::write(&path, "v=DKIM1; k=rsa; p=KEY\n\n").unwrap();

        let values = RecordContent::file(path.to_string_lossy())
            .resolve_values(Path::new("/somewhere/else"), &HashMap::new())
            .unwrap();
        assert_eq!(values, vec!["v=DKIM1; k=rsa; p=KEY"]);
    }

    #[test]
    fn test_nested_relative_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("keys")).unwrap();
        std::fs::write(dir.path().join("keys").join("tlsa"), "3 1 1 abcdef").unwrap();

        let values = RecordContent::file("keys/tlsa")
            .resolve_values(dir.path(), &HashMap::new())
            .unwrap();
        assert_eq!(values, vec!["3 1 1 abcdef"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordContent::file("nope.txt")
            .resolve_values(dir.path(), &HashMap::new())
            .unwrap_err();
        match err {
            SyncError::Io { path, .. } => assert_eq!(path, dir.path().join("nope.txt")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_validation_error() {
        let content = RecordContent {
            kind: ContentKind::Unknown("template".to_string()),
            value: "x".to_string(),
        };
        let err = content
            .resolve_values(Path::new("/unused"), &HashMap::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("template"));
    }
}
