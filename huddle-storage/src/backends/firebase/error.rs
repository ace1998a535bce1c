//! Firebase error mapping

use crate::error::StorageError;
use crate::traits::{RawApiError, StorageErrorMapper};
use crate::types::ObjectKey;

use super::FirebaseStorage;

/// Firebase Storage reports failures through HTTP status codes; the JSON body
/// only carries a human-readable message.
impl StorageErrorMapper for FirebaseStorage {
    fn backend_name(&self) -> &'static str {
        "firebase"
    }

    fn map_error(&self, raw: RawApiError, key: &ObjectKey) -> StorageError {
        let backend = self.backend_name().to_string();
        match raw.code.as_deref() {
            Some("401") => StorageError::Unauthorized {
                backend,
                raw_message: Some(raw.message),
            },
            Some("403") => StorageError::PermissionDenied {
                backend,
                raw_message: Some(raw.message),
            },
            Some("404") => StorageError::ObjectNotFound {
                backend,
                key: key.path(),
                raw_message: Some(raw.message),
            },
            Some("400") => StorageError::InvalidParameter {
                backend,
                param: "object".to_string(),
                detail: raw.message,
            },
            // 402: billing required, 413: object too large, 507: bucket full
            Some("402" | "413" | "507") => StorageError::QuotaExceeded {
                backend,
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> FirebaseStorage {
        FirebaseStorage::new("demo.appspot.com", None).unwrap()
    }

    fn key() -> ObjectKey {
        ObjectKey::new("discord", "serverImage", "cat.png")
    }

    #[test]
    fn maps_auth_statuses() {
        let s = storage();
        assert!(matches!(
            s.map_error(RawApiError::with_code("401", "expired"), &key()),
            StorageError::Unauthorized { .. }
        ));
        assert!(matches!(
            s.map_error(RawApiError::with_code("403", "rules"), &key()),
            StorageError::PermissionDenied { .. }
        ));
    }

    #[test]
    fn not_found_carries_key() {
        let err = storage().map_error(RawApiError::with_code("404", "gone"), &key());
        let StorageError::ObjectNotFound { key, .. } = err else {
            panic!("expected ObjectNotFound");
        };
        assert_eq!(key, "discord/serverImage/cat.png");
    }

    #[test]
    fn quota_and_unknown() {
        let s = storage();
        assert!(matches!(
            s.map_error(RawApiError::with_code("413", "too big"), &key()),
            StorageError::QuotaExceeded { .. }
        ));
        assert!(matches!(
            s.map_error(RawApiError::with_code("500", "boom"), &key()),
            StorageError::Unknown { .. }
        ));
    }
}
