//! Client-side preferences (currently just the branding logo).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::StoreError;

/// Key under which the branding logo is kept.
pub const LOGO_KEY: &str = "companyLogo";

/// Default upper bound for an uploaded logo (decoded image bytes).
pub const DEFAULT_LOGO_MAX_BYTES: usize = 2 * 1024 * 1024;

/// String key/value preference store with no expiry.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S> PreferenceStore for Arc<S>
where
    S: PreferenceStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-memory preference store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        map.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        map.remove(key);
        Ok(())
    }
}

/// Branding logo kept across invoices, stored as a base64 data URL.
#[derive(Debug, Clone)]
pub struct BrandingPreferences<P> {
    store: P,
    max_logo_bytes: usize,
}

impl<P: PreferenceStore> BrandingPreferences<P> {
    pub fn new(store: P, max_logo_bytes: usize) -> Self {
        Self {
            store,
            max_logo_bytes,
        }
    }

    pub fn logo(&self) -> Result<Option<String>, StoreError> {
        self.store.get(LOGO_KEY)
    }

    /// Validate and remember a logo given as `data:<mime>;base64,<payload>`.
    pub fn set_logo(&self, data_url: &str) -> Result<(), StoreError> {
        let size = match decoded_logo_size(data_url) {
            Ok(size) => size,
            Err(e) => {
                tracing::warn!(error = %e, "logo rejected");
                return Err(e);
            }
        };
        if size > self.max_logo_bytes {
            tracing::warn!(size, max = self.max_logo_bytes, "logo rejected: too large");
            return Err(StoreError::LogoTooLarge {
                size,
                max: self.max_logo_bytes,
            });
        }

        self.store.set(LOGO_KEY, data_url.to_string())?;
        tracing::info!(size, "logo updated");
        Ok(())
    }

    pub fn clear_logo(&self) -> Result<(), StoreError> {
        self.store.remove(LOGO_KEY)
    }
}

/// Size in bytes of the image encoded in a base64 data URL.
fn decoded_logo_size(data_url: &str) -> Result<usize, StoreError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| StoreError::InvalidLogo("expected a data: URL".to_string()))?;
    let (_mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| StoreError::InvalidLogo("expected base64 payload".to_string()))?;
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| StoreError::InvalidLogo(e.to_string()))?;
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_logo(bytes: usize) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(vec![7u8; bytes]))
    }

    fn test_prefs(max: usize) -> BrandingPreferences<InMemoryPreferenceStore> {
        BrandingPreferences::new(InMemoryPreferenceStore::new(), max)
    }

    #[test]
    fn stores_and_clears_logo() {
        let prefs = test_prefs(DEFAULT_LOGO_MAX_BYTES);
        assert!(prefs.logo().unwrap().is_none());

        let logo = test_logo(64);
        prefs.set_logo(&logo).unwrap();
        assert_eq!(prefs.logo().unwrap(), Some(logo));

        prefs.clear_logo().unwrap();
        assert!(prefs.logo().unwrap().is_none());
    }

    #[test]
    fn logo_at_limit_is_accepted_and_above_is_rejected() {
        let prefs = test_prefs(100);
        prefs.set_logo(&test_logo(100)).unwrap();

        let err = prefs.set_logo(&test_logo(101)).unwrap_err();
        assert_eq!(err, StoreError::LogoTooLarge { size: 101, max: 100 });
        // The previous logo stays in place.
        assert_eq!(prefs.logo().unwrap(), Some(test_logo(100)));
    }

    #[test]
    fn malformed_logo_is_rejected() {
        let prefs = test_prefs(DEFAULT_LOGO_MAX_BYTES);
        assert!(matches!(
            prefs.set_logo("https://example.com/logo.png"),
            Err(StoreError::InvalidLogo(_))
        ));
        assert!(matches!(
            prefs.set_logo("data:image/png,rawbytes"),
            Err(StoreError::InvalidLogo(_))
        ));
        assert!(matches!(
            prefs.set_logo("data:image/png;base64,@@@"),
            Err(StoreError::InvalidLogo(_))
        ));
    }

    #[test]
    fn shared_store_is_visible_through_arc() {
        let store = Arc::new(InMemoryPreferenceStore::new());
        let prefs = BrandingPreferences::new(store.clone(), DEFAULT_LOGO_MAX_BYTES);
        prefs.set_logo(&test_logo(8)).unwrap();
        assert!(store.get(LOGO_KEY).unwrap().is_some());
    }
}
