//! Authentication session mirrored into persistent storage

use crate::config::StorageKeys;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

/// User record as returned by the auth endpoints.
///
/// The record is opaque: whatever JSON the backend sends is kept as is and
/// written back to storage unchanged. The accessors read the well-known
/// fields and return `None` when a field is missing or has another type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Value);

impl User {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self(json!({ "id": id, "username": username.into() }))
    }

    /// Set `key`; no-op unless the record is a JSON object
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Value::Object(fields) = &mut self.0 {
            fields.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Backend identifier; numeric or string depending on the backend
    pub fn id(&self) -> Option<&Value> {
        self.get("id")
    }

    pub fn username(&self) -> Option<&str> {
        self.text("username")
    }

    pub fn email(&self) -> Option<&str> {
        self.text("email")
    }

    pub fn nickname(&self) -> Option<&str> {
        self.text("nickname")
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.text("avatar_url")
    }

    pub fn bio(&self) -> Option<&str> {
        self.text("bio")
    }

    pub fn credits(&self) -> Option<f64> {
        self.get("credits").and_then(Value::as_f64)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.text("created_at")
    }

    /// Nickname when set, otherwise the username
    pub fn display_name(&self) -> &str {
        self.nickname()
            .filter(|nickname| !nickname.is_empty())
            .or_else(|| self.username())
            .unwrap_or_default()
    }

    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    const fn is_null(&self) -> bool {
        matches!(self.0, Value::Null)
    }
}

impl From<Value> for User {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// The current authenticated identity, owned explicitly by whoever needs it.
///
/// Every mutation writes memory and storage together, so a non-empty token
/// in memory always has a matching `token` entry in storage. Storage
/// failures are logged and never roll back the in-memory transition.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    keys: StorageKeys,
    token: String,
    user: Option<User>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Rehydrate a session from storage using the default keys
    pub fn load(storage: S) -> Self {
        Self::load_with_keys(storage, StorageKeys::default())
    }

    /// Rehydrate a session from storage
    pub fn load_with_keys(storage: S, keys: StorageKeys) -> Self {
        let token = match storage.get(&keys.token) {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                String::new()
            }
        };

        let user = match storage.get(&keys.user) {
            Ok(Some(raw)) => match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable stored user record");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read stored user record");
                None
            }
        };

        let mut store = Self {
            storage,
            keys,
            token,
            user,
        };

        // An empty token entry left by an older client counts as logged out
        if store.token.is_empty() {
            store.remove_entry_of(EntryKind::Token);
        }

        debug!(logged_in = store.is_logged_in(), "Session rehydrated");
        store
    }

    /// Bearer token, if logged in
    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(&self.token)
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    /// Replace the whole session
    pub fn set_auth(&mut self, token: impl Into<String>, user: Option<User>) {
        self.token = token.into();
        self.user = user.filter(|user| !user.is_null());

        if self.token.is_empty() {
            self.remove_entry_of(EntryKind::Token);
        } else {
            let token = self.token.clone();
            self.write(EntryKind::Token, &token);
        }
        self.persist_user();

        info!(
            user = self.user.as_ref().and_then(User::username),
            "Session established"
        );
    }

    /// Replace only the user record, keeping the token
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user).filter(|user| !user.is_null());
        self.persist_user();
    }

    /// Clear the session. Safe to call when already logged out.
    pub fn logout(&mut self) {
        let was_logged_in = self.is_logged_in();
        self.token.clear();
        self.user = None;
        self.remove_entry_of(EntryKind::Token);
        self.remove_entry_of(EntryKind::User);

        if was_logged_in {
            info!("Session cleared");
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist_user(&mut self) {
        match self.user.as_ref().map(serde_json::to_string) {
            Some(Ok(json)) => self.write(EntryKind::User, &json),
            Some(Err(e)) => {
                warn!(error = %e, "Failed to encode user record");
                self.remove_entry_of(EntryKind::User);
            }
            None => self.remove_entry_of(EntryKind::User),
        }
    }

    fn write(&mut self, kind: EntryKind, value: &str) {
        let key = kind.key(&self.keys);
        if let Err(e) = self.storage.set(key, value) {
            warn!(key, error = %e, "Failed to persist session entry");
        }
    }

    fn remove_entry_of(&mut self, kind: EntryKind) {
        let key = kind.key(&self.keys);
        if let Err(e) = self.storage.remove(key) {
            warn!(key, error = %e, "Failed to remove session entry");
        }
    }
}

#[derive(Clone, Copy)]
enum EntryKind {
    Token,
    User,
}

impl EntryKind {
    fn key(self, keys: &StorageKeys) -> &str {
        match self {
            Self::Token => &keys.token,
            Self::User => &keys.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::{Error, Result};

    fn alice() -> User {
        User::new(1, "alice")
            .with("email", "alice@example.com")
            .with("nickname", "Alice")
            .with("credits", 10)
    }

    #[test]
    fn test_set_auth_mirrors_storage() {
        let mut session = SessionStore::load(MemoryStore::new());
        session.set_auth("tok-1", Some(alice()));

        assert!(session.is_logged_in());
        assert_eq!(session.token(), Some("tok-1"));
        assert_eq!(session.user(), Some(&alice()));

        let storage = session.storage();
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("tok-1"));
        let stored: User = serde_json::from_str(&storage.get("user").unwrap().unwrap()).unwrap();
        assert_eq!(stored, alice());
    }

    #[test]
    fn test_set_auth_overwrites() {
        let mut session = SessionStore::load(MemoryStore::new());
        session.set_auth("tok-1", Some(alice()));
        session.set_auth("tok-2", Some(User::new(2, "bob")));

        assert_eq!(session.token(), Some("tok-2"));
        assert_eq!(session.user().unwrap().username(), Some("bob"));
        assert_eq!(
            session.storage().get("token").unwrap().as_deref(),
            Some("tok-2")
        );
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let mut session = SessionStore::load(MemoryStore::new());
        session.set_auth("tok-1", Some(alice()));
        session.logout();

        assert!(!session.is_logged_in());
        assert_eq!(session.token(), None);
        assert_eq!(session.user(), None);
        assert!(session.storage().is_empty());

        // Idempotent
        session.logout();
        assert!(!session.is_logged_in());
        assert!(session.storage().is_empty());
    }

    #[test]
    fn test_rehydrate_from_storage() {
        let mut session = SessionStore::load(MemoryStore::new());
        session.set_auth("tok-1", Some(alice()));

        let restored = SessionStore::load(session.into_storage());
        assert_eq!(restored.token(), Some("tok-1"));
        assert_eq!(restored.user(), Some(&alice()));
    }

    #[test]
    fn test_rehydrate_empty_storage() {
        let session = SessionStore::load(MemoryStore::new());
        assert!(!session.is_logged_in());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_rehydrate_discards_corrupt_user() {
        let storage = MemoryStore::with_entries([("token", "tok-1"), ("user", "{not json")]);
        let session = SessionStore::load(storage);

        assert_eq!(session.token(), Some("tok-1"));
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_rehydrate_null_user() {
        let storage = MemoryStore::with_entries([("token", "tok-1"), ("user", "null")]);
        let session = SessionStore::load(storage);
        assert!(session.is_logged_in());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_empty_token_entry_is_logged_out() {
        let storage = MemoryStore::with_entries([("token", "")]);
        let session = SessionStore::load(storage);

        assert!(!session.is_logged_in());
        assert!(!session.storage().contains_key("token"));
    }

    #[test]
    fn test_set_auth_with_empty_token_leaves_no_token_entry() {
        let mut session = SessionStore::load(MemoryStore::new());
        session.set_auth("", Some(alice()));

        assert!(!session.is_logged_in());
        assert!(!session.storage().contains_key("token"));
    }

    #[test]
    fn test_set_user_keeps_token() {
        let mut session = SessionStore::load(MemoryStore::new());
        session.set_auth("tok-1", Some(alice()));
        session.set_user(User::new(1, "alice-renamed"));

        assert_eq!(session.token(), Some("tok-1"));
        assert_eq!(session.user().unwrap().username(), Some("alice-renamed"));
        let stored = session.storage().get("user").unwrap().unwrap();
        assert!(stored.contains("alice-renamed"));
    }

    #[test]
    fn test_custom_keys() {
        let keys = StorageKeys {
            token: "insight.token".to_string(),
            user: "insight.user".to_string(),
        };
        let mut session = SessionStore::load_with_keys(MemoryStore::new(), keys);
        session.set_auth("tok-1", None);

        assert!(session.storage().contains_key("insight.token"));
        assert!(!session.storage().contains_key("token"));
    }

    #[test]
    fn test_user_keeps_unknown_fields() {
        let raw = json!({
            "id": 7,
            "username": "carol",
            "bio": null,
            "role": "analyst"
        });
        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.bio(), None);
        assert_eq!(user.get("role"), Some(&json!("analyst")));
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_user_with_unexpected_field_types() {
        let raw = json!({"id": "u-1", "username": "alice", "credits": 1.5, "nickname": 3});
        let user: User = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(user.id(), Some(&json!("u-1")));
        assert_eq!(user.credits(), Some(1.5));
        assert_eq!(user.nickname(), None);
        assert_eq!(user.display_name(), "alice");

        let mut session = SessionStore::load(MemoryStore::new());
        session.set_auth("tok-1", Some(user));
        let restored = SessionStore::load(session.into_storage());
        assert_eq!(restored.user().map(User::as_value), Some(&raw));
    }

    #[test]
    fn test_null_user_counts_as_none() {
        let mut session = SessionStore::load(MemoryStore::new());
        session.set_auth("tok-1", Some(User::from(Value::Null)));
        assert_eq!(session.user(), None);
        assert!(!session.storage().contains_key("user"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(alice().display_name(), "Alice");
        let user = alice().with("nickname", "");
        assert_eq!(user.display_name(), "alice");
        assert_eq!(User::from(json!({})).display_name(), "");
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::storage("quota exceeded"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::storage("quota exceeded"))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(Error::storage("quota exceeded"))
        }
    }

    #[test]
    fn test_storage_failures_do_not_abort_transitions() {
        let mut session = SessionStore::load(FailingStore);
        assert!(!session.is_logged_in());

        session.set_auth("tok-1", Some(alice()));
        assert_eq!(session.token(), Some("tok-1"));

        session.logout();
        assert!(!session.is_logged_in());
    }
}
