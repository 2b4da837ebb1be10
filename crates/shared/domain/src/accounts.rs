//! Administrator accounts.
//!
//! The plaintext password never reaches the document: `sanitize` replaces
//! it with a salted hash on create, and [`AdminAccount::prepare_patch`]
//! does the same on update. Responses go out as [`AdminAccountView`],
//! which omits the hash.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use veranda_kernel::security::password::{hash_password, verify_password};
use veranda_store::{Entity, StoreError};

use crate::sanitize::{from_payload, invalid};

/// Salted SHA-256 digest of the seed password `admin123`. Baked in so a
/// freshly seeded document is deterministic; rotate the credential through
/// the API after first login.
const SEED_PASSWORD_HASH: &str =
    "a7f3c1905be8d2647310fe9c24d8ab56$32856c7a4e4b3d3da25ccb92ee5a6ee8ddd71f6f19a33eed936200913f88f97f";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminAccount {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub created_at: String,
}

impl AdminAccount {
    pub(crate) fn seed() -> Self {
        Self {
            id: "admin-1".to_string(),
            username: "admin".to_string(),
            password_hash: SEED_PASSWORD_HASH.to_string(),
            full_name: "Administrator".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[must_use]
    pub fn verify_login(&self, password: &str) -> bool {
        verify_password(&self.password_hash, password)
    }

    /// Rewrites an inbound update patch so the stored hash stays
    /// server-owned: a client-supplied `passwordHash` is discarded, and a
    /// non-empty `password` field is validated and replaced by a freshly
    /// salted hash. An empty or `null` password means "keep the current
    /// one".
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] when the payload is not an
    /// object or carries an unusable password.
    pub fn prepare_patch(mut patch: Value) -> Result<Value, StoreError> {
        let Some(fields) = patch.as_object_mut() else {
            return Err(invalid("payload must be a JSON object"));
        };
        fields.remove("passwordHash");

        if let Some(supplied) = fields.remove("password") {
            let plain = match supplied {
                Value::String(text) => text,
                Value::Null => String::new(),
                _ => return Err(invalid("Password must be a string")),
            };
            if !plain.is_empty() {
                if plain.chars().count() < 4 {
                    return Err(invalid("Password must be at least 4 characters long"));
                }
                let hash =
                    hash_password(&plain).map_err(|err| StoreError::from(err.to_string()))?;
                fields.insert("passwordHash".to_string(), Value::String(hash));
            }
        }

        Ok(patch)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AdminAccountDraft {
    username: String,
    password: String,
    full_name: String,
}

impl Entity for AdminAccount {
    const KIND: &'static str = "admin account";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        let draft: AdminAccountDraft = from_payload(payload)?;

        let username = draft.username.trim().to_string();
        if username.chars().count() < 3 {
            return Err(invalid("Username must be at least 3 characters long"));
        }
        if draft.password.chars().count() < 4 {
            return Err(invalid("Password must be at least 4 characters long"));
        }
        let full_name = draft.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(invalid("Full name must not be blank"));
        }

        let password_hash =
            hash_password(&draft.password).map_err(|err| StoreError::from(err.to_string()))?;

        Ok(Self {
            id: String::new(),
            username,
            password_hash,
            full_name,
            created_at: String::new(),
        })
    }

    fn set_created_at(&mut self, timestamp: String) {
        self.created_at = timestamp;
    }
}

/// Public projection of an [`AdminAccount`]; what the API returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccountView {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub created_at: String,
}

impl From<AdminAccount> for AdminAccountView {
    fn from(account: AdminAccount) -> Self {
        Self {
            id: account.id,
            username: account.username,
            full_name: account.full_name,
            created_at: account.created_at,
        }
    }
}
