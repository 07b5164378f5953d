use crate::domain::model::User;
use crate::domain::ports::{Storage, UserStore};
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

const USERS_KEY: &str = "users.json";
const PASSWORDS_KEY: &str = "passwords.json";
const SESSION_KEY: &str = "current_user.json";

/// Users, credentials, and the current operator session, each under its own
/// fixed key. Credentials are salted SHA-256 digests (`salt$digest`, hex);
/// plaintext passwords are never written.
pub struct FileUserStore<S: Storage> {
    storage: S,
}

impl<S: Storage> FileUserStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// First access seeds the default accounts so a fresh data directory is
    /// immediately usable.
    async fn load_users(&self) -> Result<Vec<User>> {
        if let Ok(bytes) = self.storage.read_file(USERS_KEY).await {
            return match serde_json::from_slice(&bytes) {
                Ok(users) => Ok(users),
                Err(e) => {
                    tracing::warn!("Failed to parse stored users: {}", e);
                    Ok(Vec::new())
                }
            };
        }

        let users = default_users();
        let passwords: HashMap<String, String> = users
            .iter()
            .map(|user| (user.username.clone(), hash_password("password")))
            .collect();

        self.save_users(&users).await?;
        self.save_passwords(&passwords).await?;
        Ok(users)
    }

    async fn load_passwords(&self) -> Result<HashMap<String, String>> {
        let bytes = match self.storage.read_file(PASSWORDS_KEY).await {
            Ok(bytes) => bytes,
            Err(_) => return Ok(HashMap::new()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(passwords) => Ok(passwords),
            Err(e) => {
                tracing::warn!("Failed to parse stored credentials: {}", e);
                Ok(HashMap::new())
            }
        }
    }

    async fn save_users(&self, users: &[User]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(users)?;
        self.storage.write_file(USERS_KEY, &bytes).await
    }

    async fn save_passwords(&self, passwords: &HashMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(passwords)?;
        self.storage.write_file(PASSWORDS_KEY, &bytes).await
    }
}

#[async_trait]
impl<S: Storage> UserStore for FileUserStore<S> {
    async fn list(&self) -> Result<Vec<User>> {
        self.load_users().await
    }

    async fn add(&self, user: User, password: &str) -> Result<()> {
        let mut users = self.load_users().await?;
        if users.iter().any(|u| u.username == user.username) {
            return Err(RelayError::Auth {
                message: format!("Username already exists: {}", user.username),
            });
        }

        let mut passwords = self.load_passwords().await?;
        passwords.insert(user.username.clone(), hash_password(password));
        users.push(user);

        self.save_users(&users).await?;
        self.save_passwords(&passwords).await
    }

    async fn update(&self, user: User) -> Result<()> {
        let mut users = self.load_users().await?;
        let Some(slot) = users.iter_mut().find(|u| u.id == user.id) else {
            return Err(RelayError::Auth {
                message: format!("No such user id: {}", user.id),
            });
        };
        *slot = user.clone();
        self.save_users(&users).await?;

        // Keep the active session in step with the edited account.
        if let Some(current) = self.current_user().await? {
            if current.id == user.id {
                self.set_current_user(Some(&user)).await?;
            }
        }
        Ok(())
    }

    async fn remove(&self, username: &str) -> Result<()> {
        let mut users = self.load_users().await?;
        let before = users.len();
        users.retain(|u| u.username != username);
        if users.len() == before {
            return Err(RelayError::Auth {
                message: format!("No such user: {}", username),
            });
        }

        let mut passwords = self.load_passwords().await?;
        passwords.remove(username);

        self.save_users(&users).await?;
        self.save_passwords(&passwords).await
    }

    async fn verify(&self, username: &str, password: &str) -> Result<Option<User>> {
        let users = self.load_users().await?;
        let passwords = self.load_passwords().await?;

        let found = users.into_iter().find(|u| u.username == username);
        match (found, passwords.get(username)) {
            (Some(user), Some(stored)) if verify_password(stored, password) => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    async fn current_user(&self) -> Result<Option<User>> {
        let bytes = match self.storage.read_file(SESSION_KEY).await {
            Ok(bytes) => bytes,
            Err(_) => return Ok(None),
        };

        match serde_json::from_slice(&bytes) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!("Failed to parse stored session: {}", e);
                Ok(None)
            }
        }
    }

    async fn set_current_user(&self, user: Option<&User>) -> Result<()> {
        match user {
            Some(user) => {
                let bytes = serde_json::to_vec_pretty(user)?;
                self.storage.write_file(SESSION_KEY, &bytes).await
            }
            None => match self.storage.remove_file(SESSION_KEY).await {
                Ok(()) => Ok(()),
                Err(RelayError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e),
            },
        }
    }
}

fn default_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "Admin User".to_string(),
            username: "admin".to_string(),
            role: "admin".to_string(),
            email: "admin@example.com".to_string(),
        },
        User {
            id: "2".to_string(),
            name: "Test User".to_string(),
            username: "user".to_string(),
            role: "user".to_string(),
            email: "user@example.com".to_string(),
        },
    ]
}

fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::rng().random();
    format!("{}${}", hex::encode(salt), hex::encode(digest(&salt, password)))
}

fn verify_password(stored: &str, password: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    hex::encode(digest(&salt, password)) == digest_hex
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}
