//! User account lifecycle.

use chrono::{DateTime, Utc};
use packdex_core::{AlbumId, DomainError, DomainResult, UserId};
use packdex_store::CollectionStore;
use std::sync::Arc;
use tracing::info;

/// A user with their album id resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetail {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub album_id: AlbumId,
    pub created_at: DateTime<Utc>,
}

/// Account operations: create-with-album, detail, update, delete, list.
pub struct UserService {
    store: Arc<dyn CollectionStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// Register a user. The user and their empty album are persisted in
    /// one atomic write.
    ///
    /// # Errors
    /// - `InvalidArgument` for a blank name or an implausible email
    /// - `Conflict` if the email is already registered
    pub async fn create(&self, name: &str, email: &str) -> DomainResult<UserDetail> {
        validate(name, email)?;

        let (user, album) = self.store.create_user(name.trim(), email.trim()).await?;
        info!(user = %user.id, album = %album.id, "User registered");
        Ok(UserDetail {
            id: user.id,
            name: user.name,
            email: user.email,
            album_id: album.id,
            created_at: user.created_at,
        })
    }

    pub async fn detail(&self, id: UserId) -> DomainResult<UserDetail> {
        let user = self.store.user(id).await?;
        let album = self.store.album_for_user(id).await?;
        Ok(UserDetail {
            id: user.id,
            name: user.name,
            email: user.email,
            album_id: album.id,
            created_at: user.created_at,
        })
    }

    /// Update name and email.
    pub async fn update(&self, id: UserId, name: &str, email: &str) -> DomainResult<UserDetail> {
        validate(name, email)?;

        let user = self.store.update_user(id, name.trim(), email.trim()).await?;
        let album = self.store.album_for_user(id).await?;
        Ok(UserDetail {
            id: user.id,
            name: user.name,
            email: user.email,
            album_id: album.id,
            created_at: user.created_at,
        })
    }

    /// Delete a user. Cascades to the album, its cards, and any proposal
    /// referencing the user.
    pub async fn delete(&self, id: UserId) -> DomainResult<()> {
        self.store.delete_user(id).await?;
        info!(user = %id, "User deleted");
        Ok(())
    }

    pub async fn list(&self) -> DomainResult<Vec<UserDetail>> {
        let users = self.store.list_users().await?;
        let mut details = Vec::with_capacity(users.len());
        for user in users {
            let album = self.store.album_for_user(user.id).await?;
            details.push(UserDetail {
                id: user.id,
                name: user.name,
                email: user.email,
                album_id: album.id,
                created_at: user.created_at,
            });
        }
        Ok(details)
    }
}

fn validate(name: &str, email: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidArgument(
            "name must not be blank".to_string(),
        ));
    }
    let plausible = email
        .trim()
        .split_once('@')
        .map_or(false, |(local, domain)| {
            !local.is_empty() && !domain.is_empty()
        });
    if !plausible {
        return Err(DomainError::InvalidArgument(format!(
            "implausible email: {email}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use packdex_core::{CardDraft, Rarity};
    use packdex_store::MemoryStore;

    fn service() -> (Arc<MemoryStore>, UserService) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), UserService::new(store))
    }

    #[tokio::test]
    async fn test_create_returns_album_id() {
        let (_, users) = service();

        let detail = users.create("Ana", "ana@example.com").await.unwrap();
        assert_eq!(detail.name, "Ana");
        assert_eq!(detail.album_id, AlbumId::new(1));
    }

    #[tokio::test]
    async fn test_create_trims_whitespace() {
        let (_, users) = service();

        let detail = users.create("  Ana  ", " ana@example.com ").await.unwrap();
        assert_eq!(detail.name, "Ana");
        assert_eq!(detail.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_blank_name_is_invalid_argument() {
        let (_, users) = service();
        let err = users.create("   ", "ana@example.com").await.unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
    }

    #[tokio::test]
    async fn test_implausible_email_is_invalid_argument() {
        let (_, users) = service();
        for email in ["", "not-an-email", "@example.com", "ana@"] {
            let err = users.create("Ana", email).await.unwrap_err();
            assert_eq!(err.kind(), "invalid_argument", "email: {email:?}");
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let (_, users) = service();
        users.create("Ana", "ana@example.com").await.unwrap();

        let err = users.create("Ana Twin", "ana@example.com").await.unwrap_err();
        assert_eq!(err.kind(), "conflict");
    }

    #[tokio::test]
    async fn test_update_changes_fields() {
        let (_, users) = service();
        let created = users.create("Ana", "ana@example.com").await.unwrap();

        let updated = users
            .update(created.id, "Ana Maria", "ana.maria@example.com")
            .await
            .unwrap();
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.email, "ana.maria@example.com");
        assert_eq!(updated.album_id, created.album_id);
    }

    #[tokio::test]
    async fn test_delete_cascades_cards() {
        let (store, users) = service();
        let created = users.create("Ana", "ana@example.com").await.unwrap();
        store
            .insert_cards(
                created.album_id,
                vec![CardDraft {
                    character_id: 1,
                    character_name: "Rick Sanchez".to_string(),
                    rarity: Rarity::Common,
                }],
            )
            .await
            .unwrap();

        users.delete(created.id).await.unwrap();

        assert_eq!(users.detail(created.id).await.unwrap_err().kind(), "not_found");
        assert!(store
            .cards_in_album(created.album_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_list_resolves_album_ids() {
        let (_, users) = service();
        users.create("Ana", "ana@example.com").await.unwrap();
        users.create("Bob", "bob@example.com").await.unwrap();

        let all = users.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Ana");
        assert_eq!(all[1].name, "Bob");
        assert_ne!(all[0].album_id, all[1].album_id);
    }
}
