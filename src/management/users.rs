use crate::{
    error::{CatalogError, Result},
    ids,
    types::{Album, AlbumId, Playlist, PlaylistId, ProfileField, User, UserType},
};

use super::Catalog;

/// Outcome of removing a user. Albums and playlists the user authored are
/// left in place and keep pointing at the removed id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedUser {
    pub user: User,
    pub orphaned_albums: Vec<AlbumId>,
    pub orphaned_playlists: Vec<PlaylistId>,
}

pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::validation(format!("{} must not be empty", field)));
    }
    Ok(value.to_string())
}

pub(crate) fn find_user_mut<'a>(users: &'a mut [User], id: &str) -> Result<&'a mut User> {
    users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| CatalogError::not_found("user", id))
}

impl Catalog {
    /// Creates a new account with empty liked sets.
    ///
    /// # Arguments
    ///
    /// * `name`, `email`, `username` - trimmed; none may be empty
    /// * `kind` - listener or musician; only musicians can publish albums
    ///
    /// # Errors
    ///
    /// - `Validation` if a field is empty
    /// - `DuplicateUsername` if another account already uses `username`
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        username: &str,
        kind: UserType,
    ) -> Result<User> {
        let name = required("name", name)?;
        let email = required("email", email)?;
        let username = required("username", username)?;

        self.update::<User, _, _>(|users| {
            if users.iter().any(|u| u.username == username) {
                return Err(CatalogError::DuplicateUsername(username));
            }

            let user = User::new(ids::new_user_id(), name, email, username, kind);
            users.push(user.clone());
            Ok(user)
        })
        .await
    }

    /// True if any account already uses `username`.
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let users: Vec<User> = self.read().await?;
        Ok(users.iter().any(|u| u.username == username))
    }

    /// Every account in stored order.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.read().await
    }

    /// Looks up an account by id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no user has `id`, including users that were deleted.
    pub async fn find_user(&self, id: &str) -> Result<User> {
        let users: Vec<User> = self.read().await?;
        users
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(|| CatalogError::not_found("user", id))
    }

    /// Looks up an account by its unique username.
    pub async fn find_by_username(&self, username: &str) -> Result<User> {
        let users: Vec<User> = self.read().await?;
        users
            .into_iter()
            .find(|u| u.username == username)
            .ok_or_else(|| CatalogError::not_found("user", username))
    }

    /// Users whose name contains `query`, ignoring case. `exclude` drops the
    /// account with that username from the results.
    pub async fn search_users(&self, query: &str, exclude: Option<&str>) -> Result<Vec<User>> {
        let query = query.to_lowercase();
        let users: Vec<User> = self.read().await?;
        Ok(users
            .into_iter()
            .filter(|u| u.name.to_lowercase().contains(&query))
            .filter(|u| exclude.is_none_or(|name| u.username != name))
            .collect())
    }

    /// Changes one profile field. A new username is checked against every
    /// other account inside the same write cycle.
    pub async fn edit_profile(&self, user_id: &str, field: ProfileField, value: &str) -> Result<User> {
        let value = required(
            match field {
                ProfileField::Name => "name",
                ProfileField::Email => "email",
                ProfileField::Username => "username",
            },
            value,
        )?;

        self.update::<User, _, _>(|users| {
            if field == ProfileField::Username
                && users.iter().any(|u| u.username == value && u.id != user_id)
            {
                return Err(CatalogError::DuplicateUsername(value));
            }

            let user = find_user_mut(users, user_id)?;
            match field {
                ProfileField::Name => user.name = value,
                ProfileField::Email => user.email = value,
                ProfileField::Username => user.username = value,
            }
            Ok(user.clone())
        })
        .await
    }

    /// Hard-deletes a user. Authored albums and playlists are orphaned, not
    /// removed or reassigned; they are listed in the returned value.
    pub async fn delete_user(&self, user_id: &str) -> Result<DeletedUser> {
        let user = self
            .update::<User, _, _>(|users| {
                let index = ids::position_of(users, &user_id.to_string())
                    .ok_or_else(|| CatalogError::not_found("user", user_id))?;
                Ok(users.remove(index))
            })
            .await?;

        let albums: Vec<Album> = self.read().await?;
        let playlists: Vec<Playlist> = self.read().await?;

        Ok(DeletedUser {
            orphaned_albums: albums
                .iter()
                .filter(|a| a.artist == user.id)
                .map(|a| a.id)
                .collect(),
            orphaned_playlists: playlists
                .iter()
                .filter(|p| p.creator == user.id)
                .map(|p| p.id)
                .collect(),
            user,
        })
    }
}
