//! User endpoints.

use serde_json::Value;

use super::collect_pages;
use crate::client::IntercomClient;
use crate::error::IntercomError;
use crate::models::{Page, Resource, User, UserIdentity, UserQuery};

const USERS_PATH: &str = "users";

impl IntercomClient {
    /// Fetches one page of users matching `query`.
    ///
    /// Unset page and page size fall back to the API defaults.
    pub async fn list_users(&self, query: &UserQuery) -> Result<Page<User>, IntercomError> {
        let response = self.get(USERS_PATH, query.to_params()).await?;
        Ok(Page::from_response(response, "users"))
    }

    /// Fetches every user matching `query`, walking all pages.
    ///
    /// The page number in `query` is ignored.
    pub async fn all_users(&self, query: &UserQuery) -> Result<Vec<User>, IntercomError> {
        collect_pages(|page| {
            let query = query.clone().page(page);
            async move { self.list_users(&query).await }
        })
        .await
    }

    /// Finds a single user by email or user id.
    ///
    /// # Errors
    ///
    /// Returns `IntercomError::ResourceNotFound` if no such user exists.
    pub async fn find_user(&self, identity: &UserIdentity) -> Result<User, IntercomError> {
        identity.validate()?;
        let response = self
            .get(USERS_PATH, Value::Object(identity.to_params()))
            .await?;
        Ok(User::from_value(response))
    }

    /// Creates a user (or updates the user with the same identity).
    ///
    /// Only writable attributes are sent. Social and geolocation data are
    /// populated asynchronously by the API and need a later `find_user`.
    pub async fn create_user(&self, user: &User) -> Result<User, IntercomError> {
        user.identity().validate()?;
        let response = self.post(USERS_PATH, user.save_attributes()).await?;
        Ok(User::from_value(response))
    }

    /// Sends the user's writable attributes and merges the response back in.
    pub async fn save_user(&self, user: &mut User) -> Result<(), IntercomError> {
        user.identity().validate()?;
        let response = self.post(USERS_PATH, user.save_attributes()).await?;
        user.merge(response);
        Ok(())
    }

    /// Deletes a user, returning the deleted record.
    pub async fn delete_user(&self, identity: &UserIdentity) -> Result<User, IntercomError> {
        identity.validate()?;
        let response = self
            .delete(USERS_PATH, Value::Object(identity.to_params()))
            .await?;
        Ok(User::from_value(response))
    }
}
