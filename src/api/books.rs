//! Typed client for the Book Store endpoints.
//!
//! One operation per endpoint; each composes a request and funnels the
//! response through [`ApiClient::validate`] with the status set that
//! endpoint legitimately produces. Sequencing (add before replace, etc.)
//! is the calling scenario's responsibility; the operations are stateless
//! with respect to each other.

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::api::client::ApiClient;
use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};

const BOOKS: &str = "/BookStore/v1/Books";
const BOOK: &str = "/BookStore/v1/Book";
const ACCOUNT_USER: &str = "/Account/v1/User";

/// A catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique key
    pub isbn: String,
    /// Title
    pub title: String,
    /// Subtitle
    #[serde(rename = "subTitle")]
    pub sub_title: String,
    /// Author
    pub author: String,
    /// Publish date (ISO-8601 as the service renders it)
    pub publish_date: String,
    /// Publisher
    pub publisher: String,
    /// Page count
    pub pages: u32,
    /// Description
    pub description: String,
    /// Website
    pub website: String,
}

/// The full catalog wrapper returned by the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Library {
    /// Every book in the catalog
    pub books: Vec<Book>,
}

/// Machine-readable error body for 4xx responses.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    /// Error code (e.g. "1205" for an unknown ISBN)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

/// Account profile with the user's current collection.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountProfile {
    /// Owning account id
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Account name
    pub username: String,
    /// Books currently in the collection
    pub books: Vec<Book>,
}

impl AccountProfile {
    /// ISBNs currently in the collection, in service order.
    #[must_use]
    pub fn isbns(&self) -> Vec<&str> {
        self.books.iter().map(|b| b.isbn.as_str()).collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IsbnRef<'a> {
    isbn: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddBooksRequest<'a> {
    user_id: &'a str,
    collection_of_isbns: Vec<IsbnRef<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplaceBookRequest<'a> {
    user_id: &'a str,
    isbn: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBookRequest<'a> {
    user_id: &'a str,
    isbn: &'a str,
}

/// Client for the Book Store API.
#[derive(Debug, Clone)]
pub struct BookStoreApi {
    api: ApiClient,
}

impl BookStoreApi {
    /// Create a client targeting the configured deployment.
    pub fn new(config: &SuiteConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    /// The shared transport, for scenario-level raw requests.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// List the whole catalog. Expects 200.
    pub async fn all_books(&self) -> SuiteResult<Library> {
        let response = self.api.http().get(self.api.url(BOOKS)).send().await?;
        let body = self.api.validate(response, &[StatusCode::OK]).await?;
        Ok(serde_json::from_value(require_body(body)?)?)
    }

    /// Fetch one book by ISBN without validating the outcome.
    ///
    /// Scenarios use this to inspect the 4xx contract for unknown keys
    /// (status 400, code "1205") that [`Self::book_by_isbn`] would reject.
    pub async fn fetch_book(&self, isbn: &str) -> SuiteResult<Response> {
        Ok(self
            .api
            .http()
            .get(self.api.url(BOOK))
            .query(&[("ISBN", isbn)])
            .send()
            .await?)
    }

    /// Fetch one book by ISBN. Expects 200.
    pub async fn book_by_isbn(&self, isbn: &str) -> SuiteResult<Book> {
        let response = self.fetch_book(isbn).await?;
        let body = self.api.validate(response, &[StatusCode::OK]).await?;
        Ok(serde_json::from_value(require_body(body)?)?)
    }

    /// Add a batch of ISBNs to the user's collection. Expects 201.
    pub async fn add_to_collection(
        &self,
        user_id: &str,
        isbns: &[&str],
        token: &str,
    ) -> SuiteResult<()> {
        info!(user_id, count = isbns.len(), "adding books to collection");
        let request = AddBooksRequest {
            user_id,
            collection_of_isbns: isbns.iter().map(|&isbn| IsbnRef { isbn }).collect(),
        };
        let response = self
            .api
            .http()
            .post(self.api.url(BOOKS))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;
        self.api.validate(response, &[StatusCode::CREATED]).await?;
        Ok(())
    }

    /// Replace `current_isbn` with `new_isbn` in the collection. Expects 200.
    pub async fn replace_in_collection(
        &self,
        user_id: &str,
        current_isbn: &str,
        new_isbn: &str,
        token: &str,
    ) -> SuiteResult<()> {
        info!(user_id, current_isbn, new_isbn, "replacing book in collection");
        let request = ReplaceBookRequest {
            user_id,
            isbn: new_isbn,
        };
        let response = self
            .api
            .http()
            .put(format!("{}/{current_isbn}", self.api.url(BOOKS)))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;
        self.api.validate(response, &[StatusCode::OK]).await?;
        Ok(())
    }

    /// Delete one ISBN from the collection.
    ///
    /// The service returns 204 when the book was present and 400 when it
    /// was not; callers must treat both as terminal success.
    pub async fn delete_from_collection(
        &self,
        user_id: &str,
        isbn: &str,
        token: &str,
    ) -> SuiteResult<()> {
        info!(user_id, isbn, "deleting book from collection");
        let request = DeleteBookRequest { user_id, isbn };
        let response = self
            .api
            .http()
            .delete(self.api.url(BOOK))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;
        self.api
            .validate(response, &[StatusCode::NO_CONTENT, StatusCode::BAD_REQUEST])
            .await?;
        Ok(())
    }

    /// Delete the user's entire collection.
    ///
    /// 204 when something was deleted, 404 when the collection was already
    /// empty; both are success.
    pub async fn delete_collection(&self, user_id: &str, token: &str) -> SuiteResult<()> {
        info!(user_id, "deleting whole collection");
        let response = self
            .api
            .http()
            .delete(self.api.url(BOOKS))
            .query(&[("UserId", user_id)])
            .bearer_auth(token)
            .send()
            .await?;
        self.api
            .validate(response, &[StatusCode::NO_CONTENT, StatusCode::NOT_FOUND])
            .await?;
        Ok(())
    }

    /// Read back the account profile with its current collection. Expects 200.
    pub async fn user_collection(&self, user_id: &str, token: &str) -> SuiteResult<AccountProfile> {
        let response = self
            .api
            .http()
            .get(format!("{}/{user_id}", self.api.url(ACCOUNT_USER)))
            .bearer_auth(token)
            .send()
            .await?;
        let body = self.api.validate(response, &[StatusCode::OK]).await?;
        Ok(serde_json::from_value(require_body(body)?)?)
    }
}

fn require_body(body: Option<Value>) -> SuiteResult<Value> {
    body.ok_or_else(|| SuiteError::assertion("expected a JSON response body, got none"))
}
