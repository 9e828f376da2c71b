//! HTTP API clients for the Book Store surface.

mod books;
mod client;

pub use books::{
    AccountProfile, ApiErrorBody, Book, BookStoreApi, Library,
};
pub use client::ApiClient;
