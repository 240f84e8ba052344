//! Resource operations on [`IntercomClient`](crate::client::IntercomClient).
//!
//! Each submodule adds an `impl IntercomClient` block for one resource.

use std::future::Future;

use crate::error::IntercomError;
use crate::models::Page;

mod companies;
mod events;
mod impressions;
mod message_threads;
mod notes;
mod tags;
mod users;

/// Walks a paginated listing from page 1 until the reported last page.
async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>, IntercomError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, IntercomError>>,
{
    let mut page = 1u32;
    let mut total_pages = 1i64;
    let mut items = Vec::new();

    while i64::from(page) <= total_pages {
        let result = fetch(page).await?;
        total_pages = result.total_pages.unwrap_or(0);
        tracing::trace!(page = page, total_pages = total_pages, "Fetched page");
        items.extend(result.items);
        page += 1;
    }

    Ok(items)
}
