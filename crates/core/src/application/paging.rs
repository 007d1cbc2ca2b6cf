// Page walkers: turn a page-fetching closure into a stream of items

use crate::domain::{CursorPage, CursorRequest, Page, PageRequest};
use crate::error::{Result, SdkError};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use std::future::Future;

/// Walk offset pages starting at `first` until `has_more()` is false
pub fn offset_stream<'a, T, F, Fut>(first: PageRequest, fetch: F) -> BoxStream<'a, Result<T>>
where
    T: Send + 'a,
    F: Fn(PageRequest) -> Fut + Send + 'a,
    Fut: Future<Output = Result<Page<T>>> + Send + 'a,
{
    stream::try_unfold(Some(first), move |next| {
        let pending = next.map(&fetch);
        async move {
            let Some(pending) = pending else {
                return Ok::<_, SdkError>(None);
            };
            let page = pending.await?;
            // An empty page never leads anywhere, whatever the flag says
            let next = if page.items.is_empty() {
                None
            } else {
                page.next_request()
            };
            Ok(Some((page.items, next)))
        }
    })
    .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
    .try_flatten()
    .boxed()
}

/// Walk cursor pages until the backend stops handing out cursors
pub fn cursor_stream<'a, T, F, Fut>(page_size: u32, fetch: F) -> BoxStream<'a, Result<T>>
where
    T: Send + 'a,
    F: Fn(CursorRequest) -> Fut + Send + 'a,
    Fut: Future<Output = Result<CursorPage<T>>> + Send + 'a,
{
    stream::try_unfold(Some(CursorRequest::first(page_size)), move |next| {
        let pending = next.map(&fetch);
        async move {
            let Some(pending) = pending else {
                return Ok::<_, SdkError>(None);
            };
            let page = pending.await?;
            let next = if page.items.is_empty() {
                None
            } else {
                page.next_request(page_size)
            };
            Ok(Some((page.items, next)))
        }
    })
    .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
    .try_flatten()
    .boxed()
}
