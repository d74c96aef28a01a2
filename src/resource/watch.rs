// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lazy watch event streams.

use crate::error::{AgentsError, Result};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use kube::api::{DynamicObject, WatchEvent};
use serde::de::DeserializeOwned;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A pull-driven stream of watch events backed by one HTTP connection.
///
/// The stream ends when the server closes the watch, and right after it
/// yields an `Error` event or a transport error. Dropping the stream (or
/// calling [`WatchStream::close`]) releases the connection; call `watch`
/// again to restart.
pub struct WatchStream<K> {
    inner: Option<BoxStream<'static, Result<WatchEvent<K>>>>,
}

impl<K> WatchStream<K> {
    pub(crate) fn new(inner: BoxStream<'static, Result<WatchEvent<K>>>) -> Self {
        Self { inner: Some(inner) }
    }

    /// Whether the underlying connection has been released
    pub fn is_terminated(&self) -> bool {
        self.inner.is_none()
    }

    /// Stop watching and release the connection
    pub fn close(mut self) {
        self.inner = None;
    }
}

impl<K> Stream for WatchStream<K> {
    type Item = Result<WatchEvent<K>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(inner) = this.inner.as_mut() else {
            return Poll::Ready(None);
        };

        match inner.poll_next_unpin(cx) {
            Poll::Ready(Some(item)) => {
                if matches!(item, Ok(WatchEvent::Error(_)) | Err(_)) {
                    this.inner = None;
                }
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                this.inner = None;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl WatchStream<DynamicObject> {
    /// Convert every event's object into a typed model
    pub fn into_typed<K>(self) -> WatchStream<K>
    where
        K: DeserializeOwned + Send + 'static,
    {
        WatchStream {
            inner: self
                .inner
                .map(|inner| inner.map(|item| item.and_then(typed_event)).boxed()),
        }
    }
}

fn typed_event<K: DeserializeOwned>(event: WatchEvent<DynamicObject>) -> Result<WatchEvent<K>> {
    Ok(match event {
        WatchEvent::Added(obj) => WatchEvent::Added(to_typed(obj)?),
        WatchEvent::Modified(obj) => WatchEvent::Modified(to_typed(obj)?),
        WatchEvent::Deleted(obj) => WatchEvent::Deleted(to_typed(obj)?),
        WatchEvent::Bookmark(bookmark) => WatchEvent::Bookmark(bookmark),
        WatchEvent::Error(err) => WatchEvent::Error(err),
    })
}

fn to_typed<K: DeserializeOwned>(obj: DynamicObject) -> Result<K> {
    serde_json::to_value(obj)
        .and_then(serde_json::from_value)
        .map_err(AgentsError::from)
}
