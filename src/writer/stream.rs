/* src/writer/stream.rs */

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::WriterError;
use super::lifecycle::{Lifecycle, OpenGuard};

/// Task-based counterpart of [`AsyncWriter`](super::AsyncWriter).
///
/// The consumer is an async function receiving an [`ItemStream`]; each
/// session spawns it on the current tokio runtime.
pub struct StreamWriter<T, F> {
	consumer: Arc<F>,
	lifecycle: Lifecycle,
	_items: PhantomData<fn(T)>,
}

impl<T, F, Fut> StreamWriter<T, F>
where
	T: Send + 'static,
	F: Fn(ItemStream<T>) -> Fut + Send + Sync + 'static,
	Fut: Future + Send + 'static,
	Fut::Output: Send + 'static,
{
	pub fn new(consumer: F) -> Self {
		Self {
			consumer: Arc::new(consumer),
			lifecycle: Lifecycle::default(),
			_items: PhantomData,
		}
	}

	pub fn is_open(&self) -> bool {
		self.lifecycle.is_open()
	}

	/// Opens a session and spawns the consumer task.
	pub fn open(&self) -> Result<StreamSession<'_, T, Fut::Output>, WriterError> {
		let handle = Handle::try_current().map_err(|_| WriterError::NoRuntime)?;
		let guard = self.lifecycle.enter()?;
		let (tx, rx) = mpsc::unbounded_channel();

		let items = ItemStream {
			inner: UnboundedReceiverStream::new(rx),
		};
		let task = handle.spawn((self.consumer)(items));

		tracing::debug!(cycle = guard.cycle(), "Stream writer session opened");

		Ok(StreamSession {
			tx: Some(tx),
			task: Some(task),
			guard,
		})
	}

	/// Runs `body` inside a session, closing it afterwards even when `body`
	/// fails. An error from `body` takes precedence over one from closing.
	pub async fn scope<U, E>(
		&self,
		body: impl AsyncFnOnce(&StreamSession<'_, T, Fut::Output>) -> Result<U, E>,
	) -> Result<U, E>
	where
		E: From<WriterError>,
	{
		let session = self.open()?;
		let outcome = body(&session).await;
		let closed = session.close().await;
		match outcome {
			Err(e) => Err(e),
			Ok(value) => closed.map(|_| value).map_err(E::from),
		}
	}
}

/// One open/close cycle of a [`StreamWriter`].
///
/// Call [`close`](Self::close) to wait for the consumer. A session dropped
/// without closing still ends the stream, but the consumer finishes
/// detached.
pub struct StreamSession<'w, T, R> {
	tx: Option<UnboundedSender<T>>,
	task: Option<JoinHandle<R>>,
	guard: OpenGuard<'w>,
}

impl<T, R> StreamSession<'_, T, R> {
	pub fn write(&self, value: T) -> Result<(), WriterError> {
		let tx = self.tx.as_ref().ok_or(WriterError::InvalidState)?;
		tx.send(value).map_err(|_| WriterError::ConsumerGone)
	}

	/// Ends the stream and waits for the consumer task.
	pub async fn close(mut self) -> Result<R, WriterError> {
		drop(self.tx.take());
		let task = self.task.take().ok_or(WriterError::InvalidState)?;
		let result = task.await.map_err(|e| {
			if e.is_panic() {
				WriterError::ConsumerPanicked
			} else {
				WriterError::ConsumerCancelled
			}
		});
		tracing::debug!(cycle = self.guard.cycle(), "Stream writer session closed");
		result
	}

	pub fn cycle(&self) -> u64 {
		self.guard.cycle()
	}
}

impl<T, R> Drop for StreamSession<'_, T, R> {
	fn drop(&mut self) {
		if self.task.is_some() {
			tracing::warn!(
				cycle = self.guard.cycle(),
				"Stream writer session dropped without close; consumer continues detached"
			);
		}
	}
}

/// Stream over the values written to a [`StreamSession`].
pub struct ItemStream<T> {
	inner: UnboundedReceiverStream<T>,
}

impl<T> Stream for ItemStream<T> {
	type Item = T;

	fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
		Pin::new(&mut self.inner).poll_next(cx)
	}
}
