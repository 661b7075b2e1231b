/* src/writer/blocking.rs */

use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[cfg(feature = "logging")]
use log::{debug, error};

use super::WriterError;
use super::lifecycle::{Lifecycle, OpenGuard};

/// Hands values written on the caller's thread to a consumer running on a
/// background thread.
///
/// Each [`open`](Self::open) starts a fresh thread that calls the consumer
/// once with an [`Items`] iterator over everything written to that session.
/// Closing the session ends the iterator and waits for the consumer to
/// return.
///
/// ```
/// use hdfs_util::writer::{AsyncWriter, Items, WriterError};
///
/// let writer = AsyncWriter::new(|items: Items<u32>| items.sum::<u32>());
/// let session = writer.open()?;
/// session.write(1)?;
/// session.write(2)?;
/// assert_eq!(session.close()?, 3);
/// # Ok::<(), WriterError>(())
/// ```
pub struct AsyncWriter<T, F> {
	consumer: Arc<F>,
	lifecycle: Lifecycle,
	_items: PhantomData<fn(T)>,
}

impl<T, F, R> AsyncWriter<T, F>
where
	T: Send + 'static,
	F: Fn(Items<T>) -> R + Send + Sync + 'static,
	R: Send + 'static,
{
	pub fn new(consumer: F) -> Self {
		Self {
			consumer: Arc::new(consumer),
			lifecycle: Lifecycle::default(),
			_items: PhantomData,
		}
	}

	/// Whether a session is currently open.
	pub fn is_open(&self) -> bool {
		self.lifecycle.is_open()
	}

	/// Opens a session and starts the consumer.
	///
	/// Fails with [`WriterError::InvalidState`] while another session of
	/// this writer is open.
	pub fn open(&self) -> Result<Session<'_, T, R>, WriterError> {
		let guard = self.lifecycle.enter()?;
		let (tx, rx) = mpsc::unbounded_channel();
		let consumer = Arc::clone(&self.consumer);

		let worker = thread::Builder::new()
			.name(format!("async-writer-{}", guard.cycle()))
			.spawn(move || consumer(Items { rx }))
			.map_err(WriterError::Spawn)?;

		#[cfg(feature = "logging")]
		debug!("Async writer session {} opened", guard.cycle());

		Ok(Session {
			tx: Some(tx),
			worker: Some(worker),
			guard,
			_unsync: PhantomData,
		})
	}

	/// Runs `body` inside a session.
	///
	/// The session is closed whether or not `body` succeeds, so the consumer
	/// always sees every value written before the failure. An error from
	/// `body` takes precedence over one from closing.
	pub fn scope<U, E>(&self, body: impl FnOnce(&Session<'_, T, R>) -> Result<U, E>) -> Result<U, E>
	where
		E: From<WriterError>,
	{
		let session = self.open()?;
		let outcome = body(&session);
		let closed = session.close();
		match outcome {
			Err(e) => Err(e),
			Ok(value) => closed.map(|_| value).map_err(E::from),
		}
	}
}

/// One open/close cycle of an [`AsyncWriter`].
///
/// Dropping the session closes it, blocking until the consumer returns.
///
/// A session can be moved to another thread but not shared between threads,
/// so writes always come from whichever thread owns it:
///
/// ```compile_fail
/// fn assert_sync<S: Sync>() {}
/// assert_sync::<hdfs_util::writer::Session<'static, u8, ()>>();
/// ```
pub struct Session<'w, T, R> {
	tx: Option<UnboundedSender<T>>,
	worker: Option<JoinHandle<R>>,
	guard: OpenGuard<'w>,
	_unsync: PhantomData<Cell<()>>,
}

impl<T, R> Session<'_, T, R> {
	/// Queues `value` for the consumer. Never blocks.
	pub fn write(&self, value: T) -> Result<(), WriterError> {
		let tx = self.tx.as_ref().ok_or(WriterError::InvalidState)?;
		tx.send(value).map_err(|_| WriterError::ConsumerGone)
	}

	/// Ends the sequence and waits for the consumer, returning its result.
	pub fn close(mut self) -> Result<R, WriterError> {
		self.finish().unwrap_or(Err(WriterError::InvalidState))
	}

	/// 1-based number of this session among the writer's sessions.
	pub fn cycle(&self) -> u64 {
		self.guard.cycle()
	}

	fn finish(&mut self) -> Option<Result<R, WriterError>> {
		// Dropping the sender is the end-of-sequence marker.
		drop(self.tx.take());
		let worker = self.worker.take()?;
		let result = worker.join().map_err(|_| WriterError::ConsumerPanicked);

		#[cfg(feature = "logging")]
		debug!("Async writer session {} closed", self.guard.cycle());

		Some(result)
	}
}

impl<T, R> Drop for Session<'_, T, R> {
	fn drop(&mut self) {
		let finished = self.finish();

		#[cfg(feature = "logging")]
		if let Some(Err(e)) = &finished {
			error!("Async writer session {} failed: {}", self.guard.cycle(), e);
		}
		#[cfg(not(feature = "logging"))]
		let _ = finished;
	}
}

/// Blocking iterator over the values written to a session.
///
/// Waits while the buffer is empty and ends once the session closes and
/// every queued value has been yielded. Must not be driven from inside an
/// async runtime.
pub struct Items<T> {
	rx: UnboundedReceiver<T>,
}

impl<T> Iterator for Items<T> {
	type Item = T;

	fn next(&mut self) -> Option<T> {
		self.rx.blocking_recv()
	}
}
