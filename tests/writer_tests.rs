/* tests/writer_tests.rs */

#![cfg(feature = "writer")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use hdfs_util::writer::{AsyncWriter, Items, WriterError};

type Results = Arc<Mutex<Vec<Vec<i32>>>>;

fn recording_writer() -> (AsyncWriter<i32, impl Fn(Items<i32>) + Send + Sync + 'static>, Results) {
	let results: Results = Arc::default();
	let sink = Arc::clone(&results);
	let writer = AsyncWriter::new(move |items: Items<i32>| {
		let batch: Vec<i32> = items.collect();
		sink.lock().unwrap().push(batch);
	});
	(writer, results)
}

#[test]
fn test_basic() -> Result<(), WriterError> {
	let (writer, results) = recording_writer();
	{
		let session = writer.open()?;
		session.write(1)?;
		session.write(2)?;
	}
	assert_eq!(*results.lock().unwrap(), vec![vec![1, 2]]);
	assert!(!writer.is_open());
	Ok(())
}

#[test]
fn test_close_returns_consumer_result() -> Result<(), WriterError> {
	let writer = AsyncWriter::new(|items: Items<String>| items.collect::<Vec<_>>().join(","));
	let session = writer.open()?;
	session.write("a".into())?;
	session.write("b".into())?;
	assert_eq!(session.close()?, "a,b");
	Ok(())
}

#[test]
fn test_multiple_uses() -> Result<(), WriterError> {
	let (writer, results) = recording_writer();
	writer.scope(|session| {
		session.write(1)?;
		session.write(2)
	})?;
	writer.scope(|session| {
		session.write(3)?;
		session.write(4)
	})?;
	assert_eq!(*results.lock().unwrap(), vec![vec![1, 2], vec![3, 4]]);
	Ok(())
}

#[test]
fn test_cycles_increase_across_reuse() {
	let (writer, _) = recording_writer();
	let first = writer.open().unwrap();
	assert_eq!(first.cycle(), 1);
	first.close().unwrap();
	let second = writer.open().unwrap();
	assert_eq!(second.cycle(), 2);
}

#[test]
fn test_session_moves_to_another_thread() {
	let (writer, results) = recording_writer();
	std::thread::scope(|scope| {
		let session = writer.open().unwrap();
		session.write(1).unwrap();
		scope.spawn(move || {
			session.write(2).unwrap();
			session.close().unwrap();
		});
	});
	assert_eq!(*results.lock().unwrap(), vec![vec![1, 2]]);
	assert!(!writer.is_open());
}

#[test]
fn test_nested_open_fails() {
	let (writer, results) = recording_writer();
	let outer = writer.open().unwrap();
	outer.write(1).unwrap();
	assert!(writer.is_open());
	assert!(matches!(writer.open(), Err(WriterError::InvalidState)));
	outer.write(2).unwrap();
	outer.close().unwrap();
	assert_eq!(*results.lock().unwrap(), vec![vec![1, 2]]);
}

#[test]
fn test_nested_scope_fails_and_drains_outer() {
	let (writer, results) = recording_writer();
	let outcome = writer.scope(|outer| {
		outer.write(1)?;
		writer.scope(|inner| inner.write(2))
	});
	assert!(matches!(outcome, Err(WriterError::InvalidState)));
	assert_eq!(*results.lock().unwrap(), vec![vec![1]]);
}

#[derive(Debug, PartialEq)]
enum UploadError {
	Aborted,
	Writer(String),
}

impl From<WriterError> for UploadError {
	fn from(e: WriterError) -> Self {
		Self::Writer(e.to_string())
	}
}

#[test]
fn test_failing_scope_still_drains() {
	let (writer, results) = recording_writer();
	let outcome: Result<(), UploadError> = writer.scope(|session| {
		session.write(1)?;
		session.write(2)?;
		Err(UploadError::Aborted)
	});
	assert_eq!(outcome, Err(UploadError::Aborted));
	assert_eq!(*results.lock().unwrap(), vec![vec![1, 2]]);
	assert!(!writer.is_open());
}

#[test]
fn test_panicking_producer_still_drains() {
	let (writer, results) = recording_writer();
	let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
		let session = writer.open().unwrap();
		session.write(7).unwrap();
		panic!("producer failed");
	}));
	assert!(outcome.is_err());
	assert_eq!(*results.lock().unwrap(), vec![vec![7]]);
	assert!(!writer.is_open());
}

#[test]
fn test_consumer_sees_items_while_open() {
	let (seen_tx, seen_rx) = std::sync::mpsc::channel();
	let writer = AsyncWriter::new(move |items: Items<i32>| {
		for item in items {
			seen_tx.send(item).unwrap();
		}
	});
	let session = writer.open().unwrap();
	session.write(5).unwrap();
	assert_eq!(seen_rx.recv().unwrap(), 5);
	session.write(6).unwrap();
	assert_eq!(seen_rx.recv().unwrap(), 6);
	session.close().unwrap();
}

#[test]
fn test_write_after_consumer_returns() {
	let writer = AsyncWriter::new(|mut items: Items<i32>| items.next());
	let session = writer.open().unwrap();
	session.write(1).unwrap();

	// The consumer returns after the first item and drops its iterator.
	let mut outcome = Ok(());
	for value in 2..5_000 {
		outcome = session.write(value);
		if outcome.is_err() {
			break;
		}
		std::thread::sleep(Duration::from_millis(1));
	}
	assert!(matches!(outcome, Err(WriterError::ConsumerGone)));
	assert_eq!(session.close().unwrap(), Some(1));
}

#[test]
fn test_consumer_panic_is_reported() {
	let writer = AsyncWriter::new(|items: Items<i32>| {
		for item in items {
			if item == 3 {
				panic!("bad item");
			}
		}
	});
	let session = writer.open().unwrap();
	session.write(3).unwrap();
	assert!(matches!(session.close(), Err(WriterError::ConsumerPanicked)));
}
