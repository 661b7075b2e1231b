/* demos/basic.rs */

use hdfs_util::config::Config;
use hdfs_util::human::{format_elapsed, format_size};
use hdfs_util::writer::{AsyncWriter, ItemStream, Items, StreamWriter};
use serde::Deserialize;
use std::time::Instant;
use tokio_stream::StreamExt;

#[derive(Debug, Deserialize)]
struct Alias {
	url: String,
	user: Option<String>,
	root: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 0. Prepare an rc file
	let dir = tempfile::tempdir()?;
	let rc_path = dir.path().join("hdfscli.cfg");
	std::fs::write(
		&rc_path,
		"[global]\ndefault.alias = dev\n\n[dev.alias]\nurl = http://localhost:50070\nuser = alice\n\n[prod_alias]\nurl = http://namenode:50070\nroot = /data\n",
	)?;
	println!("Created {}", rc_path.display());

	// 1. Resolve the default alias
	let config = Config::load(Some(rc_path.as_path()))?;
	println!("Aliases: {:?}", config.aliases());
	let name = config.default_alias().unwrap_or("prod");
	let alias: Alias = config.get_alias_as(name)?;
	println!("Using {} -> {:?}", name, alias);

	// 2. Feed chunks to a background "upload" on a thread
	let started = Instant::now();
	let writer = AsyncWriter::new(|chunks: Items<Vec<u8>>| chunks.map(|c| c.len() as u64).sum::<u64>());
	let session = writer.open()?;
	for _ in 0..64 {
		session.write(vec![0u8; 16 * 1024])?;
	}
	let uploaded = session.close()?;
	println!(
		"Uploaded {} in {}",
		format_size(uploaded),
		format_elapsed(started.elapsed())
	);

	// 3. Same, with the consumer as a tokio task
	let writer = StreamWriter::new(|chunks: ItemStream<Vec<u8>>| async move {
		chunks.fold(0u64, |total, c| total + c.len() as u64).await
	});
	let appended = writer
		.scope(async |session: &hdfs_util::writer::StreamSession<'_, Vec<u8>, u64>| {
			for _ in 0..8 {
				session.write(vec![1u8; 4096])?;
			}
			Ok::<_, hdfs_util::Error>(())
		})
		.await;
	println!("Append finished: {:?}", appended);
	println!("Target root: {}", alias.root.as_deref().unwrap_or("/"));
	if let Some(user) = &alias.user {
		println!("Acting as {}", user);
	}
	println!("Connecting to {}", alias.url);

	Ok(())
}
