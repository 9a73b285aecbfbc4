//! Background worker that runs preview commands off the UI thread.
//!
//! Requests carry an increasing id. Before running anything the worker drains
//! the queue so only the newest request is executed, and finished previews are
//! kept in a small LRU cache keyed by the command line.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use super::{PreviewContent, ansi};
use crate::process;

const CACHE_CAPACITY: usize = 32;

pub(crate) enum WorkerCommand {
	Generate { id: u64, argv: Vec<String> },
	Shutdown,
}

pub(crate) struct PreviewResult {
	pub id: u64,
	pub content: PreviewContent,
}

struct PreviewCache {
	entries: HashMap<Vec<String>, (u64, PreviewContent)>,
	clock: u64,
	capacity: usize,
}

impl PreviewCache {
	fn new(capacity: usize) -> Self {
		Self {
			entries: HashMap::with_capacity(capacity),
			clock: 0,
			capacity,
		}
	}

	fn get(&mut self, argv: &[String]) -> Option<PreviewContent> {
		self.clock += 1;
		let clock = self.clock;
		self.entries.get_mut(argv).map(|(used, content)| {
			*used = clock;
			content.clone()
		})
	}

	fn insert(&mut self, argv: Vec<String>, content: PreviewContent) {
		if self.entries.len() >= self.capacity
			&& !self.entries.contains_key(&argv)
			&& let Some(stale) = self
				.entries
				.iter()
				.min_by_key(|(_, (used, _))| *used)
				.map(|(key, _)| key.clone())
		{
			self.entries.remove(&stale);
		}
		self.clock += 1;
		self.entries.insert(argv, (self.clock, content));
	}

	#[cfg(test)]
	fn len(&self) -> usize {
		self.entries.len()
	}
}

fn worker_loop(commands: Receiver<WorkerCommand>, results: Sender<PreviewResult>) {
	let mut cache = PreviewCache::new(CACHE_CAPACITY);

	while let Ok(command) = commands.recv() {
		let WorkerCommand::Generate { id, argv } = command else {
			break;
		};
		let Some((id, argv)) = drain_to_latest(&commands, id, argv) else {
			break;
		};

		let content = match cache.get(&argv) {
			Some(cached) => cached,
			None => {
				let content = generate(&argv);
				if !matches!(content, PreviewContent::Error(_)) {
					cache.insert(argv, content.clone());
				}
				content
			}
		};

		if results.send(PreviewResult { id, content }).is_err() {
			break;
		}
	}
	log::debug!("preview worker stopped");
}

/// Skip every queued request except the newest one.
///
/// Returns `None` when a shutdown was queued behind the request.
fn drain_to_latest(
	commands: &Receiver<WorkerCommand>,
	mut id: u64,
	mut argv: Vec<String>,
) -> Option<(u64, Vec<String>)> {
	loop {
		match commands.try_recv() {
			Ok(WorkerCommand::Generate {
				id: newer_id,
				argv: newer_argv,
			}) => {
				id = newer_id;
				argv = newer_argv;
			}
			Ok(WorkerCommand::Shutdown) | Err(TryRecvError::Disconnected) => return None,
			Err(TryRecvError::Empty) => return Some((id, argv)),
		}
	}
}

fn generate(argv: &[String]) -> PreviewContent {
	match process::capture(argv) {
		Ok(output) if output.trim().is_empty() => PreviewContent::Empty,
		Ok(output) => PreviewContent::Text(ansi::to_text(&output)),
		Err(err) => {
			log::warn!("preview command {argv:?} failed: {err}");
			PreviewContent::Error(err.to_string())
		}
	}
}

/// Owns the worker thread and remembers which request is current.
pub(crate) struct PreviewRuntime {
	tx: Sender<WorkerCommand>,
	rx: Receiver<PreviewResult>,
	next_id: u64,
	current_id: Option<u64>,
}

impl PreviewRuntime {
	pub fn new() -> Self {
		let (tx, commands) = mpsc::channel();
		let (results, rx) = mpsc::channel();
		let spawned = thread::Builder::new()
			.name("preview-worker".into())
			.spawn(move || worker_loop(commands, results));
		if let Err(err) = spawned {
			// Requests will sit unanswered; the pane keeps showing "Loading".
			log::error!("failed to start preview worker: {err}");
		}
		Self {
			tx,
			rx,
			next_id: 0,
			current_id: None,
		}
	}

	pub fn request(&mut self, argv: Vec<String>) -> u64 {
		self.next_id = self.next_id.wrapping_add(1);
		let id = self.next_id;
		self.current_id = Some(id);
		let _ = self.tx.send(WorkerCommand::Generate { id, argv });
		id
	}

	/// Forget the outstanding request so its answer is ignored.
	pub fn cancel(&mut self) {
		self.current_id = None;
	}

	pub fn try_recv(&self) -> Result<PreviewResult, TryRecvError> {
		self.rx.try_recv()
	}

	pub fn is_current(&self, id: u64) -> bool {
		self.current_id == Some(id)
	}

	pub fn shutdown(&self) {
		let _ = self.tx.send(WorkerCommand::Shutdown);
	}
}

impl Drop for PreviewRuntime {
	fn drop(&mut self) {
		self.shutdown();
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	fn argv(words: &[&str]) -> Vec<String> {
		words.iter().map(|word| word.to_string()).collect()
	}

	#[test]
	fn drain_keeps_the_newest_request() {
		let (tx, rx) = mpsc::channel();
		tx.send(WorkerCommand::Generate { id: 2, argv: argv(&["two"]) }).unwrap();
		tx.send(WorkerCommand::Generate { id: 3, argv: argv(&["three"]) }).unwrap();

		let latest = drain_to_latest(&rx, 1, argv(&["one"]));
		assert_eq!(latest, Some((3, argv(&["three"]))));
	}

	#[test]
	fn drain_stops_at_shutdown() {
		let (tx, rx) = mpsc::channel();
		tx.send(WorkerCommand::Shutdown).unwrap();
		assert_eq!(drain_to_latest(&rx, 1, argv(&["one"])), None);
	}

	#[test]
	fn cache_evicts_least_recently_used() {
		let mut cache = PreviewCache::new(2);
		cache.insert(argv(&["a"]), PreviewContent::Empty);
		cache.insert(argv(&["b"]), PreviewContent::Empty);
		assert!(cache.get(&argv(&["a"])).is_some());
		cache.insert(argv(&["c"]), PreviewContent::Empty);

		assert_eq!(cache.len(), 2);
		assert!(cache.get(&argv(&["a"])).is_some());
		assert!(cache.get(&argv(&["b"])).is_none());
	}

	#[test]
	fn only_the_current_request_counts() {
		let mut runtime = PreviewRuntime::new();
		let first = runtime.request(argv(&["true"]));
		let second = runtime.request(argv(&["true"]));
		assert!(!runtime.is_current(first));
		assert!(runtime.is_current(second));
		runtime.cancel();
		assert!(!runtime.is_current(second));
	}

	#[cfg(unix)]
	#[test]
	fn runs_the_preview_pipeline() {
		let mut runtime = PreviewRuntime::new();
		let id = runtime.request(argv(&["sh", "-c", "printf 'one\\ntwo\\n'"]));

		let result = (0..200)
			.find_map(|_| match runtime.try_recv() {
				Ok(result) => Some(result),
				Err(_) => {
					thread::sleep(Duration::from_millis(10));
					None
				}
			})
			.expect("preview finished");
		assert_eq!(result.id, id);
		let PreviewContent::Text(text) = result.content else {
			panic!("expected text preview");
		};
		assert_eq!(text.lines.len(), 2);
	}
}
