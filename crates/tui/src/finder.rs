//! Drains a [`Finder`] on a background thread and hands entries over in
//! batches.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use cder_picker_api::{DirEntry, Finder};

const BATCH_SIZE: usize = 256;
const FLUSH_INTERVAL: Duration = Duration::from_millis(25);

pub(crate) enum FinderEvent {
    Entries(Vec<DirEntry>),
    /// A line could not be read; the stream keeps going.
    LineError(String),
    Done,
}

pub(crate) fn spawn(finder: Finder) -> Receiver<FinderEvent> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("finder".into())
        .spawn(move || drain(finder, tx));
    if let Err(err) = spawned {
        log::error!("failed to start finder thread: {err}");
    }
    rx
}

fn drain(finder: Finder, tx: Sender<FinderEvent>) {
    let mut batch = Vec::with_capacity(BATCH_SIZE);
    let mut last_flush = Instant::now();

    for entry in finder.entries() {
        match entry {
            Ok(entry) => batch.push(entry),
            Err(err) => {
                log::warn!("skipping unreadable listing line: {err}");
                if tx.send(FinderEvent::LineError(err.to_string())).is_err() {
                    return;
                }
            }
        }

        if batch.len() >= BATCH_SIZE || last_flush.elapsed() >= FLUSH_INTERVAL {
            if !batch.is_empty() && tx.send(FinderEvent::Entries(std::mem::take(&mut batch))).is_err() {
                return;
            }
            last_flush = Instant::now();
        }
    }

    if !batch.is_empty() && tx.send(FinderEvent::Entries(batch)).is_err() {
        return;
    }
    let _ = tx.send(FinderEvent::Done);
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use cder_picker_api::EntryMaker;

    use super::*;

    #[test]
    fn delivers_every_entry_then_done() {
        let lines: Vec<io::Result<String>> = (0..1000).map(|i| Ok(format!("/d/{i}"))).collect();
        let maker: Arc<EntryMaker> = Arc::new(|line: &str| Some(DirEntry::new(line)));
        let rx = spawn(Finder::new(Box::new(lines.into_iter()), maker));

        let mut received = Vec::new();
        loop {
            match rx.recv().expect("finder alive") {
                FinderEvent::Entries(batch) => {
                    assert!(batch.len() <= BATCH_SIZE);
                    received.extend(batch);
                }
                FinderEvent::LineError(err) => panic!("unexpected error {err}"),
                FinderEvent::Done => break,
            }
        }

        assert_eq!(received.len(), 1000);
        assert_eq!(received[0].value, "/d/0");
        assert_eq!(received[999].value, "/d/999");
    }
}
