//! Terminal setup and the event loop driving an [`App`].

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cder_picker_api::{HostError, PickerControl};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use crate::app::App;
use crate::keymap;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Take over the terminal and pump events until the picker closes.
///
/// The terminal is restored by the app's close hook, so an action that closes
/// the list and then runs a handler already sees a normal screen.
pub(crate) fn run(app: &mut App) -> Result<(), HostError> {
	let mut terminal = ratatui::try_init()?;
	app.on_close(ratatui::restore);

	let (event_tx, event_rx) = mpsc::channel();
	let running = Arc::new(AtomicBool::new(true));
	let flag = Arc::clone(&running);
	let event_thread = thread::spawn(move || -> io::Result<()> {
		while flag.load(Ordering::Relaxed) {
			if event::poll(POLL_INTERVAL)? {
				let event = event::read()?;
				if event_tx.send(event).is_err() {
					break;
				}
			}
		}
		Ok(())
	});

	let result = drive(app, &mut terminal, &event_rx);
	app.close_list();

	running.store(false, Ordering::Relaxed);
	match event_thread.join() {
		Ok(joined) => joined?,
		Err(panic) => std::panic::resume_unwind(panic),
	}
	result
}

fn drive(app: &mut App, terminal: &mut DefaultTerminal, events: &Receiver<Event>) -> Result<(), HostError> {
	'event_loop: loop {
		loop {
			match events.try_recv() {
				Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
					let Some(press) = keymap::key_press(key) else {
						continue;
					};
					app.handle_key(press)?;
					if app.is_closed() {
						break 'event_loop;
					}
				}
				Ok(_) => {}
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => return Err(HostError::Disconnected),
			}
		}

		app.pump();
		terminal.draw(|frame| app.draw(frame))?;
		thread::sleep(FRAME_INTERVAL);
	}

	if app.was_cancelled() {
		log::debug!("picker cancelled");
	}
	Ok(())
}
