//! Task progress polling and the loading overlay it reports into.
//!
//! One fixed-interval timer per page. Each tick fetches the task's progress
//! report; failures are logged and the next tick tries again. A terminal
//! status, an explicit [`ProgressController::stop`] or hiding the overlay ends
//! the poll.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info};

use crate::config::Settings;
use crate::error::PollError;
use crate::progress::{PollOutcome, PollSession, ProgressLog, ProgressReport};

/// Fetches one progress report.
pub async fn fetch_report(url: &str) -> Result<ProgressReport, PollError> {
	let response = Request::get(url).send().await.map_err(PollError::Request)?;
	if !response.ok() {
		return Err(PollError::Status {
			status: response.status(),
			status_text: response.status_text(),
		});
	}
	response
		.json::<ProgressReport>()
		.await
		.map_err(PollError::Decode)
}

/// Local wall-clock time, e.g. "14:03:27".
fn local_time(locale: &str) -> String {
	js_sys::Date::new_0().to_locale_time_string(locale).into()
}

struct PollerInner {
	interval: RefCell<Option<Interval>>,
	session: RefCell<PollSession>,
	settings: Settings,
}

/// Owns the overlay visibility, the progress log and the poll timer.
///
/// Cheap to clone; clones share the same timer.
#[derive(Clone)]
pub struct ProgressController {
	/// Lines shown in the overlay.
	pub log: RwSignal<ProgressLog>,
	/// Whether the loading overlay is shown.
	pub overlay_visible: RwSignal<bool>,
	/// Reactive mirror of [`ProgressController::is_polling`].
	pub polling: RwSignal<bool>,
	inner: Rc<PollerInner>,
}

impl ProgressController {
	/// Creates an idle controller; `overlay_visible` is the overlay's initial state.
	pub fn new(settings: &Settings, overlay_visible: bool) -> Self {
		Self {
			log: RwSignal::new(ProgressLog::default()),
			overlay_visible: RwSignal::new(overlay_visible),
			polling: RwSignal::new(false),
			inner: Rc::new(PollerInner {
				interval: RefCell::new(None),
				session: RefCell::new(PollSession::default()),
				settings: settings.clone(),
			}),
		}
	}

	fn settings(&self) -> &Settings {
		&self.inner.settings
	}

	/// Appends a local message to the log, stamped with the current time.
	pub fn add_message(&self, text: &str, kind: &str) {
		let timestamp = local_time(&self.settings().locale);
		self.log.update(|log| log.push(timestamp, text, kind));
	}

	/// Empties the log and forgets which server messages were shown.
	pub fn clear_log(&self) {
		self.log.update(ProgressLog::clear);
	}

	/// Shows the overlay with an empty log.
	pub fn show_overlay(&self) {
		self.overlay_visible.set(true);
		self.clear_log();
	}

	/// Hides the overlay. Polling stops with it.
	pub fn hide_overlay(&self) {
		self.overlay_visible.set(false);
		self.stop();
	}

	/// True between `start` and the matching stop, terminal status or hide.
	pub fn is_polling(&self) -> bool {
		self.inner.session.borrow().is_active()
	}

	/// Starts polling `task_id`, replacing any poll already running. The first
	/// request goes out immediately.
	pub fn start(&self, task_id: &str) {
		self.stop();
		self.clear_log();

		let generation = self.inner.session.borrow_mut().begin();
		let url = self.settings().progress_url(task_id);

		self.poll(url.clone(), generation);
		let this = self.clone();
		let interval = Interval::new(self.settings().poll_interval_ms, move || {
			this.poll(url.clone(), generation);
		});
		*self.inner.interval.borrow_mut() = Some(interval);
		self.polling.set(true);
		info!("contingency-network: started polling for task {}", task_id);
	}

	/// Cancels the poll timer. Responses still in flight are ignored.
	pub fn stop(&self) {
		let ended = self.inner.session.borrow_mut().end();
		let had_timer = self
			.inner
			.interval
			.borrow_mut()
			.take()
			.map(Interval::cancel)
			.is_some();
		if ended || had_timer {
			self.polling.set(false);
			info!("contingency-network: stopped polling");
		}
	}

	fn poll(&self, url: String, generation: u64) {
		let this = self.clone();
		spawn_local(async move {
			match fetch_report(&url).await {
				Ok(report) => this.apply(&report, generation),
				Err(e) => error!("contingency-network: {}", e),
			}
		});
	}

	fn apply(&self, report: &ProgressReport, generation: u64) {
		let timestamp = local_time(&self.settings().locale);
		let mut outcome = PollOutcome::Stale;
		self.log.update(|log| {
			outcome = self
				.inner
				.session
				.borrow_mut()
				.accept(generation, report, log, &timestamp);
		});

		match outcome {
			PollOutcome::Stale => debug!("contingency-network: dropped stale progress response"),
			PollOutcome::Continue { added } => {
				debug!("contingency-network: {} new progress messages", added)
			}
			PollOutcome::Finished { status, .. } => {
				info!("contingency-network: task reached status {:?}", status);
				self.stop();
			}
		}
	}
}
