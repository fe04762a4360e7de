//! Progress log model and the progress endpoint's response format.
//!
//! The endpoint returns the full message history on every poll; the log keeps
//! a cursor so each message is rendered once.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Task status reported by the progress endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
	/// `complete`
	Complete,
	/// `finished`
	Finished,
	/// `error`
	Error,
	/// Any other value, including a missing status.
	Running(String),
}

impl TaskStatus {
	/// Maps the raw `status` field.
	pub fn parse(raw: Option<&str>) -> Self {
		match raw {
			Some("complete") => TaskStatus::Complete,
			Some("finished") => TaskStatus::Finished,
			Some("error") => TaskStatus::Error,
			other => TaskStatus::Running(other.unwrap_or_default().to_string()),
		}
	}

	/// Polling stops once a terminal status is seen.
	pub fn is_terminal(&self) -> bool {
		!matches!(self, TaskStatus::Running(_))
	}
}

/// Body of `GET {progress_endpoint}/{task_id}`.
///
/// Messages stay as raw JSON: entries of unexpected shape are skipped, not a
/// decode failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProgressReport {
	/// Full message history. `null` reads as empty.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub messages: Vec<Value>,
	/// Raw status string; see [`ProgressReport::status`].
	#[serde(default)]
	pub status: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProgressReport {
	/// Parsed status.
	pub fn status(&self) -> TaskStatus {
		TaskStatus::parse(self.status.as_deref())
	}
}

/// Severity of a log line. Rendered as the `log-message-{kind}` CSS class.
pub const DEFAULT_KIND: &str = "info";

/// Interprets one entry of `messages`: either a bare string or an object with
/// a non-empty `text` and optional `type`.
pub fn parse_message(entry: &Value) -> Option<(String, String)> {
	match entry {
		Value::String(text) => Some((text.clone(), DEFAULT_KIND.to_string())),
		Value::Object(obj) => {
			let text = obj.get("text")?.as_str().filter(|t| !t.is_empty())?;
			let kind = obj
				.get("type")
				.and_then(Value::as_str)
				.filter(|k| !k.is_empty())
				.unwrap_or(DEFAULT_KIND);
			Some((text.to_string(), kind.to_string()))
		}
		_ => None,
	}
}

/// A rendered log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
	/// Monotonic key for keyed list rendering.
	pub key: u64,
	/// Local time the line was added.
	pub timestamp: String,
	/// Message text.
	pub text: String,
	/// Severity, e.g. `info` or `error`.
	pub kind: String,
}

impl LogEntry {
	/// Text as shown in the list: `[timestamp] message`.
	pub fn display(&self) -> String {
		format!("[{}] {}", self.timestamp, self.text)
	}

	/// CSS classes of the list item.
	pub fn class(&self) -> String {
		format!("log-message log-message-{}", self.kind)
	}
}

/// The overlay's message list plus the server-message cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressLog {
	entries: Vec<LogEntry>,
	/// Index of the last server message rendered; `None` before the first.
	last_received: Option<usize>,
	next_key: u64,
}

impl ProgressLog {
	/// Lines in display order.
	pub fn entries(&self) -> &[LogEntry] {
		&self.entries
	}

	/// Index of the last server message already shown.
	pub fn last_received(&self) -> Option<usize> {
		self.last_received
	}

	/// Appends one line.
	pub fn push(&mut self, timestamp: impl Into<String>, text: impl Into<String>, kind: &str) {
		self.entries.push(LogEntry {
			key: self.next_key,
			timestamp: timestamp.into(),
			text: text.into(),
			kind: kind.to_string(),
		});
		self.next_key += 1;
	}

	/// Empties the list and resets the cursor.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.last_received = None;
	}

	/// Appends the messages past the cursor and advances it to the end.
	/// Returns the number of lines added.
	pub fn ingest(&mut self, report: &ProgressReport, timestamp: &str) -> usize {
		let start = self.last_received.map_or(0, |i| i + 1);
		if report.messages.len() <= start {
			return 0;
		}
		let before = self.entries.len();
		for entry in &report.messages[start..] {
			if let Some((text, kind)) = parse_message(entry) {
				self.push(timestamp, text, &kind);
			}
		}
		self.last_received = Some(report.messages.len() - 1);
		self.entries.len() - before
	}
}

/// What became of one progress response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollOutcome {
	/// Belongs to a poll that was stopped or replaced; nothing was rendered.
	Stale,
	/// Rendered `added` new lines; keep polling.
	Continue { added: usize },
	/// Rendered `added` new lines and reached a terminal status; the session is over.
	Finished { added: usize, status: TaskStatus },
}

/// Generation bookkeeping for the poll loop.
///
/// Every `begin` and `end` moves to a new generation, so a response tagged
/// with an older one is recognised as stale however late it arrives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PollSession {
	generation: u64,
	active: bool,
}

impl PollSession {
	/// Starts a new session and returns the generation its responses carry.
	pub fn begin(&mut self) -> u64 {
		self.generation += 1;
		self.active = true;
		self.generation
	}

	/// Ends the current session. Returns false if none was running.
	pub fn end(&mut self) -> bool {
		if !self.active {
			return false;
		}
		self.active = false;
		self.generation += 1;
		true
	}

	/// Whether responses are currently accepted.
	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Feeds a response from `generation` into `log`, ending the session on a
	/// terminal status.
	pub fn accept(
		&mut self,
		generation: u64,
		report: &ProgressReport,
		log: &mut ProgressLog,
		timestamp: &str,
	) -> PollOutcome {
		if !self.active || generation != self.generation {
			return PollOutcome::Stale;
		}
		let added = log.ingest(report, timestamp);
		let status = report.status();
		if status.is_terminal() {
			self.end();
			PollOutcome::Finished { added, status }
		} else {
			PollOutcome::Continue { added }
		}
	}
}

/// Label for the analysis textarea counter. Length is counted in UTF-16 code
/// units, the unit browsers use for `maxlength`.
pub fn char_count_label(text: &str, max_chars: usize) -> String {
	format!("{}/{} caracteres", text.encode_utf16().count(), max_chars)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn report(value: Value) -> ProgressReport {
		serde_json::from_value(value).unwrap()
	}

	#[test]
	fn terminal_statuses() {
		assert!(TaskStatus::parse(Some("complete")).is_terminal());
		assert!(TaskStatus::parse(Some("finished")).is_terminal());
		assert!(TaskStatus::parse(Some("error")).is_terminal());
		assert!(!TaskStatus::parse(Some("running")).is_terminal());
		assert_eq!(TaskStatus::parse(None), TaskStatus::Running(String::new()));
	}

	#[test]
	fn message_shapes() {
		assert_eq!(
			parse_message(&json!("Extraindo sujeitos")),
			Some(("Extraindo sujeitos".into(), "info".into()))
		);
		assert_eq!(
			parse_message(&json!({"text": "Falhou", "type": "error"})),
			Some(("Falhou".into(), "error".into()))
		);
		assert_eq!(
			parse_message(&json!({"text": "Sem tipo"})),
			Some(("Sem tipo".into(), "info".into()))
		);
		assert_eq!(parse_message(&json!({"text": ""})), None);
		assert_eq!(parse_message(&json!({"type": "error"})), None);
		assert_eq!(parse_message(&json!(42)), None);
		assert_eq!(parse_message(&Value::Null), None);
	}

	#[test]
	fn ingest_renders_only_new_messages() {
		let mut log = ProgressLog::default();
		let first = report(json!({"messages": ["a", {"text": "b", "type": "warning"}], "status": "running"}));
		assert_eq!(log.ingest(&first, "10:00:00"), 2);
		assert_eq!(log.last_received(), Some(1));

		// Same history again: nothing new.
		assert_eq!(log.ingest(&first, "10:00:02"), 0);

		let second = report(json!({"messages": ["a", {"text": "b"}, 7, "c"], "status": "complete"}));
		assert_eq!(log.ingest(&second, "10:00:04"), 1);
		assert_eq!(log.last_received(), Some(3));
		assert!(second.status().is_terminal());

		let texts: Vec<String> = log.entries().iter().map(LogEntry::display).collect();
		assert_eq!(texts, ["[10:00:00] a", "[10:00:00] b", "[10:00:04] c"]);
		assert_eq!(log.entries()[1].class(), "log-message log-message-warning");
	}

	#[test]
	fn missing_fields_are_tolerated() {
		let mut log = ProgressLog::default();
		let empty = report(json!({}));
		assert_eq!(log.ingest(&empty, "t"), 0);
		assert_eq!(log.last_received(), None);
		assert!(!empty.status().is_terminal());
	}

	#[test]
	fn null_messages_still_carry_the_status() {
		let parsed: ProgressReport =
			serde_json::from_str(r#"{"messages": null, "status": "complete"}"#).unwrap();
		assert!(parsed.messages.is_empty());
		assert_eq!(parsed.status(), TaskStatus::Complete);

		let mut session = PollSession::default();
		let generation = session.begin();
		let mut log = ProgressLog::default();
		assert_eq!(
			session.accept(generation, &parsed, &mut log, "t"),
			PollOutcome::Finished { added: 0, status: TaskStatus::Complete }
		);
	}

	#[test]
	fn terminal_status_ends_the_session() {
		let mut session = PollSession::default();
		let mut log = ProgressLog::default();
		let generation = session.begin();

		let running = report(json!({"messages": ["a"], "status": "running"}));
		assert_eq!(
			session.accept(generation, &running, &mut log, "t"),
			PollOutcome::Continue { added: 1 }
		);
		assert!(session.is_active());

		let failed = report(json!({"messages": ["a", {"text": "boom", "type": "error"}], "status": "error"}));
		assert_eq!(
			session.accept(generation, &failed, &mut log, "t"),
			PollOutcome::Finished { added: 1, status: TaskStatus::Error }
		);
		assert!(!session.is_active());

		// A tick already in flight when the task finished changes nothing.
		let late = report(json!({"messages": ["a", "boom", "late"], "status": "error"}));
		assert_eq!(session.accept(generation, &late, &mut log, "t"), PollOutcome::Stale);
		assert_eq!(log.entries().len(), 2);
	}

	#[test]
	fn responses_after_stop_or_restart_are_stale() {
		let mut session = PollSession::default();
		let mut log = ProgressLog::default();
		let update = report(json!({"messages": ["x"], "status": "running"}));

		let first = session.begin();
		assert!(session.end());
		assert!(!session.end());
		assert_eq!(session.accept(first, &update, &mut log, "t"), PollOutcome::Stale);

		let second = session.begin();
		let third = session.begin();
		assert_ne!(second, third);
		assert_eq!(session.accept(second, &update, &mut log, "t"), PollOutcome::Stale);
		assert!(log.entries().is_empty());

		assert_eq!(
			session.accept(third, &update, &mut log, "t"),
			PollOutcome::Continue { added: 1 }
		);
	}

	#[test]
	fn clear_resets_cursor_but_keeps_keys_unique() {
		let mut log = ProgressLog::default();
		log.push("t", "local", "info");
		log.ingest(&report(json!({"messages": ["x"]})), "t");
		let last_key = log.entries().last().unwrap().key;

		log.clear();
		assert!(log.entries().is_empty());
		assert_eq!(log.last_received(), None);

		log.ingest(&report(json!({"messages": ["x"]})), "t");
		assert_eq!(log.entries().len(), 1);
		assert!(log.entries()[0].key > last_key);
	}

	#[test]
	fn counter_uses_utf16_length() {
		assert_eq!(char_count_label("", 5000), "0/5000 caracteres");
		assert_eq!(char_count_label("ação", 5000), "4/5000 caracteres");
		assert_eq!(char_count_label("🐀", 10), "2/10 caracteres");
	}
}
