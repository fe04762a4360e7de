//! Timeline model: maps a slider position to the set of visible nodes.
//!
//! The server supplies the order in which nodes appeared. Position `i` shows
//! every node whose id occurs in the first `i + 1` entries.

use std::collections::HashSet;

/// Which nodes the graph should draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
	/// No timeline constraint.
	All,
	/// Only these node ids.
	Only(HashSet<String>),
}

impl Visibility {
	/// Shows exactly `ids`.
	pub fn only<I, S>(ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Visibility::Only(ids.into_iter().map(Into::into).collect())
	}

	/// Whether node `id` is drawn.
	pub fn shows(&self, id: &str) -> bool {
		match self {
			Visibility::All => true,
			Visibility::Only(ids) => ids.contains(id),
		}
	}
}

/// Attributes for the range input and its label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliderState {
	/// Range `min` attribute.
	pub min: usize,
	/// Range `max` attribute.
	pub max: usize,
	/// Current position.
	pub value: usize,
	/// Text of `#timelineLabel`.
	pub label: String,
}

/// Ordered sequence of node ids, one per slider step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
	entries: Vec<String>,
}

impl Timeline {
	/// Wraps the node ids in order of appearance.
	pub fn new(entries: Vec<String>) -> Self {
		Self { entries }
	}

	/// Number of steps.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when the server sent no timeline.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Slider state when the graph first becomes ready: positioned on the last
	/// entry, or collapsed to zero when there is no timeline.
	pub fn initial_slider(&self) -> SliderState {
		let last = self.len().saturating_sub(1);
		SliderState {
			min: 0,
			max: last,
			value: last,
			label: self.len().to_string(),
		}
	}

	/// Visibility at initialization. Without a timeline every node shows.
	pub fn initial_visibility(&self) -> Visibility {
		if self.is_empty() {
			Visibility::All
		} else {
			self.visible_at(self.len() - 1)
		}
	}

	/// Label for a slider position: how many steps are shown.
	pub fn label_at(&self, index: usize) -> String {
		if self.is_empty() {
			"0".to_string()
		} else {
			(index + 1).to_string()
		}
	}

	/// Node ids in the prefix `[0..=index]`. Positions past the end add nothing.
	pub fn visible_at(&self, index: usize) -> Visibility {
		let end = index.saturating_add(1).min(self.len());
		Visibility::only(self.entries[..end].iter().cloned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn timeline() -> Timeline {
		Timeline::new(vec!["s1".into(), "a1".into(), "e1".into(), "a1".into()])
	}

	#[test]
	fn initializes_at_last_entry() {
		let t = timeline();
		assert_eq!(
			t.initial_slider(),
			SliderState {
				min: 0,
				max: 3,
				value: 3,
				label: "4".into()
			}
		);
		assert_eq!(t.initial_visibility(), Visibility::only(["s1", "a1", "e1"]));
	}

	#[test]
	fn empty_timeline_shows_everything() {
		let t = Timeline::default();
		assert_eq!(
			t.initial_slider(),
			SliderState {
				min: 0,
				max: 0,
				value: 0,
				label: "0".into()
			}
		);
		assert_eq!(t.initial_visibility(), Visibility::All);
		assert_eq!(t.label_at(0), "0");
		assert!(Visibility::All.shows("anything"));
	}

	#[test]
	fn visible_set_is_prefix_of_timeline() {
		let t = timeline();
		assert_eq!(t.visible_at(0), Visibility::only(["s1"]));
		assert_eq!(t.visible_at(1), Visibility::only(["s1", "a1"]));
		assert_eq!(t.label_at(1), "2");

		let v = t.visible_at(2);
		assert!(v.shows("e1"));
		assert!(!v.shows("h1"));
	}

	#[test]
	fn index_past_end_is_clamped() {
		let t = timeline();
		assert_eq!(t.visible_at(99), t.visible_at(3));
		assert_eq!(t.visible_at(usize::MAX), t.visible_at(3));
	}
}
