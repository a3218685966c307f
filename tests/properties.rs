//! Bulk properties of list building.

#[path = "helpers/models.rs"]
mod models;

use models::Track;
use proptest::prelude::*;
use specimen::prelude::*;

proptest! {
	#[test]
	fn every_rule_marks_exactly_the_stepped_indices(
		size in 1usize..60,
		step in 1usize..8,
	) {
		let tracks = ListBuilder::<Track>::of_size(size)
			.every(step, |track| track.notes = "marked".to_string())
			.build()
			.unwrap();

		prop_assert_eq!(tracks.len(), size);
		for (index, track) in tracks.iter().enumerate() {
			prop_assert_eq!(track.notes == "marked", index % step == 0);
		}
	}

	#[test]
	fn first_rule_marks_exactly_the_head(
		size in 1usize..60,
		count in 0usize..8,
	) {
		prop_assume!(count <= size);

		let tracks = ListBuilder::<Track>::of_size(size)
			.first(count, |track| track.notes = "head".to_string())
			.build()
			.unwrap();

		for (index, track) in tracks.iter().enumerate() {
			prop_assert_eq!(track.notes == "head", index < count);
		}
	}

	#[test]
	fn last_rule_marks_exactly_the_tail(
		size in 1usize..60,
		count in 0usize..8,
	) {
		prop_assume!(count <= size);

		let tracks = ListBuilder::<Track>::of_size(size)
			.last(count, |track| track.notes = "tail".to_string())
			.build()
			.unwrap();

		for (index, track) in tracks.iter().enumerate() {
			prop_assert_eq!(track.notes == "tail", index >= size - count);
		}
	}

	#[test]
	fn sequential_ids_are_pairwise_distinct(size in 1usize..80) {
		let tracks = ListBuilder::<Track>::of_size(size).build().unwrap();

		let mut ids: Vec<_> = tracks.iter().map(|track| track.id).collect();
		ids.sort_unstable();
		ids.dedup();
		prop_assert_eq!(ids.len(), size);
	}

	#[test]
	fn populated_values_are_non_default(size in 1usize..40) {
		let tracks = ListBuilder::<Track>::of_size(size).build().unwrap();

		for track in &tracks {
			prop_assert_ne!(track.id, 0);
			prop_assert!(!track.title.is_empty());
			prop_assert_ne!(track.length_secs, 0);
			prop_assert!(track.rating.is_some());
		}
	}

	#[test]
	fn identically_configured_builds_are_equal(size in 1usize..30) {
		let build = || ListBuilder::<Track>::of_size(size).build().unwrap();
		prop_assert_eq!(build(), build());
	}
}
