//! Building lists with position-scoped override rules.

#[path = "helpers/models.rs"]
mod models;

use models::{Genre, Payment, Track};
use rstest::rstest;
use specimen::prelude::*;

const THE_TITLE: &str = "test";

#[rstest]
fn test_every_second_element_carries_the_override() {
	let tracks = ListBuilder::<Track>::of_size(10)
		.every(2, |track| track.title = THE_TITLE.to_string())
		.build()
		.unwrap();

	assert_eq!(tracks.len(), 10);
	assert_eq!(
		tracks.iter().filter(|track| track.title == THE_TITLE).count(),
		5
	);
	// Exactly the even indices carry the override.
	for (index, track) in tracks.iter().enumerate() {
		assert_eq!(track.title == THE_TITLE, index % 2 == 0);
	}
}

#[rstest]
fn test_sequential_ids_are_distinct_across_the_list() {
	let tracks = ListBuilder::<Track>::of_size(25).build().unwrap();

	let ids: Vec<_> = tracks.iter().map(|track| track.id).collect();
	assert_eq!(ids, (1..=25).collect::<Vec<u64>>());
	assert_eq!(tracks[0].title, "title1");
	assert_eq!(tracks[24].title, "title25");
}

#[rstest]
fn test_genres_cycle_in_declaration_order() {
	let tracks = ListBuilder::<Track>::of_size(5).build().unwrap();

	let genres: Vec<_> = tracks.iter().map(|track| track.genre).collect();
	assert_eq!(
		genres,
		vec![Genre::Jazz, Genre::Swing, Genre::Bebop, Genre::Jazz, Genre::Swing]
	);
}

#[rstest]
fn test_skipped_fields_stay_default_across_the_list() {
	let tracks = ListBuilder::<Track>::of_size(4).build().unwrap();
	assert!(tracks.iter().all(|track| track.notes.is_empty()));
}

#[rstest]
fn test_rules_apply_in_insertion_order() {
	let tracks = ListBuilder::<Track>::of_size(6)
		.all(|track| track.title = "everyone".to_string())
		.section(1, 3, |track| track.title = "section".to_string())
		.at(1, |track| track.title = "pinpoint".to_string())
		.build()
		.unwrap();

	let titles: Vec<_> = tracks.iter().map(|track| track.title.as_str()).collect();
	assert_eq!(
		titles,
		vec!["everyone", "pinpoint", "section", "everyone", "everyone", "everyone"]
	);
}

#[rstest]
fn test_first_and_last() {
	let tracks = ListBuilder::<Track>::of_size(5)
		.first(2, |track| track.length_secs = 100)
		.last(1, |track| track.length_secs = 200)
		.build()
		.unwrap();

	let lengths: Vec<_> = tracks.iter().map(|track| track.length_secs).collect();
	assert_eq!(lengths, vec![100, 100, 3, 4, 200]);
}

#[rstest]
fn test_rule_that_does_not_fit_fails_before_building() {
	let mut builder = ListBuilder::<Track>::of_size(5)
		.first(7, |track| track.length_secs = 100);

	let error = builder.build().unwrap_err();
	assert!(matches!(error, BuildError::PositionOutOfRange { size: 5, .. }));
	assert!(error.to_string().contains("the first 7"));
}

#[rstest]
fn test_second_build_is_rejected() {
	let mut builder = ListBuilder::<Track>::of_size(3);
	builder.build().unwrap();
	assert!(matches!(
		builder.build(),
		Err(BuildError::AlreadyBuilt { .. })
	));
}

#[rstest]
fn test_two_builders_produce_identical_lists() {
	let build = || {
		ListBuilder::<Track>::of_size(12)
			.every_from(1, 3, |track| track.title = "offset".to_string())
			.build()
			.unwrap()
	};
	assert_eq!(build(), build());
}

#[rstest]
fn test_list_elements_share_constructor_arguments() {
	let payments = ListBuilder::<Payment>::of_size(3)
		.with_constructor_args((5i32, 15.0f32))
		.at(1, |payment| payment.count = 0)
		.build()
		.unwrap();

	assert_eq!(payments[0].count, 5);
	assert_eq!(payments[1].count, 0);
	assert_eq!(payments[2].count, 5);
	// Unassigned fields are populated per element from the shared session.
	let memos: Vec<_> = payments.iter().map(|payment| payment.memo.as_str()).collect();
	assert_eq!(memos, vec!["memo1", "memo2", "memo3"]);
}

#[cfg(feature = "random")]
#[rstest]
fn test_random_rule_marks_exactly_the_requested_count() {
	let tracks = ListBuilder::<Track>::of_size(10)
		.random(4, |track| track.notes = "picked".to_string())
		.build()
		.unwrap();

	assert_eq!(
		tracks.iter().filter(|track| track.notes == "picked").count(),
		4
	);
}

#[cfg(feature = "random")]
#[rstest]
fn test_seeded_random_rule_is_reproducible() {
	let build = || {
		let tracks = ListBuilder::<Track>::of_size(10)
			.seeded(11)
			.random(3, |track| track.notes = "picked".to_string())
			.build()
			.unwrap();
		tracks
			.iter()
			.enumerate()
			.filter(|(_, track)| track.notes == "picked")
			.map(|(index, _)| index)
			.collect::<Vec<_>>()
	};
	assert_eq!(build(), build());
}
