//! Property-based tests for script compilation and expansion
//!
//! Scripts are generated as a sequence of literal runs and groups; the
//! expected language is the left-to-right cross product of the groups.

use permy_core::CompiledGrammar;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Clone, Debug)]
enum Piece {
	Literal(String),
	Group(Vec<String>),
}

fn piece_strategy() -> impl Strategy<Value = Piece> {
	prop_oneof![
		"[a-z ]{1,3}".prop_map(Piece::Literal),
		prop::collection::vec("[a-z]{0,2}", 1..4).prop_map(Piece::Group),
	]
}

/// Generate scripts with at most a few groups so enumeration stays small
fn pieces_strategy() -> impl Strategy<Value = Vec<Piece>> {
	prop::collection::vec(piece_strategy(), 0..6)
}

fn render(pieces: &[Piece]) -> String {
	pieces
		.iter()
		.map(|piece| match piece {
			Piece::Literal(text) => text.clone(),
			Piece::Group(alternatives) => format!("({})", alternatives.join("|")),
		})
		.collect()
}

fn expected(pieces: &[Piece]) -> Vec<String> {
	let mut out = vec![String::new()];
	for piece in pieces {
		match piece {
			Piece::Literal(text) => out.iter_mut().for_each(|word| word.push_str(text)),
			Piece::Group(alternatives) => {
				out = out
					.iter()
					.flat_map(|word| alternatives.iter().map(move |alt| format!("{word}{alt}")))
					.collect();
			}
		}
	}
	out
}

proptest! {
	#[test]
	fn enumeration_is_the_ordered_cross_product(pieces in pieces_strategy()) {
		let grammar = CompiledGrammar::compile(render(&pieces).as_str()).unwrap();
		prop_assert_eq!(grammar.enumerate().unwrap(), expected(&pieces));
	}

	#[test]
	fn samples_belong_to_the_enumeration(pieces in pieces_strategy(), seed in any::<u64>()) {
		let grammar = CompiledGrammar::compile(render(&pieces).as_str()).unwrap();
		let every = grammar.enumerate().unwrap();
		let mut rng = StdRng::seed_from_u64(seed);
		for _ in 0..100 {
			let sample = grammar.sample_with(&mut rng).unwrap();
			prop_assert!(every.contains(&sample), "sample {:?} not in {:?}", sample, every);
		}
	}

	#[test]
	fn json_form_expands_identically(pieces in pieces_strategy()) {
		let grammar = CompiledGrammar::compile(render(&pieces).as_str()).unwrap();
		let prebuilt = CompiledGrammar::compile(grammar.to_json()).unwrap();
		prop_assert_eq!(prebuilt.enumerate().unwrap(), grammar.enumerate().unwrap());
	}
}
