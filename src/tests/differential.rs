use crate::differential::{Mutation, analyze};
use crate::hash::{MODULUS, hash};

#[test]
fn mutations_of_hello() {
    let report = analyze("hello");
    assert_eq!(report.base_hash, hash("hello"));

    let inputs: Vec<(Mutation, &str)> = report
        .observations
        .iter()
        .map(|o| (o.mutation, o.input.as_str()))
        .collect();
    assert_eq!(
        inputs,
        [
            (Mutation::AppendX, "helloX"),
            (Mutation::ChangeLast, "hella"),
            (Mutation::Uppercase, "HELLO"),
            (Mutation::Reversed, "olleh"),
        ]
    );
}

#[test]
fn observations_measure_distance_from_base() {
    let report = analyze("hello");
    for o in &report.observations {
        assert_eq!(o.hash, hash(&o.input));
        let expected = (i32::from(o.hash.get()) - i32::from(report.base_hash.get())).unsigned_abs();
        assert_eq!(u32::from(o.difference), expected);
        assert!((o.fraction - f64::from(o.difference) / f64::from(MODULUS)).abs() < f64::EPSILON);
        assert!((o.percent() - o.fraction * 100.0).abs() < 1e-9);
    }
}

/// `helloX` = 0xDA5D, `hello` = 0x3F6D.
#[test]
fn append_difference() {
    let report = analyze("hello");
    let append = &report.observations[0];
    assert_eq!(append.difference, 0xDA5D - 0x3F6D);
}

#[test]
fn change_last_flips_a_to_b() {
    assert_eq!(Mutation::ChangeLast.apply("banana").as_deref(), Some("bananb"));
    assert_eq!(Mutation::ChangeLast.apply("z").as_deref(), Some("a"));
    assert_eq!(Mutation::ChangeLast.apply("caf\u{e9}").as_deref(), Some("cafa"));
}

/// Edits work on whole characters: a surrogate pair is never split.
#[test]
fn astral_characters_stay_whole() {
    assert_eq!(Mutation::ChangeLast.apply("a\u{1F600}").as_deref(), Some("aa"));
    assert_eq!(Mutation::Reversed.apply("a\u{1F600}").as_deref(), Some("\u{1F600}a"));

    let report = analyze("a\u{1F600}");
    for o in &report.observations {
        assert_eq!(o.hash, hash(&o.input));
    }
    let reversed = report
        .observations
        .iter()
        .find(|o| o.mutation == Mutation::Reversed)
        .unwrap();
    assert_eq!(reversed.input, "\u{1F600}a");
}

#[test]
fn empty_input_skips_change_last() {
    let report = analyze("");
    let mutations: Vec<Mutation> = report.observations.iter().map(|o| o.mutation).collect();
    assert_eq!(
        mutations,
        [Mutation::AppendX, Mutation::Uppercase, Mutation::Reversed]
    );
    // Uppercasing or reversing "" leaves it unchanged.
    assert_eq!(report.observations[1].difference, 0);
    assert_eq!(report.observations[2].difference, 0);
}

#[test]
fn palindrome_reverses_to_itself() {
    let report = analyze("level");
    let reversed = report
        .observations
        .iter()
        .find(|o| o.mutation == Mutation::Reversed)
        .unwrap();
    assert_eq!(reversed.input, "level");
    assert_eq!(reversed.difference, 0);
    assert_eq!(reversed.fraction, 0.0);
}

#[test]
fn labels() {
    assert_eq!(Mutation::AppendX.to_string(), "add 'X'");
    assert_eq!(Mutation::Reversed.to_string(), "reversed");
}
