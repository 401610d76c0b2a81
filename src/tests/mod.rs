mod differential;
mod search;

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Candidate source yielding one-character strings with distinct fingerprints.
///
/// A single unit `c` hashes to `1089 · 5381 + 34 · c (mod 2¹⁶)`, which is
/// injective for `c < 2¹⁵`; starting at U+0100 stays clear of surrogates for
/// the first 0xD700 draws.
pub fn distinct_candidates() -> impl FnMut(usize) -> String {
    let mut next = 0x100_u32;
    move |_| {
        let c = char::from_u32(next).expect("below the surrogate range");
        next += 1;
        c.to_string()
    }
}

/// Candidate source replaying a fixed script.
pub fn scripted_candidates<const N: usize>(script: [&'static str; N]) -> impl FnMut(usize) -> String {
    let mut inputs = script.into_iter();
    move |_| inputs.next().expect("script exhausted").to_owned()
}
