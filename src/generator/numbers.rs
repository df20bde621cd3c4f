use rand::Rng;

/// Chance that a sampled word is swapped for a number.
pub const NUMBER_PROBABILITY: f64 = 0.10;
pub const MAX_NUMBER_LEN: usize = 4;

pub fn should_insert_number<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(NUMBER_PROBABILITY)
}

/// Digit string of length 1..=`max_len`. The first digit is never zero.
pub fn random_number<R: Rng + ?Sized>(rng: &mut R, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let len = rng.gen_range(1..=max_len);
    (0..len)
        .map(|i| {
            let digit = if i == 0 {
                rng.gen_range(1..=9)
            } else {
                rng.gen_range(0..=9)
            };
            char::from(b'0' + digit)
        })
        .collect()
}
