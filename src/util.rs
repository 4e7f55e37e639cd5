use rand::Rng;

/// Uniform integer in `[min, max]`, both ends included
pub fn random_int_inclusive<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.gen_range(min..=max)
}

/// Seconds as a `hh:mm:ss` clock, like a UTC time of day
/// - fractions of a second are dropped
/// - hours wrap every 24h
pub fn to_time_string(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let hours = (total / 3600) % 24;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
