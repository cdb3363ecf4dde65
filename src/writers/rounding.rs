/// Round to the nearest integer, with ties going toward positive infinity.
///
/// `2.5 -> 3`, `-2.5 -> -2`. A negative result that rounds to zero is
/// returned as `+0.0` so it never renders as `-0.0`.
pub fn round_half_up(x: f64) -> f64 {
    let t = x.trunc();

    let rounded = if x < 0.0 && t - x == 0.5 {
        t
    } else if (x - t).abs() >= 0.5 {
        t + 1f64.copysign(x)
    } else {
        t
    };

    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round a value in degrees to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
