//! Hull power as a function of tonnage
//!
//! Power grows slightly faster than tonnage (roughly `100 * t^1.2`), so one
//! big hull beats the same tonnage split across small ones.

/// `power(t)` for `t` in 0..=100, in fixed-point units
const POWER_TABLE: [i64; 101] = [
    0, 100, 230, 374, 528, 690, 859, 1033, 1213, 1397,
    1585, 1777, 1973, 2171, 2373, 2578, 2786, 2996, 3209, 3424,
    3641, 3861, 4082, 4306, 4532, 4759, 4988, 5220, 5452, 5687,
    5923, 6161, 6400, 6641, 6883, 7127, 7372, 7618, 7866, 8115,
    8365, 8617, 8870, 9124, 9379, 9635, 9893, 10151, 10411, 10672,
    10934, 11197, 11461, 11725, 11991, 12258, 12526, 12795, 13065, 13336,
    13608, 13880, 14154, 14428, 14703, 14979, 15256, 15534, 15813, 16092,
    16373, 16654, 16936, 17218, 17502, 17786, 18071, 18356, 18643, 18930,
    19218, 19507, 19796, 20086, 20377, 20668, 20960, 21253, 21547, 21841,
    22136, 22431, 22727, 23024, 23321, 23619, 23918, 24217, 24517, 24818,
    25119,
];

/// Scale applied when two halves are recombined (1.149, in thousandths)
const HALVES_FACTOR: i64 = 1149;

/// Power of a hull of the given tonnage
///
/// Beyond the table the hull is split into two halves and recombined as
/// `1.149 * (power(a) + power(b))`, recursing as needed.
pub fn power(tonnage: i64) -> i64 {
    if tonnage <= 0 {
        return 0;
    }
    if tonnage <= 100 {
        return POWER_TABLE[tonnage as usize];
    }
    let half = tonnage / 2;
    let rest = tonnage - half;
    HALVES_FACTOR * (power(half) + power(rest)) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        assert_eq!(power(0), 0);
        assert_eq!(power(1), 100);
        assert_eq!(power(10), 1585);
        assert_eq!(power(100), 25119);
    }

    #[test]
    fn test_large_tonnage_combines_halves() {
        // 101 = 50 + 51
        assert_eq!(power(101), 1149 * (10934 + 11197) / 1000);
        // 200 = 100 + 100
        assert_eq!(power(200), 1149 * (25119 * 2) / 1000);
    }

    #[test]
    fn test_monotone() {
        let mut last = 0;
        for t in 1..=600 {
            let p = power(t);
            assert!(p >= last, "power({}) = {} < {}", t, p, last);
            last = p;
        }
    }
}
