//! Arithmetic (tabular) Islamic calendar.
//!
//! A 30-year cycle of 354/355-day years; odd months have 30 days, even months
//! 29, and Dhu al-Hijjah gains a day in the 11 leap years
//! {2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29}. Conversions go through the
//! Julian day number, so they are exact inverses of each other.

/// JDN of 1 Muharram 1 AH with the civil (Friday, 16 July 622) epoch.
pub const CIVIL_EPOCH: i64 = 1_948_440;

/// JDN of 1 Muharram 1 AH with the astronomical (Thursday, 15 July 622) epoch.
pub const ASTRONOMICAL_EPOCH: i64 = 1_948_439;

pub fn is_leap_year(year: i64) -> bool {
    (14 + 11 * year).rem_euclid(30) < 11
}

pub fn month_length(year: i64, month: u32) -> u32 {
    if month % 2 == 1 || (month == 12 && is_leap_year(year)) {
        30
    } else {
        29
    }
}

/// Julian day number of a Hijri date.
pub fn to_jdn(year: i64, month: u32, day: u32, epoch: i64) -> i64 {
    let m = month as i64;
    day as i64
        + 29 * (m - 1)
        + (6 * m - 1).div_euclid(11)
        + (year - 1) * 354
        + (3 + 11 * year).div_euclid(30)
        + epoch
        - 1
}

/// Hijri `(year, month, day)` of a Julian day number.
pub fn from_jdn(jdn: i64, epoch: i64) -> (i64, u32, u32) {
    let year = (30 * (jdn - epoch) + 10_646).div_euclid(10_631);
    let prior_days = jdn - to_jdn(year, 1, 1, epoch);
    let month = ((11 * prior_days + 330).div_euclid(325)).clamp(1, 12) as u32;
    let day = (jdn - to_jdn(year, month, 1, epoch) + 1) as u32;
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_years_in_cycle() {
        let leaps: Vec<i64> = (1..=30).filter(|y| is_leap_year(*y)).collect();
        assert_eq!(leaps, vec![2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29]);
        assert!(is_leap_year(32));
    }

    #[test]
    fn test_cycle_length() {
        let start = to_jdn(1, 1, 1, CIVIL_EPOCH);
        let next_cycle = to_jdn(31, 1, 1, CIVIL_EPOCH);
        assert_eq!(next_cycle - start, 10_631);
        assert_eq!(start, CIVIL_EPOCH);
    }

    #[test]
    fn test_month_boundaries() {
        let epoch = CIVIL_EPOCH;
        for (month, len) in [(1, 30), (2, 29), (11, 30), (12, 30)] {
            let last = to_jdn(1445, month, len, epoch);
            assert_eq!(from_jdn(last, epoch), (1445, month, len));
            assert_eq!(from_jdn(last + 1, epoch).2, 1);
        }
        // 1445 is a leap year: Dhu al-Hijjah has 30 days.
        assert!(is_leap_year(1445));
        assert_eq!(month_length(1445, 12), 30);
    }

    #[test]
    fn test_known_date() {
        // 1 January 2000 (JDN 2451545) is 24 Ramadan 1420 in the civil calendar.
        assert_eq!(from_jdn(2_451_545, CIVIL_EPOCH), (1420, 9, 24));
        assert_eq!(from_jdn(2_451_545, ASTRONOMICAL_EPOCH), (1420, 9, 25));
    }
}
