use crate::types::Error;

const SECONDS_PER_DAY: u64 = 86_400;

pub const FIRST_BENEFIT_YEAR: u32 = 2016;
pub const LAST_BENEFIT_YEAR: u32 = 2099;

/// Midnight (UTC) of the day containing `timestamp`.
pub fn start_of_day(timestamp: u64) -> u64 {
    timestamp - timestamp % SECONDS_PER_DAY
}

/// Gregorian year (UTC) of a unix timestamp.
pub fn year_of(timestamp: u64) -> u32 {
    // Days-to-civil conversion with eras of 400 years starting on 0000-03-01.
    let z = timestamp / SECONDS_PER_DAY + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let year = yoe + era * 400;
    // March-based months: January and February belong to the next year.
    let year = if mp >= 10 { year + 1 } else { year };
    u32::try_from(year).unwrap_or(u32::MAX)
}

pub fn check_year(year: u32) -> Result<u32, Error> {
    if (FIRST_BENEFIT_YEAR..=LAST_BENEFIT_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(Error::InvalidYear)
    }
}
