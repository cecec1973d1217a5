//! Great-circle distance between two coordinates, computed in integer fixed
//! point with 18 decimals.

use soroban_sdk::String;

use crate::text::read_str;

const SCALE: i128 = 1_000_000_000_000_000_000;
const PI: i128 = 3_141_592_653_589_793_238;
const HALF_PI: i128 = 1_570_796_326_794_896_619;
const TWO_PI: i128 = 6_283_185_307_179_586_477;

const NANOS_PER_DEGREE: i64 = 1_000_000_000;
const MAX_LATITUDE: i64 = 90 * NANOS_PER_DEGREE;
const MAX_LONGITUDE: i64 = 180 * NANOS_PER_DEGREE;

/// Longest coordinate string read; longer input is unreadable.
const MAX_COORDINATE_LEN: usize = 64;

/// Above this the arcsine series converges too slowly and the half-angle
/// identity is used instead.
const ASIN_SERIES_LIMIT: i128 = 700_000_000_000_000_000;

pub const EARTH_RADIUS_M: i128 = 6_378_100;

/// A coordinate pair in nano-degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub lat: i64,
    pub lon: i64,
}

impl Point {
    pub fn parse(lat: &String, lon: &String) -> Option<Self> {
        let lat = parse_degrees(lat)?;
        let lon = parse_degrees(lon)?;
        if lat.abs() > MAX_LATITUDE {
            return None;
        }
        Some(Point { lat, lon })
    }
}

/// Nano-degrees of a decimal-degree string of at most 64 bytes.
pub fn parse_degrees(s: &String) -> Option<i64> {
    let mut buf = [0u8; MAX_COORDINATE_LEN];
    parse_decimal_degrees(read_str(s, &mut buf)?)
}

/// Accepts plain signed decimals such as `-4.899431`. Digits beyond the ninth
/// decimal are dropped.
fn parse_decimal_degrees(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut degrees: i64 = 0;
    for b in whole.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        degrees = degrees.checked_mul(10)?.checked_add((b - b'0') as i64)?;
        if degrees > 180 {
            return None;
        }
    }

    let mut nanos: i64 = 0;
    let mut place = NANOS_PER_DEGREE / 10;
    for b in fraction.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        nanos += (b - b'0') as i64 * place;
        place /= 10;
    }

    let total = degrees * NANOS_PER_DEGREE + nanos;
    if total > MAX_LONGITUDE {
        return None;
    }
    Some(if negative { -total } else { total })
}

/// Haversine distance in millimetres.
pub fn distance_mm(a: Point, b: Point) -> i128 {
    let lat_a = radians(a.lat);
    let lat_b = radians(b.lat);
    let half_dlat = (lat_b - lat_a) / 2;
    let half_dlon = (radians(b.lon) - radians(a.lon)) / 2;

    let sin_lat = sin(half_dlat);
    let sin_lon = sin(half_dlon);
    let h = mul(sin_lat, sin_lat) + mul(mul(cos(lat_a), cos(lat_b)), mul(sin_lon, sin_lon));
    let central_angle = 2 * asin(sqrt(h.clamp(0, SCALE)));

    EARTH_RADIUS_M * 1_000 * central_angle / SCALE
}

fn mul(a: i128, b: i128) -> i128 {
    a * b / SCALE
}

fn radians(nano_degrees: i64) -> i128 {
    nano_degrees as i128 * PI / (180 * NANOS_PER_DEGREE as i128)
}

fn sin(x: i128) -> i128 {
    let mut x = x % TWO_PI;
    if x > PI {
        x -= TWO_PI;
    } else if x < -PI {
        x += TWO_PI;
    }

    let x2 = mul(x, x);
    let mut term = x;
    let mut sum = x;
    let mut n: i128 = 1;
    while term != 0 {
        term = -mul(term, x2) / ((2 * n) * (2 * n + 1));
        sum += term;
        n += 1;
    }
    sum
}

fn cos(x: i128) -> i128 {
    sin(x + HALF_PI)
}

fn sqrt(v: i128) -> i128 {
    isqrt(v * SCALE)
}

fn isqrt(n: i128) -> i128 {
    if n < 2 {
        return n.max(0);
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Arcsine for `y` in `[0, 1]`.
fn asin(y: i128) -> i128 {
    if y <= ASIN_SERIES_LIMIT {
        asin_series(y)
    } else {
        // asin(y) = pi/2 - 2 asin(sqrt((1 - y) / 2))
        HALF_PI - 2 * asin_series(sqrt((SCALE - y) / 2))
    }
}

fn asin_series(y: i128) -> i128 {
    let y2 = mul(y, y);
    let mut term = y;
    let mut sum = y;
    let mut n: i128 = 0;
    while term != 0 {
        term = mul(term, y2) * (2 * n + 1) * (2 * n + 1) / ((2 * n + 2) * (2 * n + 3));
        sum += term;
        n += 1;
    }
    sum
}
