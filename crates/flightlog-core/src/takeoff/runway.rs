use regex::Regex;
use std::sync::LazyLock;

static DESIGNATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})([LRC])?$").expect("valid runway regex"));

static SLASHED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[LRC]?\s*/").expect("valid runway regex"));

/// A runway designator completed with its opposite end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunwayPair {
    /// Both ends, lower number first (`"09L/27R"`), or the input unchanged
    /// when it could not be parsed.
    pub designator: String,
    /// Number of the end given in the input (tens of degrees), if parsed.
    pub heading: Option<u32>,
}

impl RunwayPair {
    /// The input end's number, zero-padded (`"09"`).
    pub fn base(&self) -> Option<String> {
        self.heading.map(|h| format!("{:02}", h))
    }
}

/// Number of the opposite runway end: 18 away, wrapping within 1..=36.
pub fn reciprocal_number(n: u32) -> u32 {
    (n + 17) % 36 + 1
}

fn opposite_side(side: &str) -> &str {
    match side {
        "L" => "R",
        "R" => "L",
        other => other,
    }
}

/// Complete a runway designator with its reciprocal.
///
/// `"09"` → `"09/27"`, `"27"` → `"09/27"`, `"09L"` → `"09L/27R"`. Values
/// that already name both ends pass through with only their leading number
/// parsed. Anything else is returned unchanged with no heading.
pub fn runway_pair(raw: &str) -> RunwayPair {
    let trimmed = raw.trim();
    let unchanged = |heading: Option<u32>| RunwayPair {
        designator: raw.to_string(),
        heading,
    };

    if let Some(caps) = SLASHED_RE.captures(trimmed) {
        let heading = caps[1].parse().ok().filter(|n| (1..=36).contains(n));
        return unchanged(heading);
    }

    let Some(caps) = DESIGNATOR_RE.captures(trimmed) else {
        return unchanged(None);
    };
    let Some(number) = caps[1].parse::<u32>().ok().filter(|n| (1..=36).contains(n)) else {
        return unchanged(None);
    };

    let side = caps.get(2).map_or("", |m| m.as_str());
    let recip = reciprocal_number(number);
    let recip_side = opposite_side(side);

    let this_end = format!("{:02}{}", number, side);
    let other_end = format!("{:02}{}", recip, recip_side);
    let designator = if number <= recip {
        format!("{}/{}", this_end, other_end)
    } else {
        format!("{}/{}", other_end, this_end)
    };

    RunwayPair {
        designator,
        heading: Some(number),
    }
}
