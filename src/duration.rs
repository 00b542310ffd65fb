use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::multispace0,
    combinator::{all_consuming, value, verify},
    multi::many1,
    number::complete::double,
    sequence::{pair, preceded, terminated},
    IResult,
};

/// Microseconds per unit, Warp 10's default time unit.
fn read_unit(input: &str) -> IResult<&str, f64> {
    alt((
        value(1.0, tag("us")),
        value(1_000.0, tag("ms")),
        value(
            604_800_000_000.0,
            alt((tag("weeks"), tag("week"), tag("w"))),
        ),
        value(86_400_000_000.0, alt((tag("days"), tag("day"), tag("d")))),
        value(3_600_000_000.0, alt((tag("hours"), tag("hour"), tag("h")))),
        value(
            60_000_000.0,
            alt((tag("minutes"), tag("minute"), tag("min"), tag("m"))),
        ),
        value(
            1_000_000.0,
            alt((tag("seconds"), tag("second"), tag("sec"), tag("s"))),
        ),
    ))(input)
}

fn read_segment(input: &str) -> IResult<&str, f64> {
    let (remaining_input, (amount, unit)) = pair(
        preceded(
            multispace0,
            verify(double, |amount: &f64| {
                amount.is_finite() && *amount >= 0.0
            }),
        ),
        preceded(multispace0, read_unit),
    )(input)?;

    Ok((remaining_input, amount * unit))
}

/// Parses a human duration string like `1h`, `90 minutes` or `1h30m`.
///
/// Returns the total duration in microseconds. A bare number without
/// a unit is not a duration.
pub fn read_duration(input: &str) -> IResult<&str, i64> {
    let (remaining_input, segments) = many1(read_segment)(input)?;
    Ok((remaining_input, segments.iter().sum::<f64>().round() as i64))
}

/// Like [`read_duration`], but the whole input must be a duration.
pub fn parse_duration(input: &str) -> Option<i64> {
    all_consuming(terminated(read_duration, multispace0))(input)
        .ok()
        .map(|(_, microseconds)| microseconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_units() {
        assert_eq!(parse_duration("1us"), Some(1));
        assert_eq!(parse_duration("1ms"), Some(1_000));
        assert_eq!(parse_duration("1s"), Some(1_000_000));
        assert_eq!(parse_duration("1m"), Some(60_000_000));
        assert_eq!(parse_duration("1h"), Some(3_600_000_000));
        assert_eq!(parse_duration("1d"), Some(86_400_000_000));
        assert_eq!(parse_duration("1w"), Some(604_800_000_000));
    }

    #[test]
    fn test_spelled_out_units() {
        assert_eq!(parse_duration("90 minutes"), Some(5_400_000_000));
        assert_eq!(parse_duration("2 days"), Some(172_800_000_000));
        assert_eq!(parse_duration("1 hour"), Some(3_600_000_000));
    }

    #[test]
    fn test_fractional_and_compound() {
        assert_eq!(parse_duration("1.5h"), Some(5_400_000_000));
        assert_eq!(parse_duration("1h30m"), Some(5_400_000_000));
        assert_eq!(parse_duration("1h 30m 10s"), Some(5_410_000_000));
    }

    #[test]
    fn test_not_durations() {
        // A plain number is not a duration
        assert_eq!(parse_duration("1871"), None);
        assert_eq!(parse_duration("foo"), None);
        assert_eq!(parse_duration("1 parsec"), None);
        // Trailing garbage is refused even if the prefix parses
        assert_eq!(parse_duration("1h later"), None);
        assert_eq!(parse_duration("-1h"), None);
    }

    #[test]
    fn test_zero_is_a_valid_parse() {
        // The sanitizer only treats strictly positive durations as such,
        // but the parser itself accepts zero.
        assert_eq!(parse_duration("0s"), Some(0));
    }
}
