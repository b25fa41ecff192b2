//! Text to resistance values.
//!
//! Values may be written as plain numbers (`1500`, `4.7e3`) or in the R/K/M notation printed on
//! schematics, where the multiplier letter doubles as the decimal point (`4K7`, `470R`, `2M2`).

use crate::error::ParseError;

fn multiplier(unit: char) -> Option<f64> {
    match unit {
        'R' | 'r' => Some(1.0),
        'K' | 'k' => Some(1e3),
        'M' => Some(1e6),
        _ => None,
    }
}

fn parse_rkm(token: &str) -> Option<f64> {
    let (pos, unit) = token.char_indices().find(|(_, c)| c.is_ascii_alphabetic())?;
    let mult = multiplier(unit)?;
    let (int, frac) = (&token[..pos], &token[pos + unit.len_utf8()..]);
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if int.is_empty() || !digits(frac) {
        return None;
    }
    let mantissa: f64 = if frac.is_empty() {
        int.parse().ok()?
    } else if digits(int) {
        format!("{}.{}", int, frac).parse().ok()?
    } else {
        return None;
    };
    Some(mantissa * mult)
}

/// Parses a single resistance value.
pub fn parse_value(text: &str) -> Result<f64, ParseError> {
    let token = text.trim();
    token
        .parse::<f64>()
        .ok()
        .or_else(|| parse_rkm(token))
        .ok_or_else(|| ParseError::InvalidToken {
            token: token.to_string(),
            position: 1,
        })
}

/// Parses a comma separated list of resistance values, preserving order and duplicates.
///
/// Every token must parse; an empty token (e.g. from a trailing comma) is rejected as well.
pub fn parse_inventory(text: &str) -> Result<Vec<f64>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    text.split(',')
        .enumerate()
        .map(|(i, tok)| {
            parse_value(tok).map_err(|_| ParseError::InvalidToken {
                token: tok.trim().to_string(),
                position: i + 1,
            })
        })
        .collect()
}

/// Parses the target resistance.
///
/// With the `expr` feature the target may also be an arithmetic expression such as
/// `1/(1/1000 + 1/2200)`.
pub fn parse_target(text: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidTarget(text.trim().to_string());
    match parse_value(text) {
        Ok(v) => Ok(v),
        #[cfg(feature = "expr")]
        Err(_) => meval::eval_str(text.trim()).map_err(|_| invalid()),
        #[cfg(not(feature = "expr"))]
        Err(_) => Err(invalid()),
    }
}

fn format_rval(r: f64, unit: &str) -> String {
    let mut val = format!("{}", r);
    if val.contains('.') {
        val.replace('.', unit)
    } else {
        val.push_str(unit);
        val
    }
}

/// Renders a value in R/K/M notation, e.g. `330R`, `4K7`, `1M`.
pub fn format_value(r: f64) -> String {
    // Round to 3 decimals at the chosen scale so products like 2.2 * 1e2 print cleanly.
    let tidy = |v: f64| (v * 1e3).round() / 1e3;
    if r.abs() < 1000.0 {
        format_rval(tidy(r), "R")
    } else if r.abs() < 1_000_000.0 {
        format_rval(tidy(r / 1000.0), "K")
    } else {
        format_rval(tidy(r / 1_000_000.0), "M")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_value("1500").unwrap(), 1500.0);
        assert_eq!(parse_value(" 4.7e3 ").unwrap(), 4700.0);
        assert_eq!(parse_value("0.5").unwrap(), 0.5);
    }

    #[test]
    fn rkm_notation() {
        assert_eq!(parse_value("4K7").unwrap(), 4700.0);
        assert_eq!(parse_value("4k7").unwrap(), 4700.0);
        assert_eq!(parse_value("10K").unwrap(), 10_000.0);
        assert_eq!(parse_value("470R").unwrap(), 470.0);
        assert_eq!(parse_value("4R7").unwrap(), 4.7);
        assert_eq!(parse_value("2M2").unwrap(), 2_200_000.0);
        assert!(parse_value("K7").is_err());
        assert!(parse_value("4X7").is_err());
        assert!(parse_value("4K7K").is_err());
        assert!(parse_value("1.5K2").is_err());
    }

    #[test]
    fn inventory_keeps_order_and_duplicates() {
        let inv = parse_inventory("330, 390,330 ,1k").unwrap();
        assert_eq!(inv, vec![330.0, 390.0, 330.0, 1000.0]);
    }

    #[test]
    fn inventory_reports_bad_token() {
        let err = parse_inventory("330, abc, 1000").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidToken {
                token: "abc".to_string(),
                position: 2
            }
        );

        let err = parse_inventory("330, 1000,").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidToken {
                token: String::new(),
                position: 3
            }
        );

        assert_eq!(parse_inventory("  ").unwrap_err(), ParseError::Empty);
    }

    #[cfg(feature = "expr")]
    #[test]
    fn target_expression() {
        assert_eq!(parse_target("1K5").unwrap(), 1500.0);
        let t = parse_target("1/(1/1000 + 1/1000)").unwrap();
        assert!((t - 500.0).abs() < 1e-9);
        assert!(parse_target("one thousand").is_err());
    }

    #[test]
    fn bad_target_is_not_an_inventory_error() {
        assert_eq!(
            parse_target(" abc "),
            Err(ParseError::InvalidTarget("abc".to_string()))
        );
        assert!(!parse_target("abc").unwrap_err().is_inventory());
        assert!(parse_inventory("abc").unwrap_err().is_inventory());
    }

    #[test]
    fn formatting() {
        assert_eq!(format_value(330.0), "330R");
        assert_eq!(format_value(4.7), "4R7");
        assert_eq!(format_value(4700.0), "4K7");
        assert_eq!(format_value(1000.0), "1K");
        assert_eq!(format_value(2.2 * 1e2), "220R");
        assert_eq!(format_value(2_200_000.0), "2M2");
    }
}
