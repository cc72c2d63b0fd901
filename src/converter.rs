//! Interactive Celsius/Fahrenheit converter
//!
//! One session asks for a mode and a value, prints one line and ends.

use std::fmt;
use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::{Result, WeatherDeskError};

pub const BANNER: &str = "--- Temperature Converter ---";
pub const CHOICE_PROMPT: &str = "Choose (1 or 2): ";
pub const VALUE_PROMPT: &str = "Enter the temperature: ";
pub const INVALID_CHOICE_MESSAGE: &str = "Invalid choice. Please pick 1 or 2.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    CelsiusToFahrenheit,
    FahrenheitToCelsius,
}

impl Mode {
    /// Match the menu tag exactly: "1" or "2"
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "1" => Ok(Self::CelsiusToFahrenheit),
            "2" => Ok(Self::FahrenheitToCelsius),
            other => Err(WeatherDeskError::invalid_selection(other)),
        }
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::CelsiusToFahrenheit => value * 9.0 / 5.0 + 32.0,
            Self::FahrenheitToCelsius => (value - 32.0) * 5.0 / 9.0,
        }
    }

    fn units(self) -> (&'static str, &'static str) {
        match self {
            Self::CelsiusToFahrenheit => ("°C", "°F"),
            Self::FahrenheitToCelsius => ("°F", "°C"),
        }
    }
}

/// A finished conversion, printed as e.g. `100°C is 212.0°F`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub mode: Mode,
    pub input: f64,
    pub result: f64,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = self.mode.units();
        // Ties round away from zero, `{:.1}` alone would round them to even
        let rounded = (self.result * 10.0).round() / 10.0;
        write!(f, "{}{} is {:.1}{}", self.input, from, rounded, to)
    }
}

/// Parse a temperature, surrounding whitespace allowed. A blank value reads as zero.
pub fn parse_temperature(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| WeatherDeskError::parse(raw))
}

/// Convert `raw` according to the menu tag.
///
/// A non-numeric value is not rejected: it becomes NaN and shows up as such
/// in the output line. Only an unknown tag is an error.
pub fn convert(tag: &str, raw: &str) -> Result<Conversion> {
    let mode = Mode::from_tag(tag)?;
    let input = parse_temperature(raw).unwrap_or_else(|e| {
        warn!("{}", e);
        f64::NAN
    });

    Ok(Conversion {
        mode,
        input,
        result: mode.apply(input),
    })
}

/// Run one prompt/answer session over the given streams
pub fn run_session<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<()> {
    writeln!(output, "{BANNER}")?;
    writeln!(output, "1: Celsius to Fahrenheit")?;
    writeln!(output, "2: Fahrenheit to Celsius")?;

    let choice = prompt(&mut input, &mut output, CHOICE_PROMPT)?;
    let value = prompt(&mut input, &mut output, VALUE_PROMPT)?;
    debug!("Converter input: choice={:?} value={:?}", choice, value);

    match convert(&choice, &value) {
        Ok(conversion) => writeln!(output, "{conversion}")?,
        Err(WeatherDeskError::InvalidSelection { .. }) => {
            writeln!(output, "{INVALID_CHOICE_MESSAGE}")?;
        }
        Err(e) => return Err(e),
    }
    output.flush()?;
    Ok(())
}

/// Print a prompt and read one line without its terminator. EOF reads as empty.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<String> {
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case("1", "100", "100°C is 212.0°F")]
    #[case("1", "0", "0°C is 32.0°F")]
    #[case("1", "-40", "-40°C is -40.0°F")]
    #[case("1", "36.6", "36.6°C is 97.9°F")]
    #[case("2", "32", "32°F is 0.0°C")]
    #[case("2", "212", "212°F is 100.0°C")]
    #[case("2", "100", "100°F is 37.8°C")]
    #[case("2", " 50 ", "50°F is 10.0°C")]
    #[case("1", "1.25", "1.25°C is 34.3°F")]
    #[case("2", "34.25", "34.25°F is 1.3°C")]
    #[case("1", "-1.25", "-1.25°C is 29.8°F")]
    #[case("1", "", "0°C is 32.0°F")]
    #[case("2", "   ", "0°F is -17.8°C")]
    fn test_conversion_lines(#[case] tag: &str, #[case] raw: &str, #[case] expected: &str) {
        assert_eq!(convert(tag, raw).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("3")]
    #[case("")]
    #[case("1 ")]
    #[case("one")]
    fn test_invalid_selection(#[case] tag: &str) {
        for raw in ["100", "abc", ""] {
            let err = convert(tag, raw).unwrap_err();
            assert!(matches!(err, WeatherDeskError::InvalidSelection { .. }));
        }
    }

    #[test]
    fn test_non_numeric_value_becomes_nan() {
        let conversion = convert("1", "warm").unwrap();
        assert!(conversion.input.is_nan());
        assert_eq!(conversion.to_string(), "NaN°C is NaN°F");
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!(parse_temperature("21.5").unwrap(), 21.5);
        assert_eq!(parse_temperature("\t-3 ").unwrap(), -3.0);
        assert_eq!(parse_temperature("").unwrap(), 0.0);
        assert_eq!(parse_temperature(" \t").unwrap(), 0.0);
        assert!(matches!(
            parse_temperature("12abc"),
            Err(WeatherDeskError::Parse { .. })
        ));
    }

    #[test]
    fn test_session_transcript() {
        let mut output = Vec::new();
        run_session(Cursor::new("1\n100\n"), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "--- Temperature Converter ---\n\
             1: Celsius to Fahrenheit\n\
             2: Fahrenheit to Celsius\n\
             Choose (1 or 2): Enter the temperature: 100°C is 212.0°F\n"
        );
    }

    #[test]
    fn test_session_invalid_choice_still_asks_for_value() {
        let mut output = Vec::new();
        run_session(Cursor::new("7\r\n55\r\n"), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains(VALUE_PROMPT));
        assert!(text.ends_with("Invalid choice. Please pick 1 or 2.\n"));
    }

    #[test]
    fn test_session_at_eof() {
        let mut output = Vec::new();
        run_session(Cursor::new(""), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with(&format!("{INVALID_CHOICE_MESSAGE}\n")));

        // Value missing after a valid choice reads as zero
        let mut output = Vec::new();
        run_session(Cursor::new("1\n"), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with("Enter the temperature: 0°C is 32.0°F\n"));
    }
}
