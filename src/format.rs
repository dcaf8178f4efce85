//! printf style formatting of the percentage label.
use anyhow::{anyhow, bail, Result};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Fixed,
    Integer,
    Exponent { upper: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Flags {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    conversion: Conversion,
}

/// A format string with exactly one numeric placeholder, such as
/// `"%.f %%"` or `"%5.1f%%"`. Supported conversions are `f`, `F`, `d`, `i`,
/// `e` and `E` with the flags `-`, `0`, `+` and space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentFormat {
    source: String,
    prefix: String,
    placeholder: Placeholder,
    suffix: String,
}

impl PercentFormat {
    /// Format of the label before the first progress update.
    pub const INITIAL: &'static str = "%.1f%%";
    pub const DEFAULT: &'static str = "%.f %%";

    pub fn parse(source: &str) -> Result<Self> {
        let mut literal = String::new();
        let mut prefix = None;
        let mut placeholder = None;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }
            if placeholder.is_some() {
                bail!("Format {:?} has more than one placeholder", source);
            }

            let mut flags = Flags::default();
            while let Some(&flag) = chars.peek() {
                match flag {
                    '-' => flags.left = true,
                    '0' => flags.zero = true,
                    '+' => flags.plus = true,
                    ' ' => flags.space = true,
                    _ => break,
                }
                chars.next();
            }

            let mut width = 0;
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                width = width * 10 + digit as usize;
                chars.next();
            }

            let mut precision = None;
            if chars.peek() == Some(&'.') {
                chars.next();
                let mut digits = 0;
                while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                    digits = digits * 10 + digit as usize;
                    chars.next();
                }
                precision = Some(digits);
            }

            let conversion = match chars.next() {
                Some('f' | 'F') => Conversion::Fixed,
                Some('d' | 'i') => Conversion::Integer,
                Some('e') => Conversion::Exponent { upper: false },
                Some('E') => Conversion::Exponent { upper: true },
                Some(other) => bail!("Unsupported conversion '%{}' in {:?}", other, source),
                None => bail!("Format {:?} ends inside a placeholder", source),
            };

            prefix = Some(std::mem::take(&mut literal));
            placeholder = Some(Placeholder {
                flags,
                width,
                precision,
                conversion,
            });
        }

        let placeholder =
            placeholder.ok_or_else(|| anyhow!("Format {:?} has no numeric placeholder", source))?;

        Ok(Self {
            source: source.to_string(),
            prefix: prefix.unwrap_or_default(),
            placeholder,
            suffix: literal,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn render(&self, value: f64) -> String {
        format!("{}{}{}", self.prefix, self.placeholder.render(value), self.suffix)
    }
}

impl Default for PercentFormat {
    fn default() -> Self {
        Self {
            source: Self::DEFAULT.to_string(),
            prefix: String::new(),
            placeholder: Placeholder {
                flags: Flags::default(),
                width: 0,
                precision: Some(0),
                conversion: Conversion::Fixed,
            },
            suffix: " %".to_string(),
        }
    }
}

impl FromStr for PercentFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PercentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Placeholder {
    fn render(&self, value: f64) -> String {
        let negative = value.is_sign_negative() && value != 0.0;
        let magnitude = value.abs();

        let digits = match self.conversion {
            Conversion::Fixed => format!("{:.*}", self.precision.unwrap_or(6), magnitude),
            Conversion::Integer => format!("{}", magnitude.trunc() as i64),
            Conversion::Exponent { upper } => {
                let formatted = format!("{:.*e}", self.precision.unwrap_or(6), magnitude);
                let (mantissa, exponent) = formatted
                    .split_once('e')
                    .unwrap_or((formatted.as_str(), "0"));
                let exponent: i32 = exponent.parse().unwrap_or(0);
                let sign = if exponent < 0 { '-' } else { '+' };
                let marker = if upper { 'E' } else { 'e' };
                format!("{}{}{}{:02}", mantissa, marker, sign, exponent.abs())
            }
        };

        let sign = match (negative, self.flags.plus, self.flags.space) {
            (true, _, _) => "-",
            (false, true, _) => "+",
            (false, false, true) => " ",
            _ => "",
        };

        let len = sign.len() + digits.len();
        if len >= self.width {
            return format!("{}{}", sign, digits);
        }
        let padding = self.width - len;
        if self.flags.left {
            format!("{}{}{}", sign, digits, " ".repeat(padding))
        } else if self.flags.zero {
            format!("{}{}{}", sign, "0".repeat(padding), digits)
        } else {
            format!("{}{}{}", " ".repeat(padding), sign, digits)
        }
    }
}
