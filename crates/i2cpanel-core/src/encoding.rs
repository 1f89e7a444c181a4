use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("'{text}' is not a {radix} value between 0 and 255")]
    OutOfRange { text: String, radix: Radix },
    #[error("'{0}' is not a 24-bit binary string")]
    BitString(String),
    #[error("unknown data type '{0}'")]
    UnknownRadix(String),
}

/// Number base an operator picks values in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Radix {
    #[default]
    Binary,
    Hexadecimal,
    Decimal,
}

impl std::str::FromStr for Radix {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Binary" => Self::Binary,
            "Hexadecimal" => Self::Hexadecimal,
            "Decimal" => Self::Decimal,
            other => return Err(ValueError::UnknownRadix(other.to_string())),
        })
    }
}

impl std::fmt::Display for Radix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Radix {
    pub const ALL: [Radix; 3] = [Radix::Binary, Radix::Hexadecimal, Radix::Decimal];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Hexadecimal => "Hexadecimal",
            Self::Decimal => "Decimal",
        }
    }

    fn base(&self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Hexadecimal => 16,
            Self::Decimal => 10,
        }
    }

    pub fn format(&self, value: u8) -> String {
        match self {
            Self::Binary => format!("{value:08b}"),
            Self::Hexadecimal => format!("{value:02X}"),
            Self::Decimal => value.to_string(),
        }
    }

    /// Decodes `text` in this base. Only the exact spelling of an entry in
    /// [`Radix::options`] is accepted.
    pub fn parse(&self, text: &str) -> Result<u8, ValueError> {
        u8::from_str_radix(text, self.base())
            .ok()
            .filter(|value| self.format(*value) == text)
            .ok_or_else(|| ValueError::OutOfRange {
                text: text.to_string(),
                radix: *self,
            })
    }

    /// Every byte value rendered in this base, ascending.
    pub fn options(&self) -> impl Iterator<Item = String> {
        let radix = *self;
        (0..=u8::MAX).map(move |value| radix.format(value))
    }
}
