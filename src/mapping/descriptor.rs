//! Raw control descriptors and the SDL token grammar
//!
//! Tokens such as `b3`, `h0.1`, `-a2` or `a5~` are parsed exactly once into a
//! [`Token`]; encoders only ever see the typed [`RawControlDescriptor`].

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::mapping::MappingError;

/// Highest button/axis/hat index accepted from a token
pub const MAX_CONTROL_INDEX: u32 = 255;
/// Highest keyboard code accepted in a capture (SDL keycodes with the
/// scancode bit set stay below it)
pub const MAX_KEY_CODE: u32 = 0x4000_FFFF;

/// Half of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSign {
    Positive,
    Negative,
}

impl AxisSign {
    /// The opposite half
    pub fn flipped(self) -> Self {
        match self {
            AxisSign::Positive => AxisSign::Negative,
            AxisSign::Negative => AxisSign::Positive,
        }
    }

    /// `+` or `-` as used in SDL tokens
    pub fn as_char(self) -> char {
        match self {
            AxisSign::Positive => '+',
            AxisSign::Negative => '-',
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            AxisSign::Positive => 1,
            AxisSign::Negative => -1,
        }
    }
}

/// Cardinal direction of a hat bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HatDirection {
    Up,
    Right,
    Down,
    Left,
}

impl HatDirection {
    pub const ALL: [HatDirection; 4] = [
        HatDirection::Up,
        HatDirection::Right,
        HatDirection::Down,
        HatDirection::Left,
    ];

    /// Only single cardinal bits map to a direction; diagonals return `None`
    pub fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            1 => Some(HatDirection::Up),
            2 => Some(HatDirection::Right),
            4 => Some(HatDirection::Down),
            8 => Some(HatDirection::Left),
            _ => None,
        }
    }

    /// Mask bit of this direction (1, 2, 4, 8)
    pub fn bit(self) -> u8 {
        match self {
            HatDirection::Up => 1,
            HatDirection::Right => 2,
            HatDirection::Down => 4,
            HatDirection::Left => 8,
        }
    }

    /// Lowercase direction name (`up`, `right`, ...)
    pub fn name(self) -> &'static str {
        match self {
            HatDirection::Up => "up",
            HatDirection::Right => "right",
            HatDirection::Down => "down",
            HatDirection::Left => "left",
        }
    }

    /// Splits a hat mask into its cardinal directions, up/right/down/left order
    pub fn decompose(mask: u8) -> Vec<HatDirection> {
        HatDirection::ALL
            .into_iter()
            .filter(|dir| mask & dir.bit() != 0)
            .collect()
    }
}

/// Physical-layer binding of one control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RawControlDescriptor {
    Button {
        id: u32,
    },
    Axis {
        id: u32,
        sign: AxisSign,
    },
    Hat {
        id: u32,
        bit: u8,
    },
    #[default]
    Unbound,
}

impl RawControlDescriptor {
    /// Anything but `Unbound`
    pub fn is_bound(&self) -> bool {
        !matches!(self, RawControlDescriptor::Unbound)
    }

    /// Same axis, opposite half. Buttons, hats and `Unbound` are unchanged.
    pub fn reversed(self) -> Self {
        match self {
            RawControlDescriptor::Axis { id, sign } => RawControlDescriptor::Axis {
                id,
                sign: sign.flipped(),
            },
            other => other,
        }
    }

    /// SDL token text (`b0`, `-a1`, `h0.4`), `None` when unbound
    pub fn sdl_token(&self) -> Option<String> {
        match self {
            RawControlDescriptor::Button { id } => Some(format!("b{id}")),
            RawControlDescriptor::Axis { id, sign } => Some(format!("{}a{id}", sign.as_char())),
            RawControlDescriptor::Hat { id, bit } => Some(format!("h{id}.{bit}")),
            RawControlDescriptor::Unbound => None,
        }
    }
}

impl Display for RawControlDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sdl_token() {
            Some(token) => f.write_str(&token),
            None => f.write_str("unbound"),
        }
    }
}

/// How an axis token covers its axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRange {
    /// `a<N>`
    Full,
    /// `a<N>~`
    FullInverted,
    /// `+a<N>` / `-a<N>`, sign already decided by the token
    Half,
}

/// One parsed database or capture token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub control: RawControlDescriptor,
    pub range: AxisRange,
}

impl Token {
    pub const UNBOUND: Token = Token {
        control: RawControlDescriptor::Unbound,
        range: AxisRange::Full,
    };

    pub fn new(control: RawControlDescriptor) -> Self {
        Self {
            control,
            range: AxisRange::Full,
        }
    }
}

fn malformed(token: &str, reason: impl Into<String>) -> MappingError {
    MappingError::MalformedToken {
        token: token.to_string(),
        reason: reason.into(),
    }
}

fn parse_index(token: &str, digits: &str) -> Result<u32, MappingError> {
    let index: u32 = digits
        .parse()
        .map_err(|_| malformed(token, format!("{digits:?} is not an index")))?;
    if index > MAX_CONTROL_INDEX {
        return Err(malformed(token, format!("index {index} out of range")));
    }
    Ok(index)
}

impl FromStr for Token {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        if let Some(rest) = token.strip_prefix('b') {
            let id = parse_index(token, rest)?;
            return Ok(Token::new(RawControlDescriptor::Button { id }));
        }

        if let Some(rest) = token.strip_prefix('h') {
            let (id, bit) = rest
                .split_once('.')
                .ok_or_else(|| malformed(token, "hat token without direction mask"))?;
            let id = parse_index(token, id)?;
            let bit: u8 = bit
                .parse()
                .map_err(|_| malformed(token, "hat mask is not a number"))?;
            if bit == 0 || bit > 15 {
                return Err(malformed(token, format!("hat mask {bit} out of range")));
            }
            return Ok(Token::new(RawControlDescriptor::Hat { id, bit }));
        }

        let (half_sign, rest) = match token.chars().next() {
            Some('+') => (Some(AxisSign::Positive), &token[1..]),
            Some('-') => (Some(AxisSign::Negative), &token[1..]),
            _ => (None, token),
        };
        if let Some(rest) = rest.strip_prefix('a') {
            let (digits, inverted) = match rest.strip_suffix('~') {
                Some(digits) => (digits, true),
                None => (rest, false),
            };
            let id = parse_index(token, digits)?;
            let (sign, range) = match (half_sign, inverted) {
                (Some(sign), false) => (sign, AxisRange::Half),
                (Some(sign), true) => (sign.flipped(), AxisRange::Half),
                (None, false) => (AxisSign::Positive, AxisRange::Full),
                (None, true) => (AxisSign::Negative, AxisRange::FullInverted),
            };
            return Ok(Token {
                control: RawControlDescriptor::Axis { id, sign },
                range,
            });
        }

        Err(malformed(token, "unknown token prefix"))
    }
}

/// Keyboard captures are `k<keycode>` and become `Button { id: keycode }`
pub fn parse_keyboard_token(token: &str) -> Result<RawControlDescriptor, MappingError> {
    let trimmed = token.trim();
    let code = trimmed
        .strip_prefix('k')
        .ok_or_else(|| malformed(trimmed, "keyboard token must start with 'k'"))?;
    let id: u32 = code
        .parse()
        .map_err(|_| malformed(trimmed, "key code is not a number"))?;
    if id > MAX_KEY_CODE {
        return Err(malformed(trimmed, format!("key code {id} out of range")));
    }
    Ok(RawControlDescriptor::Button { id })
}
