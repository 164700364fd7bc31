//! chmod-style mode strings.
//!
//! Two forms are accepted:
//!
//! - octal: `644`, `0755`, `1777` (a leading `+` and one sticky digit are
//!   optional)
//! - symbolic: comma-separated clauses such as `u+x,go-w` or `a=rX`
//!
//! In a symbolic clause `X` grants execute only when the target is a
//! directory or some class already has execute, and `t` is the sticky bit,
//! which belongs to the others class.

use regex::Regex;

use crate::error::{Error, Result};
use crate::mode::Mode;

const OCTAL_PATTERN: &str = r"^\s*[+]?([01]?)([0-7]{3})\s*$";
const CLAUSE_PATTERN: &str = r"^\s*([ugoa]*)([+=-]+)([rwxXt]+)([,\s]*)\s*";

/// Execute-if-applicable, before it is resolved against the target.
const CAP_X: u8 = 0b1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Add,
    Remove,
    Set,
}

impl Op {
    fn from_char(c: char) -> Result<Self> {
        match c {
            '+' => Ok(Op::Add),
            '-' => Ok(Op::Remove),
            '=' => Ok(Op::Set),
            other => Err(Error::InvalidMode(format!("unexpected operator '{other}'"))),
        }
    }
}

/// Change to one class: how to combine, and which bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Change {
    op: Op,
    bits: u8,
}

impl Change {
    const KEEP: Change = Change {
        op: Op::Add,
        bits: 0,
    };

    fn apply(self, existing: u8, exec_ok: bool) -> u8 {
        let cap_x = self.bits & CAP_X != 0;
        let mut bits = self.bits & 0b111;
        if cap_x {
            bits |= 0b001;
        }
        let mut combined = match self.op {
            Op::Add => bits | existing,
            Op::Remove => !bits & existing,
            Op::Set => bits,
        };
        if cap_x && !exec_ok && existing & 0b001 == 0 {
            combined &= !0b001;
        }
        combined & 0b111
    }
}

/// A parsed mode string, ready to be applied to existing modes.
///
/// # Example
///
/// ```rust
/// use fsgate_acl::{Mode, ModeParser};
///
/// let base = Mode::from_bits_truncate(0o644);
/// assert_eq!(ModeParser::new("u+x,go-r").unwrap().apply_to(base, false).bits(), 0o700);
/// assert_eq!(ModeParser::new("750").unwrap().apply_to(base, false).bits(), 0o750);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeParser {
    user: Change,
    group: Change,
    other: Change,
    sticky: Change,
    symbolic: bool,
}

impl ModeParser {
    /// Parses `mode`, trying the symbolic form first.
    pub fn new(mode: &str) -> Result<Self> {
        let clause = compile(CLAUSE_PATTERN)?;
        if clause.is_match(mode) {
            return Self::parse_symbolic(mode, &clause);
        }
        let octal = compile(OCTAL_PATTERN)?;
        if let Some(caps) = octal.captures(mode) {
            let sticky = caps.get(1).map_or("", |m| m.as_str());
            let digits = caps.get(2).map_or("", |m| m.as_str());
            return Self::from_octal(mode, sticky, digits);
        }
        Err(Error::InvalidMode(format!("'{mode}' is not a mode")))
    }

    fn from_octal(mode: &str, sticky: &str, digits: &str) -> Result<Self> {
        let bits = u16::from_str_radix(digits, 8)
            .map_err(|e| Error::InvalidMode(format!("'{mode}': {e}")))?;
        let parsed = Mode::from_bits_truncate(bits);
        let set = |bits: u8| Change { op: Op::Set, bits };
        Ok(Self {
            user: set(parsed.user().bits()),
            group: set(parsed.group().bits()),
            other: set(parsed.other().bits()),
            sticky: if sticky.is_empty() {
                Change::KEEP
            } else {
                set(u8::from(sticky == "1"))
            },
            symbolic: false,
        })
    }

    fn parse_symbolic(mode: &str, clause: &Regex) -> Result<Self> {
        let invalid = || Error::InvalidMode(format!("'{mode}' is not a mode"));
        let mut parsed = Self {
            user: Change::KEEP,
            group: Change::KEEP,
            other: Change::KEEP,
            sticky: Change::KEEP,
            symbolic: true,
        };

        let mut pos = 0;
        let mut comma_separated = true;
        while pos < mode.len() || pos == 0 {
            if !comma_separated {
                return Err(invalid());
            }
            let caps = clause.captures(&mode[pos..]).ok_or_else(invalid)?;
            let whole = caps.get(0).ok_or_else(invalid)?;
            let who = caps.get(1).map_or("", |m| m.as_str());
            let ops = caps.get(2).map_or("", |m| m.as_str());
            let perms = caps.get(3).map_or("", |m| m.as_str());
            let separator = caps.get(4).map_or("", |m| m.as_str());

            // With several operators only the last one counts.
            let op = Op::from_char(ops.chars().last().ok_or_else(invalid)?)?;

            let (mut user, mut group, mut other) = (false, false, false);
            for c in who.chars() {
                match c {
                    'u' => user = true,
                    'g' => group = true,
                    'o' => other = true,
                    _ => {}
                }
            }
            if !(user || group || other) {
                (user, group, other) = (true, true, true);
            }

            let mut bits = 0u8;
            let mut sticky = false;
            for c in perms.chars() {
                match c {
                    'r' => bits |= 0b100,
                    'w' => bits |= 0b010,
                    'x' => bits |= 0b001,
                    'X' => bits |= CAP_X,
                    't' => sticky = true,
                    _ => return Err(invalid()),
                }
            }

            let change = Change { op, bits };
            if user {
                parsed.user = change;
            }
            if group {
                parsed.group = change;
            }
            if other {
                parsed.other = change;
                parsed.sticky = Change {
                    op,
                    bits: u8::from(sticky),
                };
            }

            comma_separated = separator.contains(',');
            pos += whole.end();
        }
        Ok(parsed)
    }

    /// Whether the string was symbolic rather than octal.
    pub fn is_symbolic(&self) -> bool {
        self.symbolic
    }

    /// The mode that results from applying the change to `base`.
    pub fn apply_to(&self, base: Mode, is_directory: bool) -> Mode {
        let exec_ok = is_directory
            || base.user().can_execute()
            || base.group().can_execute()
            || base.other().can_execute();
        let user = self.user.apply(base.user().bits(), exec_ok);
        let group = self.group.apply(base.group().bits(), exec_ok);
        let other = self.other.apply(base.other().bits(), exec_ok);
        let sticky = self.sticky.apply(u8::from(base.sticky()), false) & 1 == 1;
        let bits = (u16::from(user) << 6) | (u16::from(group) << 3) | u16::from(other);
        Mode::from_bits_truncate(bits).with_sticky(sticky)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidMode(format!("bad pattern {pattern}: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn apply(spec: &str, base: u16, dir: bool) -> u16 {
        ModeParser::new(spec)
            .unwrap()
            .apply_to(Mode::from_bits_truncate(base), dir)
            .bits()
    }

    #[test]
    fn test_octal() {
        assert_eq!(apply("644", 0o777, false), 0o644);
        assert_eq!(apply(" +0755 ", 0o1000, true), 0o755);
        assert_eq!(apply("1777", 0, true), 0o1777);
        assert!(!ModeParser::new("644").unwrap().is_symbolic());
    }

    #[test]
    fn test_octal_without_sticky_digit_keeps_sticky() {
        assert_eq!(apply("755", 0o1700, true), 0o1755);
    }

    #[test]
    fn test_symbolic_add_remove_set() {
        assert_eq!(apply("u+x", 0o644, false), 0o744);
        assert_eq!(apply("go-r", 0o644, false), 0o600);
        assert_eq!(apply("o=rw", 0o640, false), 0o646);
        assert!(ModeParser::new("u+x").unwrap().is_symbolic());
    }

    #[test]
    fn test_symbolic_without_class_means_all() {
        assert_eq!(apply("+x", 0o644, false), 0o755);
        assert_eq!(apply("a-w", 0o666, false), 0o444);
    }

    #[test]
    fn test_multiple_clauses() {
        assert_eq!(apply("u=rwx,g=rx,o-rwx", 0o007, false), 0o750);
        assert_eq!(apply("u+w, o-r", 0o444, false), 0o640);
    }

    #[test]
    fn test_capital_x() {
        assert_eq!(apply("a+X", 0o644, false), 0o644);
        assert_eq!(apply("a+X", 0o644, true), 0o755);
        assert_eq!(apply("a+X", 0o744, false), 0o755);
    }

    #[test]
    fn test_sticky() {
        assert_eq!(apply("+t", 0o777, true), 0o1777);
        assert_eq!(apply("o-t", 0o1777, true), 0o777);
        // sticky rides with the others class only
        assert_eq!(apply("u+t", 0o777, true), 0o777);
    }

    #[test]
    fn test_invalid() {
        for bad in ["", "888", "u+", "u+z", "u+x g-w", "rwx", "12345"] {
            assert!(ModeParser::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
