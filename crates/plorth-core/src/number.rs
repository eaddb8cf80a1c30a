use std::fmt;

/// Either an integer or an IEEE-754 double, promoting to real on overflow or
/// when either operand of an arithmetic op is already real.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Real(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Real(r) => r,
        }
    }

    pub fn is_real(self) -> bool {
        matches!(self, Number::Real(_))
    }

    /// Truncates toward zero, per the real-to-integer coercion rule.
    pub fn to_int_truncating(self) -> i64 {
        match self {
            Number::Int(i) => i,
            Number::Real(r) => r.trunc() as i64,
        }
    }

    /// Parses a word-char run as a Plorth number literal. Integer literals
    /// contain no `.`, `e` or `E`; anything else (including `nan`, `inf`,
    /// `-inf`) parses as real.
    pub fn parse(text: &str) -> Option<Number> {
        if text.is_empty() {
            return None;
        }
        match text {
            "nan" => return Some(Number::Real(f64::NAN)),
            "inf" => return Some(Number::Real(f64::INFINITY)),
            "-inf" => return Some(Number::Real(f64::NEG_INFINITY)),
            _ => {}
        }
        let looks_real = text.contains('.') || text.contains('e') || text.contains('E');
        if looks_real {
            text.parse::<f64>().ok().map(Number::Real)
        } else {
            text.parse::<i64>().ok().map(Number::Int)
        }
    }

    pub fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(b)
                .map(Number::Int)
                .unwrap_or_else(|| Number::Real(a as f64 + b as f64)),
            _ => Number::Real(self.as_f64() + other.as_f64()),
        }
    }

    pub fn sub(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_sub(b)
                .map(Number::Int)
                .unwrap_or_else(|| Number::Real(a as f64 - b as f64)),
            _ => Number::Real(self.as_f64() - other.as_f64()),
        }
    }

    pub fn mul(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_mul(b)
                .map(Number::Int)
                .unwrap_or_else(|| Number::Real(a as f64 * b as f64)),
            _ => Number::Real(self.as_f64() * other.as_f64()),
        }
    }

    /// Division always promotes to real, matching the behavior of a
    /// dynamically typed stack language with no separate integer-divide word.
    pub fn div(self, other: Number) -> Number {
        Number::Real(self.as_f64() / other.as_f64())
    }

    pub fn rem(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) if b != 0 => Number::Int(a % b),
            _ => Number::Real(self.as_f64() % other.as_f64()),
        }
    }

    pub fn neg(self) -> Number {
        match self {
            Number::Int(i) => i
                .checked_neg()
                .map(Number::Int)
                .unwrap_or_else(|| Number::Real(-(i as f64))),
            Number::Real(r) => Number::Real(-r),
        }
    }

    pub fn abs(self) -> Number {
        match self {
            Number::Int(i) => i
                .checked_abs()
                .map(Number::Int)
                .unwrap_or_else(|| Number::Real((i as f64).abs())),
            Number::Real(r) => Number::Real(r.abs()),
        }
    }

    /// Structural equality: cross-type comparison promotes to real.
    pub fn equals(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }

    pub fn partial_cmp(self, other: Number) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Real(r) => write!(f, "{}", format_real(*r)),
        }
    }
}

/// `to_source` for a real: Rust's `f64` `Display` is already the shortest
/// round-trip decimal, so we only need to special-case nan/inf and guarantee
/// a decimal point on values that would otherwise print as integers.
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let rendered = format!("{value}");
    if rendered.contains('.') || rendered.contains('e') || rendered.contains('E') {
        rendered
    } else {
        format!("{rendered}.0")
    }
}
