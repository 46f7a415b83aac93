use std::fmt;

/// Exact monetary value in minor currency units (cents), stored as an integer.
///
/// All machine accounting happens in minor units so repeated insert, dispense
/// and change cycles can never accumulate rounding drift. Rendering as a
/// two-decimal major-unit string is a display concern only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    /// Minor units per major unit (cents per dollar).
    const SCALE: i64 = 100;

    pub const ZERO: Amount = Amount(0);

    pub const fn from_minor(value: i64) -> Self {
        Amount(value)
    }

    /// The raw minor-unit count.
    pub const fn minor(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / Self::SCALE;
        let frac = abs % Self::SCALE;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::ops::Mul<u32> for Amount {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Amount(self.0 * rhs as i64)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}
