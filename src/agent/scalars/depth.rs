use std::ops::{Add, AddAssign, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A ply-representation of search depth.
pub struct Depth(i32);

impl From<u8> for Depth
{
    fn from(value: u8) -> Self
    {
        Depth::new(value as i32)
    }
}

impl From<Depth> for i32
{
    fn from(value: Depth) -> Self
    {
        value.0
    }
}

impl std::fmt::Display for Depth
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{}", self.0)
    }
}

impl Depth
{
    /// Zero plies.
    pub const NIL: Depth = Depth::new(0);

    /// One ply.
    pub const PLY: Depth = Depth::new(1);

    /// The max search depth is 64 plies, or 32 moves.
    pub const MAX: Depth = Depth::new(64);

    /// Clamps this depth to a valid ply count. If it was negative, clamps to 0.
    pub const fn clamped(&self) -> i32
    {
        if self.0 <= 0
        {
            0
        }
        else
        {
            self.0
        }
    }

    /// Constructs a new depth.
    pub const fn new(value: i32) -> Depth
    {
        Depth(value)
    }

    /// The number of plies in this depth.
    pub const fn plies(&self) -> i32
    {
        self.0
    }

    /// Iterates over the depths from one ply up to and including this one.
    pub fn deepening(self) -> impl Iterator<Item = Depth>
    {
        (1 ..= self.clamped()).map(Depth::new)
    }

    /// Whether or not this is a valid depth; that is, it is no larger than the maximum ply count.
    pub const fn valid(&self) -> bool
    {
        0 <= self.0 && self.0 <= Self::MAX.0
    }
}

impl Add<i32> for Depth
{
    type Output = Self;
    fn add(self, rhs: i32) -> Self::Output
    {
        Depth(self.0 + rhs)
    }
}

impl AddAssign<i32> for Depth
{
    fn add_assign(&mut self, rhs: i32)
    {
        *self = *self + rhs;
    }
}

impl Sub<i32> for Depth
{
    type Output = Self;
    fn sub(self, rhs: i32) -> Self::Output
    {
        Depth(self.0 - rhs)
    }
}

impl SubAssign<i32> for Depth
{
    fn sub_assign(&mut self, rhs: i32)
    {
        *self = *self - rhs;
    }
}
