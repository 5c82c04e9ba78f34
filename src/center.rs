use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Clinical site a record was collected at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Center {
    Cleveland,
    Hungarian,
    Switzerland,
    Va,
}

impl Center {
    pub const ALL: [Center; 4] = [
        Center::Cleveland,
        Center::Hungarian,
        Center::Switzerland,
        Center::Va,
    ];

    pub fn id(self) -> usize {
        match self {
            Center::Cleveland => 0,
            Center::Hungarian => 1,
            Center::Switzerland => 2,
            Center::Va => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Center::Cleveland => "cleveland",
            Center::Hungarian => "hungarian",
            Center::Switzerland => "switzerland",
            Center::Va => "va",
        }
    }

    /// Center of a raw file such as `processed.cleveland.data`, taken from the
    /// second dot-separated token of the name.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        file_name
            .split('.')
            .nth(1)
            .and_then(|token| token.parse().ok())
            .ok_or_else(|| Error::UnknownCenter(file_name.to_string()))
    }
}

impl TryFrom<usize> for Center {
    type Error = Error;

    fn try_from(id: usize) -> Result<Self> {
        Center::ALL
            .get(id)
            .copied()
            .ok_or(Error::InvalidCenter(id))
    }
}

impl FromStr for Center {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "cleveland" => Ok(Center::Cleveland),
            "hungarian" => Ok(Center::Hungarian),
            "switzerland" => Ok(Center::Switzerland),
            "va" => Ok(Center::Va),
            other => Err(Error::UnknownCenter(other.to_string())),
        }
    }
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
