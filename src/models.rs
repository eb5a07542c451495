use jiff::civil::Date;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Rating {
    LikeIt,
    LoveIt,
    GottaHaveIt,
}

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::LikeIt, Rating::LoveIt, Rating::GottaHaveIt];

    pub fn as_code(self) -> i32 {
        match self {
            Rating::LikeIt => 1,
            Rating::LoveIt => 2,
            Rating::GottaHaveIt => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Rating::LikeIt),
            2 => Some(Rating::LoveIt),
            3 => Some(Rating::GottaHaveIt),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::LikeIt => "Like it",
            Rating::LoveIt => "Love it",
            Rating::GottaHaveIt => "Gotta have it",
        }
    }
}

/// Validated content fields of a show, ready to be written to the store.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowFields {
    pub title: String,
    pub genre: String,
    pub premiere_date: Date,
    pub review: Rating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_codes_round_trip() {
        for rating in Rating::ALL {
            assert_eq!(Rating::from_code(rating.as_code()), Some(rating));
        }
    }

    #[test]
    fn rating_rejects_unknown_codes() {
        assert_eq!(Rating::from_code(0), None);
        assert_eq!(Rating::from_code(4), None);
        assert_eq!(Rating::from_code(-1), None);
    }
}
