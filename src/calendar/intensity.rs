//! Count to intensity mapping

use serde::Serialize;

use crate::types::{CalendarKind, DayKind, DayRecord};

/// Highest bucket; means "4 or more"
pub const MAX_BUCKET: u8 = 4;

/// Discrete intensity level (0..=4) for a raw count
pub fn bucket(count: u32) -> u8 {
    count.min(u32::from(MAX_BUCKET)) as u8
}

/// Alpha for a bucket: 0.6 + bucket * 0.1
pub fn opacity(bucket: u8) -> f64 {
    f64::from(6 + bucket.min(MAX_BUCKET)) / 10.0
}

/// Color channel a day is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Post,
    Life,
}

/// How a cell is painted
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "fill", rename_all = "lowercase")]
pub enum CellFill {
    /// Flat "no activity" background
    Background,
    /// One category color at `opacity`
    Solid {
        channel: Channel,
        bucket: u8,
        opacity: f64,
    },
    /// Both category colors, combined view only
    Blend { bucket: u8, opacity: f64 },
}

impl CellFill {
    pub fn bucket(self) -> u8 {
        match self {
            Self::Background => 0,
            Self::Solid { bucket, .. } | Self::Blend { bucket, .. } => bucket,
        }
    }
}

/// Fill for a day with `count` items of `day_kind` under the `view` filter.
///
/// Zero counts are always the flat background. Outside the combined view
/// the filter decides the channel; inside it the day's own kind does.
pub fn fill_for(count: u32, day_kind: DayKind, view: CalendarKind) -> CellFill {
    if count == 0 {
        return CellFill::Background;
    }
    let bucket = bucket(count);
    let opacity = opacity(bucket);
    let channel = match (view, day_kind) {
        (CalendarKind::Post, _) => Channel::Post,
        (CalendarKind::Life, _) => Channel::Life,
        (CalendarKind::All, DayKind::Both) => return CellFill::Blend { bucket, opacity },
        (CalendarKind::All, DayKind::Life) => Channel::Life,
        (CalendarKind::All, DayKind::Post | DayKind::Unknown) => Channel::Post,
    };
    CellFill::Solid {
        channel,
        bucket,
        opacity,
    }
}

/// Fill for an optional record (absent = no activity)
pub fn cell_fill(record: Option<&DayRecord>, view: CalendarKind) -> CellFill {
    match record {
        Some(record) => fill_for(record.count, record.kind, view),
        None => CellFill::Background,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_caps_at_four() {
        assert_eq!(bucket(0), 0);
        assert_eq!(bucket(1), 1);
        assert_eq!(bucket(3), 3);
        assert_eq!(bucket(4), 4);
        assert_eq!(bucket(5), 4);
        assert_eq!(bucket(u32::MAX), 4);
    }

    #[test]
    fn test_bucket_monotonic() {
        let mut prev = 0;
        for count in 0..100 {
            let b = bucket(count);
            assert!(b >= prev);
            assert_eq!(u32::from(b), count.min(4));
            prev = b;
        }
    }

    #[test]
    fn test_opacity_values() {
        assert_eq!(opacity(1), 0.7);
        assert_eq!(opacity(3), 0.9);
        assert_eq!(opacity(4), 1.0);
        assert_eq!(opacity(200), 1.0);
    }

    #[test]
    fn test_zero_count_is_background_for_every_kind() {
        for view in [CalendarKind::Post, CalendarKind::Life, CalendarKind::All] {
            for kind in [DayKind::Post, DayKind::Life, DayKind::Both, DayKind::Unknown] {
                assert_eq!(fill_for(0, kind, view), CellFill::Background);
            }
        }
    }

    #[test]
    fn test_single_view_uses_view_channel() {
        assert_eq!(
            fill_for(3, DayKind::Both, CalendarKind::Post),
            CellFill::Solid {
                channel: Channel::Post,
                bucket: 3,
                opacity: 0.9
            }
        );
        assert_eq!(
            fill_for(1, DayKind::Post, CalendarKind::Life),
            CellFill::Solid {
                channel: Channel::Life,
                bucket: 1,
                opacity: 0.7
            }
        );
    }

    #[test]
    fn test_combined_view_blends_both() {
        assert_eq!(
            fill_for(6, DayKind::Both, CalendarKind::All),
            CellFill::Blend {
                bucket: 4,
                opacity: 1.0
            }
        );
    }

    #[test]
    fn test_combined_view_follows_day_kind() {
        let life = fill_for(2, DayKind::Life, CalendarKind::All);
        assert!(matches!(
            life,
            CellFill::Solid {
                channel: Channel::Life,
                ..
            }
        ));
        let unknown = fill_for(2, DayKind::Unknown, CalendarKind::All);
        assert!(matches!(
            unknown,
            CellFill::Solid {
                channel: Channel::Post,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_record_is_background() {
        assert_eq!(cell_fill(None, CalendarKind::All), CellFill::Background);
    }

    #[test]
    fn test_fill_bucket_accessor() {
        assert_eq!(CellFill::Background.bucket(), 0);
        assert_eq!(fill_for(9, DayKind::Both, CalendarKind::All).bucket(), 4);
    }
}
