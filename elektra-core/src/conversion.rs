//! Hours of one block contributed by a unit of another.
//!
//! The table is directional: `convert(a, b)` and `convert(b, a)` generally
//! differ, and a pair missing from the table is an error rather than zero.
//! Each cell is a small [`Rule`] naming which facts about the flow date it
//! depends on, so cells can be read (and tested) one at a time.

use crate::calendar::{Calendar, is_weekend_day};
use crate::models::{Block, Map, PeakWindow};
use crate::ConfigurationError;
use time::{Date, PrimitiveDateTime};
use tracing::{Level, event};

/// Hourly inputs test the flow hour against this window for every market.
const HOURLY_WINDOW: PeakWindow = PeakWindow { first: 7, last: 22 };

/// A fact about the flow date that a cell can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayKind {
    /// Neither a weekend nor a NERC holiday
    Peak,
    /// A weekend or a NERC holiday
    Offpeak,
    /// A Saturday or Sunday, holidays aside
    Weekend,
}

impl DayKind {
    fn holds(self, calendar: &Calendar, date: Date) -> bool {
        match self {
            Self::Peak => calendar.is_peak_day(date),
            Self::Offpeak => calendar.is_offpeak_day(date),
            Self::Weekend => is_weekend_day(date),
        }
    }
}

/// The value a cell takes once its branch is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Factor {
    /// A fixed number of hours
    Hours(f64),
    /// A whole-day hour count, corrected for a DST transition on the flow date
    DstHours(f64),
    /// One hour if the flow date is a `day` and the flow hour is inside
    /// (or, with `in_window` false, outside) the hourly window; else zero
    Hour {
        /// The day the hour must fall on
        day: DayKind,
        /// Whether the hour must be inside the window
        in_window: bool,
    },
}

impl Factor {
    fn value(self, calendar: &Calendar, flow: PrimitiveDateTime) -> f64 {
        match self {
            Self::Hours(hours) => hours,
            Self::DstHours(hours) => calendar.adjust_dst(flow.date(), hours),
            Self::Hour { day, in_window } => {
                let matched = day.holds(calendar, flow.date())
                    && HOURLY_WINDOW.contains(flow.hour()) == in_window;
                if matched { 1.0 } else { 0.0 }
            }
        }
    }
}

/// One cell of the conversion table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    /// The same factor on every date
    Always(Factor),
    /// `then` on a `day`, `otherwise` on any other date
    When {
        /// The condition on the flow date
        day: DayKind,
        /// The factor when the condition holds
        then: Factor,
        /// The factor when it does not
        otherwise: Factor,
    },
}

impl Rule {
    /// Evaluates the cell for a flow date-hour
    pub fn apply(&self, calendar: &Calendar, flow: PrimitiveDateTime) -> f64 {
        match *self {
            Self::Always(factor) => factor.value(calendar, flow),
            Self::When {
                day,
                then,
                otherwise,
            } => {
                if day.holds(calendar, flow.date()) {
                    then.value(calendar, flow)
                } else {
                    otherwise.value(calendar, flow)
                }
            }
        }
    }
}

/// The directional block-to-block conversion table.
#[derive(Clone, Debug)]
pub struct ConversionMatrix {
    rules: Map<(Block, Block), Rule>,
}

impl Default for ConversionMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

impl ConversionMatrix {
    /// The standard table.
    ///
    /// Daily blocks treat a NERC holiday like a weekend: `2x16` inputs, the
    /// `2x16` and `Wrap` outputs, and `7x16 -> 5x16` all key on off-peak
    /// days. Hourly inputs split on the calendar weekend instead.
    pub fn standard() -> Self {
        use Block::*;
        use DayKind::*;
        use Factor::*;

        const ZERO: Rule = Rule::Always(Hours(0.0));
        const fn when(day: DayKind, then: Factor, otherwise: Factor) -> Rule {
            Rule::When {
                day,
                then,
                otherwise,
            }
        }
        let peak_16 = when(Peak, Hours(16.0), Hours(0.0));
        let offpeak_16 = when(Offpeak, Hours(16.0), Hours(0.0));

        let rules = [
            ((OnPeak, OnPeak), peak_16),
            ((OnPeak, Atc), peak_16),
            ((OnPeak, WeekendPeak), ZERO),
            ((OnPeak, OffPeak), ZERO),
            ((OnPeak, Wrap), ZERO),
            ((Wrap, Wrap), when(Peak, Hours(8.0), DstHours(24.0))),
            ((Wrap, Atc), when(Peak, Hours(8.0), DstHours(24.0))),
            ((Wrap, OnPeak), ZERO),
            ((Wrap, OffPeak), when(Peak, Hours(8.0), DstHours(8.0))),
            ((Wrap, WeekendPeak), offpeak_16),
            ((Atc, Atc), Rule::Always(DstHours(24.0))),
            ((Atc, OnPeak), peak_16),
            ((Atc, WeekendPeak), offpeak_16),
            ((Atc, OffPeak), when(Peak, Hours(8.0), DstHours(8.0))),
            ((Atc, Wrap), when(Offpeak, DstHours(24.0), Hours(8.0))),
            ((WeekendPeak, OnPeak), ZERO),
            ((WeekendPeak, OffPeak), ZERO),
            ((WeekendPeak, Wrap), offpeak_16),
            ((WeekendPeak, WeekendPeak), offpeak_16),
            ((WeekendPeak, Atc), offpeak_16),
            ((OffPeak, OnPeak), ZERO),
            ((OffPeak, WeekendPeak), ZERO),
            ((OffPeak, OffPeak), Rule::Always(DstHours(8.0))),
            ((OffPeak, Wrap), Rule::Always(DstHours(8.0))),
            ((Hourly, Atc), Rule::Always(Hours(1.0))),
            (
                (Hourly, OnPeak),
                Rule::Always(Hour {
                    day: Peak,
                    in_window: true,
                }),
            ),
            (
                (Hourly, WeekendPeak),
                Rule::Always(Hour {
                    day: Offpeak,
                    in_window: true,
                }),
            ),
            (
                (Hourly, Wrap),
                when(
                    Weekend,
                    Hour {
                        day: Offpeak,
                        in_window: true,
                    },
                    Hour {
                        day: Offpeak,
                        in_window: false,
                    },
                ),
            ),
            (
                (Hourly, OffPeak),
                Rule::Always(Hour {
                    day: Offpeak,
                    in_window: false,
                }),
            ),
            ((DailyPeak, OnPeak), peak_16),
            ((DailyPeak, WeekendPeak), offpeak_16),
            ((DailyPeak, Wrap), offpeak_16),
            ((DailyPeak, Atc), Rule::Always(Hours(16.0))),
            ((DailyPeak, OffPeak), ZERO),
        ];

        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// The cell for a pair, if the table has one
    pub fn rule(&self, input: Block, output: Block) -> Option<&Rule> {
        self.rules.get(&(input, output))
    }

    /// Every supported (input, output) pair, in table order
    pub fn pairs(&self) -> impl Iterator<Item = (Block, Block)> + '_ {
        self.rules.keys().copied()
    }

    /// The hours of `output` that one unit of `input` contributes at `flow`.
    ///
    /// Only hourly inputs look at the time of day; every other cell depends on
    /// the date alone.
    pub fn convert(
        &self,
        calendar: &Calendar,
        flow: PrimitiveDateTime,
        input: Block,
        output: Block,
    ) -> Result<f64, ConfigurationError> {
        let Some(rule) = self.rule(input, output) else {
            event!(Level::INFO, %input, %output, "conversion not supported");
            return Err(ConfigurationError::UnsupportedConversion { input, output });
        };

        let factor = rule.apply(calendar, flow);
        event!(Level::DEBUG, %flow, %input, %output, factor);
        Ok(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relevance::get_required_hours;
    use rstest::rstest;
    use time::macros::{date, datetime};
    use crate::models::Block::{Atc, DailyPeak, Hourly, OffPeak, OnPeak, WeekendPeak, Wrap};

    fn convert(flow: PrimitiveDateTime, input: Block, output: Block) -> f64 {
        ConversionMatrix::standard()
            .convert(&Calendar::default(), flow, input, output)
            .unwrap()
    }

    // Factors on 2020-10-16 12:00 (Friday), 2020-10-17 12:00 (Saturday),
    // 2023-12-25 12:00 (Christmas, a Monday) and 2022-11-06 0:00 (long day)
    const CELLS: [(Block, Block, [f64; 4]); 34] = [
        (OnPeak, OnPeak, [16.0, 0.0, 0.0, 0.0]),
        (OnPeak, Atc, [16.0, 0.0, 0.0, 0.0]),
        (OnPeak, WeekendPeak, [0.0, 0.0, 0.0, 0.0]),
        (OnPeak, OffPeak, [0.0, 0.0, 0.0, 0.0]),
        (OnPeak, Wrap, [0.0, 0.0, 0.0, 0.0]),
        (Wrap, Wrap, [8.0, 24.0, 24.0, 25.0]),
        (Wrap, Atc, [8.0, 24.0, 24.0, 25.0]),
        (Wrap, OnPeak, [0.0, 0.0, 0.0, 0.0]),
        (Wrap, OffPeak, [8.0, 8.0, 8.0, 9.0]),
        (Wrap, WeekendPeak, [0.0, 16.0, 16.0, 16.0]),
        (Atc, Atc, [24.0, 24.0, 24.0, 25.0]),
        (Atc, OnPeak, [16.0, 0.0, 0.0, 0.0]),
        (Atc, WeekendPeak, [0.0, 16.0, 16.0, 16.0]),
        (Atc, OffPeak, [8.0, 8.0, 8.0, 9.0]),
        (Atc, Wrap, [8.0, 24.0, 24.0, 25.0]),
        (WeekendPeak, OnPeak, [0.0, 0.0, 0.0, 0.0]),
        (WeekendPeak, OffPeak, [0.0, 0.0, 0.0, 0.0]),
        (WeekendPeak, Wrap, [0.0, 16.0, 16.0, 16.0]),
        (WeekendPeak, WeekendPeak, [0.0, 16.0, 16.0, 16.0]),
        (WeekendPeak, Atc, [0.0, 16.0, 16.0, 16.0]),
        (OffPeak, OnPeak, [0.0, 0.0, 0.0, 0.0]),
        (OffPeak, WeekendPeak, [0.0, 0.0, 0.0, 0.0]),
        (OffPeak, OffPeak, [8.0, 8.0, 8.0, 9.0]),
        (OffPeak, Wrap, [8.0, 8.0, 8.0, 9.0]),
        (Hourly, Atc, [1.0, 1.0, 1.0, 1.0]),
        (Hourly, OnPeak, [1.0, 0.0, 0.0, 0.0]),
        (Hourly, WeekendPeak, [0.0, 1.0, 1.0, 0.0]),
        (Hourly, Wrap, [0.0, 1.0, 0.0, 0.0]),
        (Hourly, OffPeak, [0.0, 0.0, 0.0, 1.0]),
        (DailyPeak, OnPeak, [16.0, 0.0, 0.0, 0.0]),
        (DailyPeak, WeekendPeak, [0.0, 16.0, 16.0, 16.0]),
        (DailyPeak, Wrap, [0.0, 16.0, 16.0, 16.0]),
        (DailyPeak, Atc, [16.0, 16.0, 16.0, 16.0]),
        (DailyPeak, OffPeak, [0.0, 0.0, 0.0, 0.0]),
    ];

    #[rstest]
    #[case::weekday(0, datetime!(2020-10-16 12:00))]
    #[case::weekend(1, datetime!(2020-10-17 12:00))]
    #[case::holiday(2, datetime!(2023-12-25 12:00))]
    #[case::long_day(3, datetime!(2022-11-06 0:00))]
    fn test_every_cell(#[case] column: usize, #[case] flow: PrimitiveDateTime) {
        let matrix = ConversionMatrix::standard();
        let calendar = Calendar::default();
        for (input, output, expected) in CELLS {
            let factor = matrix.convert(&calendar, flow, input, output).unwrap();
            assert_eq!(factor, expected[column], "{input} -> {output} at {flow}");
        }
    }

    #[test]
    fn test_cells_cover_the_table() {
        let matrix = ConversionMatrix::standard();
        assert_eq!(CELLS.len(), matrix.pairs().count());
        for (input, output) in matrix.pairs() {
            assert!(
                CELLS.iter().any(|&(i, o, _)| (i, o) == (input, output)),
                "{input} -> {output} has no cell"
            );
        }
    }

    #[test]
    fn test_holiday_counts_like_a_weekend() {
        let flow = datetime!(2023-12-25 0:00);
        let peak = convert(flow, Block::DailyPeak, Block::OnPeak);
        let offpeak = convert(flow, Block::DailyPeak, Block::WeekendPeak);
        assert_eq!(peak + offpeak, convert(flow, Block::DailyPeak, Block::Atc));
    }

    #[test]
    fn test_table_size() {
        assert_eq!(ConversionMatrix::standard().pairs().count(), 34);
    }

    #[rstest]
    // weekday
    #[case(datetime!(2020-10-16 0:00), Block::Atc, Block::OnPeak, 16.0)]
    #[case(datetime!(2020-10-16 0:00), Block::Atc, Block::WeekendPeak, 0.0)]
    #[case(datetime!(2020-10-16 0:00), Block::Atc, Block::Wrap, 8.0)]
    #[case(datetime!(2020-10-16 0:00), Block::Atc, Block::OffPeak, 8.0)]
    #[case(datetime!(2020-10-16 0:00), Block::Wrap, Block::OffPeak, 8.0)]
    #[case(datetime!(2020-10-16 0:00), Block::Wrap, Block::Atc, 8.0)]
    #[case(datetime!(2020-10-16 0:00), Block::OnPeak, Block::Atc, 16.0)]
    #[case(datetime!(2020-10-16 0:00), Block::DailyPeak, Block::OnPeak, 16.0)]
    #[case(datetime!(2020-10-16 0:00), Block::DailyPeak, Block::Atc, 16.0)]
    // weekend
    #[case(datetime!(2020-10-17 0:00), Block::Atc, Block::WeekendPeak, 16.0)]
    #[case(datetime!(2020-10-17 0:00), Block::Atc, Block::OnPeak, 0.0)]
    #[case(datetime!(2020-10-17 0:00), Block::OnPeak, Block::WeekendPeak, 0.0)]
    #[case(datetime!(2020-10-17 0:00), Block::Atc, Block::Wrap, 24.0)]
    #[case(datetime!(2020-10-17 0:00), Block::Wrap, Block::Wrap, 24.0)]
    #[case(datetime!(2020-10-17 0:00), Block::WeekendPeak, Block::Atc, 16.0)]
    #[case(datetime!(2020-10-17 0:00), Block::DailyPeak, Block::OffPeak, 0.0)]
    // Christmas 2023, a Monday
    #[case(datetime!(2023-12-25 0:00), Block::Atc, Block::WeekendPeak, 16.0)]
    #[case(datetime!(2023-12-25 0:00), Block::Atc, Block::OnPeak, 0.0)]
    #[case(datetime!(2023-12-25 0:00), Block::Atc, Block::Wrap, 24.0)]
    #[case(datetime!(2023-12-25 0:00), Block::DailyPeak, Block::WeekendPeak, 16.0)]
    #[case(datetime!(2023-12-25 0:00), Block::Wrap, Block::WeekendPeak, 16.0)]
    #[case(datetime!(2023-12-25 0:00), Block::DailyPeak, Block::OnPeak, 0.0)]
    #[case(datetime!(2023-12-25 0:00), Block::WeekendPeak, Block::Atc, 16.0)]
    fn test_daily_cells(
        #[case] flow: PrimitiveDateTime,
        #[case] input: Block,
        #[case] output: Block,
        #[case] expected: f64,
    ) {
        assert_eq!(convert(flow, input, output), expected);
    }

    #[rstest]
    #[case(datetime!(2022-03-13 0:00), Block::Atc, Block::Atc, 23.0)]
    #[case(datetime!(2022-11-06 0:00), Block::Atc, Block::Atc, 25.0)]
    #[case(datetime!(2022-11-06 0:00), Block::Wrap, Block::OffPeak, 9.0)]
    #[case(datetime!(2022-03-13 0:00), Block::OffPeak, Block::Wrap, 7.0)]
    #[case(datetime!(2022-03-13 0:00), Block::Atc, Block::Wrap, 23.0)]
    #[case(datetime!(2022-11-06 0:00), Block::DailyPeak, Block::Atc, 16.0)]
    fn test_dst_cells(
        #[case] flow: PrimitiveDateTime,
        #[case] input: Block,
        #[case] output: Block,
        #[case] expected: f64,
    ) {
        assert_eq!(convert(flow, input, output), expected);
    }

    #[rstest]
    #[case(datetime!(2020-10-16 12:00), [1.0, 1.0, 0.0, 0.0, 0.0])]
    #[case(datetime!(2020-10-16 3:00), [1.0, 0.0, 0.0, 0.0, 0.0])]
    #[case(datetime!(2020-10-17 12:00), [1.0, 0.0, 1.0, 1.0, 0.0])]
    #[case(datetime!(2020-10-17 3:00), [1.0, 0.0, 0.0, 0.0, 1.0])]
    #[case(datetime!(2023-12-25 3:00), [1.0, 0.0, 0.0, 1.0, 1.0])]
    #[case(datetime!(2023-12-25 12:00), [1.0, 0.0, 1.0, 0.0, 0.0])]
    fn test_hourly_cells(#[case] flow: PrimitiveDateTime, #[case] expected: [f64; 5]) {
        let outputs = [
            Block::Atc,
            Block::OnPeak,
            Block::WeekendPeak,
            Block::Wrap,
            Block::OffPeak,
        ];
        let actual = outputs.map(|output| convert(flow, Block::Hourly, output));
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case(Block::Atc, date!(2020 - 10 - 16))]
    #[case(Block::Atc, date!(2022 - 03 - 13))]
    #[case(Block::Atc, date!(2022 - 11 - 06))]
    #[case(Block::OffPeak, date!(2020 - 10 - 17))]
    #[case(Block::OffPeak, date!(2022 - 11 - 06))]
    #[case(Block::OnPeak, date!(2020 - 10 - 16))]
    fn test_same_block_is_full_block(#[case] block: Block, #[case] day: Date) {
        let calendar = Calendar::default();
        let flow = crate::calendar::first_hour_of_day(day);
        assert_eq!(
            ConversionMatrix::standard()
                .convert(&calendar, flow, block, block)
                .unwrap(),
            get_required_hours(&calendar, block, day).unwrap()
        );
    }

    #[rstest]
    #[case(Block::OffPeak, Block::Atc)]
    #[case(Block::OnPeak, Block::DailyPeak)]
    #[case(Block::Atc, Block::Hourly)]
    #[case(Block::Hourly, Block::Hourly)]
    #[case(Block::DailyPeak, Block::DailyPeak)]
    fn test_unsupported_pairs(#[case] input: Block, #[case] output: Block) {
        let err = ConversionMatrix::standard()
            .convert(&Calendar::default(), datetime!(2020-10-16 0:00), input, output)
            .unwrap_err();
        assert_eq!(err, ConfigurationError::UnsupportedConversion { input, output });
    }

    #[test]
    fn test_direction_matters() {
        let flow = datetime!(2020-10-17 0:00);
        assert_eq!(convert(flow, Block::WeekendPeak, Block::Atc), 16.0);
        assert_eq!(convert(flow, Block::Atc, Block::WeekendPeak), 16.0);
        assert_eq!(convert(flow, Block::Atc, Block::Wrap), 24.0);
        assert_eq!(convert(flow, Block::Wrap, Block::WeekendPeak), 16.0);
        assert_ne!(
            convert(datetime!(2020-10-16 0:00), Block::OnPeak, Block::Atc),
            convert(datetime!(2020-10-16 0:00), Block::Atc, Block::Wrap)
        );
    }
}
