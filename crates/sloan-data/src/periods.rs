//! Calendar reference data: NBER recession windows and decade buckets.
//!
//! Both partitions operate on first-of-month dates. Recession windows and
//! decade windows are independent of each other; a month falls into one
//! decade bucket and one recession/expansion bucket.

use chrono::NaiveDate;

/// A named calendar interval, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodWindow {
    /// Human-readable label for the window.
    pub name: &'static str,

    /// First month of the window.
    pub start: NaiveDate,

    /// Last month of the window.
    pub end: NaiveDate,
}

impl PeriodWindow {
    fn new(name: &'static str, start: (i32, u32, u32), end: (i32, u32, u32)) -> Self {
        Self {
            name,
            start: ymd(start),
            end: ymd(end),
        }
    }

    /// Whether `date` falls inside the window. Bounds are inclusive: a
    /// month equal to the stated end of a recession is a recession month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid literal date")
}

/// The nine NBER recessions overlapping the post-1960 sample.
pub fn nber_recessions() -> Vec<PeriodWindow> {
    vec![
        PeriodWindow::new("1960-61", (1960, 4, 1), (1961, 2, 1)),
        PeriodWindow::new("1969-70", (1969, 12, 1), (1970, 11, 1)),
        PeriodWindow::new("1973-75", (1973, 11, 1), (1975, 3, 1)),
        PeriodWindow::new("1980", (1980, 1, 1), (1980, 7, 1)),
        PeriodWindow::new("1981-82", (1981, 7, 1), (1982, 11, 1)),
        PeriodWindow::new("1990-91", (1990, 7, 1), (1991, 3, 1)),
        PeriodWindow::new("2001", (2001, 3, 1), (2001, 11, 1)),
        PeriodWindow::new("2007-09", (2007, 12, 1), (2009, 6, 1)),
        PeriodWindow::new("2020", (2020, 2, 1), (2020, 4, 1)),
    ]
}

/// Whether `date` falls inside any NBER recession window.
pub fn is_recession(date: NaiveDate) -> bool {
    nber_recessions().iter().any(|w| w.contains(date))
}

/// First month of the sub-period analysis sample.
pub fn subperiod_start() -> NaiveDate {
    ymd((1960, 1, 1))
}

/// Decade buckets used for the sub-period breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decade {
    /// 1960-01 through 1969-12.
    Sixties,
    /// 1970-01 through 1979-12.
    Seventies,
    /// 1980-01 through 1989-12.
    Eighties,
    /// 1990-01 through 1999-12.
    Nineties,
    /// 2000-01 through 2009-12.
    Aughts,
    /// 2010-01 through 2019-12.
    Tens,
}

impl Decade {
    /// All decade buckets in chronological order.
    pub const ALL: [Self; 6] = [
        Self::Sixties,
        Self::Seventies,
        Self::Eighties,
        Self::Nineties,
        Self::Aughts,
        Self::Tens,
    ];

    /// Display label, e.g. `"1960s"`.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sixties => "1960s",
            Self::Seventies => "1970s",
            Self::Eighties => "1980s",
            Self::Nineties => "1990s",
            Self::Aughts => "2000s",
            Self::Tens => "2010s",
        }
    }

    const fn first_year(&self) -> i32 {
        match self {
            Self::Sixties => 1960,
            Self::Seventies => 1970,
            Self::Eighties => 1980,
            Self::Nineties => 1990,
            Self::Aughts => 2000,
            Self::Tens => 2010,
        }
    }

    /// Inclusive calendar window covered by the decade.
    pub fn window(&self) -> PeriodWindow {
        let y = self.first_year();
        PeriodWindow {
            name: self.label(),
            start: ymd((y, 1, 1)),
            end: ymd((y + 9, 12, 31)),
        }
    }
}
