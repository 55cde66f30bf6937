use bdays::easter::easter_naive_date;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolidayError {
    UnsupportedRegion(String),
    Computation(String),
}

impl fmt::Display for HolidayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayError::UnsupportedRegion(region) => {
                write!(f, "unsupported holiday region '{region}'")
            }
            HolidayError::Computation(msg) => write!(f, "holiday computation failed: {msg}"),
        }
    }
}

impl std::error::Error for HolidayError {}

/// Public holidays keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    holidays: HashMap<NaiveDate, String>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, name: impl Into<String>) {
        self.holidays.insert(date, name.into());
    }

    pub fn name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Holidays in ascending date order.
    pub fn sorted(&self) -> Vec<(NaiveDate, &str)> {
        let mut entries: Vec<(NaiveDate, &str)> = self
            .holidays
            .iter()
            .map(|(date, name)| (*date, name.as_str()))
            .collect();
        entries.sort_by_key(|(date, _)| *date);
        entries
    }
}

impl<S: Into<String>> FromIterator<(NaiveDate, S)> for HolidaySet {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, S)>>(iter: T) -> Self {
        let mut set = HolidaySet::new();
        for (date, name) in iter {
            set.insert(date, name);
        }
        set
    }
}

/// Source of public holidays for a region.
pub trait HolidayProvider {
    /// Every holiday of `region` falling into one of `years`.
    fn holidays_for(&self, region: &str, years: &BTreeSet<i32>) -> Result<HolidaySet, HolidayError>;
}

/// The same holiday set for every region and year. Handy for custom
/// calendars and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedHolidays {
    holidays: HolidaySet,
}

impl FixedHolidays {
    pub fn new(holidays: HolidaySet) -> Self {
        Self { holidays }
    }
}

impl HolidayProvider for FixedHolidays {
    fn holidays_for(&self, _region: &str, _years: &BTreeSet<i32>) -> Result<HolidaySet, HolidayError> {
        Ok(self.holidays.clone())
    }
}

/// German federal states by their ISO 3166-2 suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GermanState {
    BadenWuerttemberg,
    Bavaria,
    Berlin,
    Brandenburg,
    Bremen,
    Hamburg,
    Hesse,
    MecklenburgVorpommern,
    LowerSaxony,
    NorthRhineWestphalia,
    RhinelandPalatinate,
    Saarland,
    Saxony,
    SaxonyAnhalt,
    SchleswigHolstein,
    Thuringia,
}

impl GermanState {
    pub const ALL: [GermanState; 16] = [
        GermanState::BadenWuerttemberg,
        GermanState::Bavaria,
        GermanState::Berlin,
        GermanState::Brandenburg,
        GermanState::Bremen,
        GermanState::Hamburg,
        GermanState::Hesse,
        GermanState::MecklenburgVorpommern,
        GermanState::LowerSaxony,
        GermanState::NorthRhineWestphalia,
        GermanState::RhinelandPalatinate,
        GermanState::Saarland,
        GermanState::Saxony,
        GermanState::SaxonyAnhalt,
        GermanState::SchleswigHolstein,
        GermanState::Thuringia,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            GermanState::BadenWuerttemberg => "BW",
            GermanState::Bavaria => "BY",
            GermanState::Berlin => "BE",
            GermanState::Brandenburg => "BB",
            GermanState::Bremen => "HB",
            GermanState::Hamburg => "HH",
            GermanState::Hesse => "HE",
            GermanState::MecklenburgVorpommern => "MV",
            GermanState::LowerSaxony => "NI",
            GermanState::NorthRhineWestphalia => "NW",
            GermanState::RhinelandPalatinate => "RP",
            GermanState::Saarland => "SL",
            GermanState::Saxony => "SN",
            GermanState::SaxonyAnhalt => "ST",
            GermanState::SchleswigHolstein => "SH",
            GermanState::Thuringia => "TH",
        }
    }
}

/// `DE` for the national calendar, otherwise a federal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GermanRegion {
    National,
    State(GermanState),
}

impl FromStr for GermanRegion {
    type Err = HolidayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        let code = code.strip_prefix("DE-").unwrap_or(&code);
        if code == "DE" {
            return Ok(GermanRegion::National);
        }
        GermanState::ALL
            .iter()
            .find(|state| state.code() == code)
            .map(|state| GermanRegion::State(*state))
            .ok_or_else(|| HolidayError::UnsupportedRegion(s.to_string()))
    }
}

impl GermanRegion {
    fn is_any(&self, states: &[GermanState]) -> bool {
        match self {
            GermanRegion::National => false,
            GermanRegion::State(state) => states.contains(state),
        }
    }
}

/// German public holidays, nationwide plus the holidays of each federal
/// state. Names are the official German ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct GermanHolidays;

impl GermanHolidays {
    pub fn for_year(region: GermanRegion, year: i32) -> Result<HolidaySet, HolidayError> {
        use GermanState::*;

        let mut set = HolidaySet::new();
        let easter = easter_naive_date(year)
            .map_err(|err| HolidayError::Computation(format!("easter date for {year}: {err:?}")))?;
        let after_easter = |days: i64| easter + Duration::days(days);

        set.insert(ymd(year, 1, 1)?, "Neujahr");
        set.insert(after_easter(-2), "Karfreitag");
        set.insert(after_easter(1), "Ostermontag");
        set.insert(ymd(year, 5, 1)?, "Erster Mai");
        set.insert(after_easter(39), "Christi Himmelfahrt");
        set.insert(after_easter(50), "Pfingstmontag");
        if year >= 1990 {
            set.insert(ymd(year, 10, 3)?, "Tag der Deutschen Einheit");
        }
        set.insert(ymd(year, 12, 25)?, "Erster Weihnachtstag");
        set.insert(ymd(year, 12, 26)?, "Zweiter Weihnachtstag");

        if region.is_any(&[BadenWuerttemberg, Bavaria, SaxonyAnhalt]) {
            set.insert(ymd(year, 1, 6)?, "Heilige Drei Könige");
        }
        if (region.is_any(&[Berlin]) && year >= 2019)
            || (region.is_any(&[MecklenburgVorpommern]) && year >= 2023)
        {
            set.insert(ymd(year, 3, 8)?, "Internationaler Frauentag");
        }
        if region.is_any(&[Brandenburg]) {
            set.insert(easter, "Ostersonntag");
            set.insert(after_easter(49), "Pfingstsonntag");
        }
        if region.is_any(&[
            BadenWuerttemberg,
            Bavaria,
            Hesse,
            NorthRhineWestphalia,
            RhinelandPalatinate,
            Saarland,
        ]) {
            set.insert(after_easter(60), "Fronleichnam");
        }
        if region.is_any(&[Saarland]) {
            set.insert(ymd(year, 8, 15)?, "Mariä Himmelfahrt");
        }
        if region.is_any(&[Thuringia]) && year >= 2019 {
            set.insert(ymd(year, 9, 20)?, "Weltkindertag");
        }
        let reformation_day = year == 2017
            || region.is_any(&[Brandenburg, MecklenburgVorpommern, Saxony, SaxonyAnhalt, Thuringia])
            || (region.is_any(&[Bremen, Hamburg, LowerSaxony, SchleswigHolstein]) && year >= 2018);
        if reformation_day {
            set.insert(ymd(year, 10, 31)?, "Reformationstag");
        }
        if region.is_any(&[
            BadenWuerttemberg,
            Bavaria,
            NorthRhineWestphalia,
            RhinelandPalatinate,
            Saarland,
        ]) {
            set.insert(ymd(year, 11, 1)?, "Allerheiligen");
        }
        if region.is_any(&[Saxony]) {
            set.insert(repentance_day(year)?, "Buß- und Bettag");
        }

        Ok(set)
    }
}

impl HolidayProvider for GermanHolidays {
    fn holidays_for(&self, region: &str, years: &BTreeSet<i32>) -> Result<HolidaySet, HolidayError> {
        let region: GermanRegion = region.parse()?;
        let mut holidays = HolidaySet::new();
        for &year in years {
            for (date, name) in Self::for_year(region, year)?.holidays {
                holidays.insert(date, name);
            }
        }
        tracing::debug!(?region, ?years, count = holidays.len(), "loaded public holidays");
        Ok(holidays)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, HolidayError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| HolidayError::Computation(format!("no date {year}-{month:02}-{day:02}")))
}

/// Buß- und Bettag: the last Wednesday before November 23rd.
fn repentance_day(year: i32) -> Result<NaiveDate, HolidayError> {
    let mut date = ymd(year, 11, 22)?;
    while date.weekday() != Weekday::Wed {
        date = date - Duration::days(1);
    }
    Ok(date)
}
