//! Keeps track of what the user has selected, and what's been fetched for it.
//!
//! Changing the date means fetching again. Changing the terminal or direction
//! only changes which records are shown, so that's done over the records we
//! already have.

use paxc_types::{normalize, CongestionLevel, DateSelector, Direction, NormalizedRecord, RawRecord, Terminal};

use crate::errors::FetchError;
use crate::source::PassengerSource;

/// What the user is looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewSelection {
    pub date: DateSelector,
    pub terminal: Terminal,
    pub direction: Direction
}

impl ViewSelection {
    /// e.g. "Terminal 1 arrivals hall".
    pub fn label(&self) -> String {
        format!("{} {}", self.terminal.name(), self.direction.hall_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Loaded(Vec<NormalizedRecord>),
    /// Holds the message to show.
    Error(String)
}

/// Identifies one fetch. Only the result of the most recent fetch is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// One time slot, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotCard {
    /// Raw `HH_HH` slot.
    pub time_slot: String,
    pub count: i64,
    pub level: CongestionLevel
}

pub struct Controller<S> {
    source: S,
    selection: ViewSelection,
    state: ViewState,
    latest: u64
}

impl<S> Controller<S> where S: PassengerSource {
    pub fn new(source: S) -> Self {
        Self::with_selection(source, ViewSelection::default())
    }
    /// Starts out with something other than the default selection.
    pub fn with_selection(source: S, selection: ViewSelection) -> Self {
        Self {
            source,
            selection,
            state: ViewState::Idle,
            latest: 0
        }
    }
    pub fn selection(&self) -> ViewSelection {
        self.selection
    }
    pub fn state(&self) -> &ViewState {
        &self.state
    }
    /// Starts off the first fetch.
    pub fn mount(&mut self) {
        if self.state == ViewState::Idle {
            self.refresh();
        }
    }
    /// Enters `Loading`, handing out the token the result must come back with.
    pub fn begin_fetch(&mut self) -> RequestToken {
        self.latest += 1;
        self.state = ViewState::Loading;
        RequestToken(self.latest)
    }
    /// Applies a fetch result, unless a newer fetch has been started since.
    ///
    /// Returns whether the result was applied.
    pub fn complete_fetch(&mut self, token: RequestToken, result: Result<Vec<RawRecord>, FetchError>) -> bool {
        if token.0 != self.latest {
            return false;
        }
        self.state = match result {
            Ok(raw) => ViewState::Loaded(raw.iter().map(normalize).collect()),
            Err(e) => ViewState::Error(e.user_message())
        };
        true
    }
    /// Fetches the selected date again.
    pub fn refresh(&mut self) {
        let token = self.begin_fetch();
        let result = self.source.fetch(self.selection.date);
        self.complete_fetch(token, result);
    }
    pub fn set_date(&mut self, date: DateSelector) {
        if date != self.selection.date {
            self.selection.date = date;
            self.refresh();
        }
    }
    pub fn set_terminal(&mut self, terminal: Terminal) {
        self.selection.terminal = terminal;
    }
    pub fn set_direction(&mut self, direction: Direction) {
        self.selection.direction = direction;
    }
    /// Loaded records with a nonzero total for the selected terminal and
    /// direction, in time order.
    pub fn visible(&self) -> Vec<&NormalizedRecord> {
        let recs = match self.state {
            ViewState::Loaded(ref r) => r,
            _ => return vec![]
        };
        let (t, d) = (self.selection.terminal, self.selection.direction);
        let mut ret: Vec<&NormalizedRecord> = recs.iter()
            .filter(|r| r.sum_for(t, d) > 0)
            .collect();
        ret.sort_by(|a, b| (&a.date, &a.time_slot).cmp(&(&b.date, &b.time_slot)));
        ret
    }
    pub fn cards(&self) -> Vec<SlotCard> {
        let (t, d) = (self.selection.terminal, self.selection.direction);
        self.visible()
            .into_iter()
            .map(|r| {
                let count = r.sum_for(t, d);
                SlotCard {
                    time_slot: r.time_slot.clone(),
                    count,
                    level: CongestionLevel::from_count(count)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Hands out canned results per date, and remembers what was asked for.
    struct FakeSource {
        today: Result<Vec<RawRecord>, FetchError>,
        tomorrow: Result<Vec<RawRecord>, FetchError>,
        calls: Rc<RefCell<Vec<DateSelector>>>
    }
    impl PassengerSource for FakeSource {
        fn fetch(&mut self, date: DateSelector) -> Result<Vec<RawRecord>, FetchError> {
            self.calls.borrow_mut().push(date);
            match date {
                DateSelector::Today => self.today.clone(),
                DateSelector::Tomorrow => self.tomorrow.clone()
            }
        }
    }

    fn rec(atime: &str, t1eg: &str, t2dg: &str) -> RawRecord {
        RawRecord {
            adate: "20240101".into(),
            atime: atime.into(),
            t1eg1: Some("100".into()),
            t1eg2: Some("".into()),
            t1egsum1: Some(t1eg.into()),
            t2dgsum2: Some(t2dg.into()),
            ..Default::default()
        }
    }

    fn controller(today: Result<Vec<RawRecord>, FetchError>, tomorrow: Result<Vec<RawRecord>, FetchError>)
        -> (Controller<FakeSource>, Rc<RefCell<Vec<DateSelector>>>) {
        let calls = Rc::new(RefCell::new(vec![]));
        let src = FakeSource { today, tomorrow, calls: calls.clone() };
        (Controller::new(src), calls)
    }

    #[test]
    fn starts_idle_then_loads_on_mount() {
        let (mut c, calls) = controller(Ok(vec![rec("08_09", "150", "0")]), Ok(vec![]));
        assert_eq!(c.state(), &ViewState::Idle);
        assert_eq!(c.selection(), ViewSelection {
            date: DateSelector::Today,
            terminal: Terminal::T1,
            direction: Direction::Entry
        });
        c.mount();
        assert_eq!(*calls.borrow(), vec![DateSelector::Today]);
        match c.state() {
            ViewState::Loaded(r) => assert_eq!(r.len(), 1),
            x => panic!("unexpected state {:?}", x)
        }
        let cards = c.cards();
        assert_eq!(cards, vec![SlotCard {
            time_slot: "08_09".into(),
            count: 150,
            level: CongestionLevel::Low
        }]);
        assert_eq!(c.visible()[0].t1.entry.eg1, 100);
        assert_eq!(c.visible()[0].t1.entry.eg2, 0);
    }

    #[test]
    fn filters_on_positive_sum_without_refetching() {
        let recs = vec![
            rec("10_11", "0", "1600"),
            rec("08_09", "700", "0"),
            rec("09_10", "300", "20"),
        ];
        let (mut c, calls) = controller(Ok(recs), Ok(vec![]));
        c.mount();
        let slots: Vec<String> = c.cards().into_iter().map(|x| x.time_slot).collect();
        assert_eq!(slots, vec!["08_09", "09_10"]);

        c.set_terminal(Terminal::T2);
        c.set_direction(Direction::Departure);
        let cards = c.cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].time_slot, "09_10");
        assert_eq!(cards[1].level, CongestionLevel::High);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn date_change_refetches() {
        let (mut c, calls) = controller(Ok(vec![rec("08_09", "150", "0")]), Ok(vec![rec("08_09", "900", "0")]));
        c.mount();
        c.set_date(DateSelector::Tomorrow);
        c.set_date(DateSelector::Tomorrow);
        assert_eq!(*calls.borrow(), vec![DateSelector::Today, DateSelector::Tomorrow]);
        assert_eq!(c.cards()[0].level, CongestionLevel::Medium);
    }

    #[test]
    fn errors_carry_user_message() {
        let err = FetchError::Api {
            code: "30".into(),
            message: "The service key is not registered.".into()
        };
        let (mut c, _) = controller(Err(err), Err(FetchError::Network));
        c.mount();
        assert_eq!(c.state(), &ViewState::Error("The service key is not registered.".into()));
        assert!(c.cards().is_empty());
        c.set_date(DateSelector::Tomorrow);
        match c.state() {
            ViewState::Error(m) => assert!(m.starts_with("Network connection failed")),
            x => panic!("unexpected state {:?}", x)
        }
    }

    #[test]
    fn stale_results_are_dropped() {
        let (mut c, _) = controller(Ok(vec![]), Ok(vec![]));
        let first = c.begin_fetch();
        let second = c.begin_fetch();
        assert!(second > first);
        assert!(!c.complete_fetch(first, Ok(vec![rec("08_09", "150", "0")])));
        assert_eq!(c.state(), &ViewState::Loading);
        assert!(c.complete_fetch(second, Ok(vec![rec("09_10", "2000", "0")])));
        assert_eq!(c.cards()[0].time_slot, "09_10");
        assert!(!c.complete_fetch(first, Err(FetchError::Network)));
        assert_eq!(c.cards().len(), 1);
    }

    #[test]
    fn initial_selection_is_fetched_on_mount() {
        let (c, calls) = controller(Ok(vec![]), Ok(vec![rec("08_09", "150", "0")]));
        let sel = ViewSelection { date: DateSelector::Tomorrow, ..Default::default() };
        let mut c = Controller::with_selection(c.source, sel);
        c.mount();
        c.mount();
        assert_eq!(*calls.borrow(), vec![DateSelector::Tomorrow]);
        assert_eq!(c.cards().len(), 1);
    }

    #[test]
    fn selection_label() {
        let sel = ViewSelection {
            terminal: Terminal::T2,
            direction: Direction::Departure,
            ..Default::default()
        };
        assert_eq!(sel.label(), "Terminal 2 departures hall");
    }
}
