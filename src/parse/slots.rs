use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::error::{Error, Result};

/// Sentinel the site puts on windows that cannot be booked. Any other
/// status value counts as open.
static BLOCKED: &str = "BLOCKED";

/// One available delivery window. The `Display` form, date key followed
/// by the time-window descriptor, is the slot's identifier everywhere
/// else in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    date_key: String,
    window: String,
}

impl Slot {
    fn from_html_element(element: ElementRef) -> Result<Self> {
        let date_key = element
            .attr("data-datekey")
            .ok_or(Error::MissingAttr("data-datekey"))?;
        let window = element
            .attr("data-info")
            .ok_or(Error::MissingAttr("data-info"))?;
        Ok(Self {
            date_key: tidy(date_key).into_owned(),
            window: tidy(window).into_owned(),
        })
    }
}

#[cfg(test)]
impl Slot {
    pub fn new(date_key: &str, window: &str) -> Self {
        Self {
            date_key: date_key.to_string(),
            window: window.to_string(),
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date_key, self.window)
    }
}

fn window_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR
        .get_or_init(|| Selector::parse("[data-deliverytitle]").expect("selector should be valid"))
}

/// A window is open iff it carries a status and that status is not the
/// blocked sentinel. No status attribute means not bookable.
fn is_open(element: ElementRef) -> bool {
    element
        .attr("data-status")
        .is_some_and(|status| status != BLOCKED)
}

/// Every open delivery window in the document, in document order. Blocked
/// windows are filtered out before their data attributes are looked at,
/// so only open windows can fail extraction.
pub fn available_slots(document: &Html) -> Result<Vec<Slot>> {
    document
        .select(window_selector())
        .filter(|element| is_open(*element))
        .map(Slot::from_html_element)
        .collect()
}

fn tidy(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s\s+").expect("regex should be valid"));
    re.replace_all(s.trim(), " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture(name: &str) -> Html {
        let html = fs::read_to_string(format!("./src/parse/html_examples/{name}")).unwrap();
        Html::parse_document(&html)
    }

    #[test]
    fn extracts_open_windows_in_document_order() {
        let document = fixture("preselect.html");
        let slots = available_slots(&document).expect("the example html should be valid");
        let ids: Vec<String> = slots.iter().map(ToString::to_string).collect();
        assert_eq!(
            ids,
            [
                "2024-01-01 9am-11am",
                "2024-01-01 1pm-3pm",
                "2024-01-02 9am - 11am",
            ]
        );
    }

    #[test]
    fn blocked_and_unmarked_windows_are_excluded() {
        let document = fixture("preselect.html");
        let slots = available_slots(&document).unwrap();
        assert!(slots
            .iter()
            .all(|slot| !slot.to_string().contains("11am-1pm")));
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn open_window_missing_its_date_key_is_an_error() {
        let document = fixture("malformed.html");
        let err = available_slots(&document).unwrap_err();
        assert_eq!(err, Error::MissingAttr("data-datekey"));
    }

    #[test]
    fn attribute_whitespace_is_normalized() {
        assert_eq!(tidy("  9am  -  11am "), "9am - 11am");
        assert_eq!(tidy("9am-11am"), "9am-11am");
    }
}
