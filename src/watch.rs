use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client;
use scraper::Html;
use tokio::time::sleep;

use crate::parse::{self, Slot};
use crate::{fetch, notify};

pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// The known-slots set for one tick, keyed by slot identifier.
#[must_use]
pub fn known_set(slots: &[Slot]) -> HashSet<String> {
    slots.iter().map(ToString::to_string).collect()
}

/// Slots in `current` whose identifier is absent from the previous tick's
/// known set. Order follows `current`; a duplicated identifier is
/// reported once.
#[must_use]
pub fn new_slots<'a>(previous: &HashSet<String>, current: &'a [Slot]) -> Vec<&'a Slot> {
    let mut seen = HashSet::new();
    current
        .iter()
        .filter(|slot| {
            let id = slot.to_string();
            !previous.contains(&id) && seen.insert(id)
        })
        .collect()
}

async fn poll(client: &Client, postal_code: &str) -> crate::Result<Vec<Slot>> {
    let page = fetch::slots_page(client, postal_code).await?;
    let document = Html::parse_document(&page);
    Ok(parse::available_slots(&document)?)
}

/// Fetch, diff, notify, sleep, forever. The known-slots set lives in this
/// loop and nowhere else. A failed tick keeps the previous baseline, so a
/// transient outage does not re-report every slot as new once the site
/// comes back.
pub async fn run(client: &Client, postal_code: &str, phone: &str) {
    let mut known: HashSet<String> = HashSet::new();
    loop {
        match poll(client, postal_code).await {
            Ok(slots) => {
                let fresh = new_slots(&known, &slots);
                known = known_set(&slots);
                println!("Found {} new slots, {} total slots", fresh.len(), known.len());
                if !fresh.is_empty() {
                    let listing = fresh
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("New slots: {listing}");
                    let message = format!("Check out these new slots: {listing}");
                    if let Err(e) = notify::send_sms(client, phone, &message).await {
                        log::warn!("Error sending SMS: {e}");
                    }
                }
            }
            Err(e) => log::warn!("Error getting slots: {e}"),
        }
        sleep(POLL_INTERVAL).await;
    }
}
