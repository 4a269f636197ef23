use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::fetch::{Pacer, Pause, Transport};
use crate::parser::parse_listing;
use crate::recipe::CategoryToken;
use crate::site::Site;

pub const DEFAULT_TARGET: usize = 60;

/// Page through a category's listing until `target` unique ids are seen.
///
/// Best effort: a failed page ends enumeration and whatever was collected is
/// returned. A page without item links ends it too (end of the listing and a
/// broken selector look the same).
pub async fn collect_identifiers<T: Transport, P: Pacer>(
    transport: &T,
    pacer: &P,
    site: &Site,
    token: &CategoryToken,
    target: usize,
) -> IndexSet<String> {
    let mut ids = IndexSet::new();
    let mut page = 1u32;

    while ids.len() < target {
        let url = site.listing_url(token, page);
        let html = match transport.get(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Listing page request failed (cat4={}, page={}): {}", token, page, e);
                break;
            }
        };

        let listing = parse_listing(&html);
        if listing.links == 0 {
            debug!("No links on page {} for cat4={}, stopping", page, token);
            break;
        }

        for id in listing.ids {
            ids.insert(id);
            if ids.len() >= target {
                break;
            }
        }
        debug!("cat4={} page {}: {} ids so far", token, page, ids.len());

        if ids.len() >= target {
            break;
        }
        page += 1;
        pacer.pause(Pause::Listing).await;
    }

    info!("cat4={}: collected {} ids", token, ids.len());
    ids
}
