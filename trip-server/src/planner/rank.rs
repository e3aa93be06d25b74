//! Ordering and ranking of itinerary lists.
//!
//! Every comparison goes through the parsed label values
//! ([`ItineraryOption::duration_minutes`], [`ItineraryOption::price_amount`])
//! so live and catalog data order by the same rule. All sorts are stable.

use crate::domain::{ItineraryOption, ModeId, SortPolicy, Vehicle};

/// Sort in place by the requested policy.
///
/// `Default` leaves the provider or catalog order untouched. `Cost` puts
/// options with an unknown price last.
pub fn sort_by_policy(options: &mut [ItineraryOption], policy: SortPolicy) {
    match policy {
        SortPolicy::Default => {}
        SortPolicy::Time => sort_by_time(options),
        SortPolicy::Cost => sort_by_cost(options),
    }
}

fn sort_by_time(options: &mut [ItineraryOption]) {
    options.sort_by_key(ItineraryOption::duration_minutes);
}

fn sort_by_cost(options: &mut [ItineraryOption]) {
    options.sort_by_key(|o| {
        let amount = o.price_amount();
        (amount.is_none(), amount)
    });
}

/// Apply an aggregator mode's view to its working set.
///
/// `city-bus` and `subway` keep only options that ride that vehicle. The
/// ranking modes sort by their key and label the options that carry no
/// label yet. The result is cut to `limit`. Other modes pass through.
pub fn aggregator_view(
    mode: ModeId,
    mut options: Vec<ItineraryOption>,
    limit: usize,
) -> Vec<ItineraryOption> {
    match mode {
        ModeId::CityBus => options.retain(|o| o.steps.uses(Vehicle::CityBus)),
        ModeId::Subway => options.retain(|o| o.steps.uses(Vehicle::Subway)),
        ModeId::TransitMinTime => {
            sort_by_time(&mut options);
            assign_rank_labels(&mut options, "최단시간");
        }
        ModeId::TransitMinCost => {
            sort_by_cost(&mut options);
            assign_rank_labels(&mut options, "최저비용");
        }
        _ => return options,
    }
    options.truncate(limit);
    options
}

/// Label positions "1위 - {best}", "2위", "3위", ... without overwriting
/// labels already present.
fn assign_rank_labels(options: &mut [ItineraryOption], best: &str) {
    for (idx, option) in options.iter_mut().enumerate() {
        if option.rank_label.is_some() {
            continue;
        }
        let label = match idx {
            0 => format!("1위 - {best}"),
            n => format!("{}위", n + 1),
        };
        option.rank_label = Some(label);
    }
}
