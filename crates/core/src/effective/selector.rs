//! Picks the month a user should act on.

use crate::aggregation::MonthGroup;
use crate::billing::MonthKey;

/// The selected month and its group, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveMonth<'a> {
    /// Selected group. `None` when every month is settled.
    pub group: Option<&'a MonthGroup>,
    /// Month to present. Falls back to the nominal month.
    pub month_key: MonthKey,
}

/// Effective-month selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectiveMonthSelector;

impl EffectiveMonthSelector {
    /// Chooses the group to act on.
    ///
    /// The nominal month wins while unpaid. Otherwise the unpaid month closest
    /// to it is chosen, the earlier month winning ties. With no unpaid month
    /// the nominal key is returned without a group.
    #[must_use]
    pub fn resolve(groups: &[MonthGroup], nominal: MonthKey) -> EffectiveMonth<'_> {
        let unpaid = || groups.iter().filter(|g| !g.is_paid);

        if let Some(group) = unpaid().find(|g| g.month_key == nominal) {
            return EffectiveMonth {
                group: Some(group),
                month_key: nominal,
            };
        }

        match unpaid().min_by_key(|g| (g.month_key.distance(nominal), g.month_key)) {
            Some(group) => EffectiveMonth {
                group: Some(group),
                month_key: group.month_key,
            },
            None => EffectiveMonth {
                group: None,
                month_key: nominal,
            },
        }
    }
}
