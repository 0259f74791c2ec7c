use ahash::RandomState;
use std::collections::HashMap;

use crate::model::{Fighter, FighterView, RawFighter};

/// Turn the raw upstream feed into the directory's fighter list.
///
/// Defaults are filled in, fighters with no recorded bouts are dropped, and
/// rows sharing a full name are collapsed when their (wins, losses, draws,
/// nickname) match. Rows that still share a name afterwards are genuinely
/// different people and all come back with `is_duplicate` set. Feed order is
/// preserved.
#[must_use]
pub fn reconcile(raw: Vec<RawFighter>) -> Vec<FighterView> {
    let fighters: Vec<Fighter> = raw
        .into_iter()
        .map(Fighter::from)
        .filter(|f| f.total_fights() > 0)
        .collect();

    let mut groups: HashMap<String, Vec<usize>, RandomState> = HashMap::default();
    let mut kept: Vec<usize> = Vec::with_capacity(fighters.len());

    for (idx, fighter) in fighters.iter().enumerate() {
        let members = groups.entry(fighter.full_name()).or_default();
        let same_person = members
            .iter()
            .any(|&other| same_record(&fighters[other], fighter));
        if !same_person {
            members.push(idx);
            kept.push(idx);
        }
    }

    let mut duplicate = vec![false; fighters.len()];
    for members in groups.values().filter(|m| m.len() > 1) {
        for &idx in members {
            duplicate[idx] = true;
        }
    }

    let mut slots: Vec<Option<Fighter>> = fighters.into_iter().map(Some).collect();
    kept.into_iter()
        .filter_map(|idx| {
            slots[idx].take().map(|fighter| FighterView {
                fighter,
                is_duplicate: duplicate[idx],
            })
        })
        .collect()
}

fn same_record(a: &Fighter, b: &Fighter) -> bool {
    a.wins == b.wins && a.losses == b.losses && a.draws == b.draws && a.nickname == b.nickname
}
