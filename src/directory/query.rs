use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::directory::normalize::fold;
use crate::directory::pagination::{PageError, page_slice, total_pages};
use crate::model::{Fighter, FighterView};

/// The feed has no sex field; these divisions are the only signal.
pub const WOMENS_DIVISIONS: [&str; 4] = [
    "Women's Strawweight",
    "Women's Flyweight",
    "Women's Bantamweight",
    "Women's Featherweight",
];

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub fn of_weight_class(weight_class: &str) -> Self {
        let weight_class = weight_class.trim();
        if WOMENS_DIVISIONS
            .iter()
            .any(|division| division.eq_ignore_ascii_case(weight_class))
        {
            Self::Female
        } else {
            Self::Male
        }
    }

    #[must_use]
    pub fn of(fighter: &Fighter) -> Self {
        Self::of_weight_class(&fighter.weight_class)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "Male",
            Self::Female => "Female",
        })
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!("unknown gender filter '{other}'")),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Alphabetical,
    Wins,
    Losses,
    Draws,
    Knockouts,
    Submissions,
    /// Not an ordering: keeps only the user's favorites, in list order.
    Favorites,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        Self::Alphabetical,
        Self::Wins,
        Self::Losses,
        Self::Draws,
        Self::Knockouts,
        Self::Submissions,
        Self::Favorites,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alphabetical => "alphabetical",
            Self::Wins => "wins",
            Self::Losses => "losses",
            Self::Draws => "draws",
            Self::Knockouts => "knockouts",
            Self::Submissions => "submissions",
            Self::Favorites => "favorites",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alphabetical => "Alphabetical (A-Z)",
            Self::Wins => "Most Wins",
            Self::Losses => "Most Losses",
            Self::Draws => "Most Draws",
            Self::Knockouts => "Most Knockouts",
            Self::Submissions => "Most Submissions",
            Self::Favorites => "Favorites",
        }
    }

    fn compare(self, a: &Fighter, b: &Fighter) -> Ordering {
        match self {
            Self::Alphabetical => fold(&a.last_name)
                .cmp(&fold(&b.last_name))
                .then_with(|| fold(&a.first_name).cmp(&fold(&b.first_name))),
            Self::Wins => b.wins.cmp(&a.wins),
            Self::Losses => b.losses.cmp(&a.losses),
            Self::Draws => b.draws.cmp(&a.draws),
            Self::Knockouts => b.technical_knockouts.cmp(&a.technical_knockouts),
            Self::Submissions => b.submissions.cmp(&a.submissions),
            Self::Favorites => Ordering::Equal,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .or(match s {
                "mostWins" => Some(Self::Wins),
                "mostLosses" => Some(Self::Losses),
                _ => None,
            })
            .ok_or_else(|| format!("unknown sort key '{s}'"))
    }
}

/// Whether a fighter matches a search term on first, last or full name.
/// The term must already be folded.
#[must_use]
pub fn matches_search(fighter: &Fighter, folded_term: &str) -> bool {
    if folded_term.is_empty() {
        return true;
    }
    fold(&fighter.first_name).contains(folded_term)
        || fold(&fighter.last_name).contains(folded_term)
        || fold(&fighter.full_name()).contains(folded_term)
}

/// What the user is currently looking at.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub weight_classes: BTreeSet<String>,
    pub genders: BTreeSet<Gender>,
    pub sort: Option<SortKey>,
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            weight_classes: BTreeSet::new(),
            genders: BTreeSet::new(),
            sort: None,
            page: 1,
        }
    }
}

impl ViewState {
    /// Run a new search. Jumps back to page 1 and clears the facet filters.
    pub fn search(&mut self, term: &str) {
        self.search_term = term.trim().to_string();
        self.weight_classes.clear();
        self.genders.clear();
        self.page = 1;
    }

    /// Move to `page` if it exists. On error the state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `PageError::OutOfRange` when `page` is outside `1..=total_pages`
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> Result<(), PageError> {
        if page == 0 || page > total_pages {
            return Err(PageError::OutOfRange { page, total_pages });
        }
        self.page = page;
        Ok(())
    }

    /// Search, facet filters and sort applied to the full list, before pagination.
    #[must_use]
    pub fn apply<'a>(&self, fighters: &'a [FighterView], favorites: &[String]) -> Vec<&'a FighterView> {
        let term = fold(self.search_term.trim());
        let mut results: Vec<&FighterView> = fighters
            .iter()
            .filter(|f| matches_search(&f.fighter, &term))
            .filter(|f| {
                self.weight_classes.is_empty()
                    || self.weight_classes.contains(&f.fighter.weight_class)
            })
            .filter(|f| self.genders.is_empty() || self.genders.contains(&Gender::of(&f.fighter)))
            .collect();

        match self.sort {
            Some(SortKey::Favorites) => {
                results.retain(|f| {
                    let id = f.fighter.fighter_id.to_string();
                    favorites.iter().any(|fav| *fav == id)
                });
            }
            Some(key) => results.sort_by(|a, b| key.compare(&a.fighter, &b.fighter)),
            None => {}
        }
        results
    }

    /// The current page of `results`, plus the page count.
    #[must_use]
    pub fn paginate<'a, T>(&self, results: &'a [T], page_size: usize) -> (&'a [T], usize) {
        (
            page_slice(results, self.page, page_size),
            total_pages(results.len(), page_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawFighter;

    fn view(id: i64, first: &str, last: &str, weight_class: &str, wins: i64) -> FighterView {
        FighterView {
            fighter: Fighter::from(RawFighter {
                fighter_id: Some(id),
                first_name: Some(first.to_string()),
                last_name: Some(last.to_string()),
                weight_class: Some(weight_class.to_string()),
                wins: Some(wins),
                ..RawFighter::default()
            }),
            is_duplicate: false,
        }
    }

    fn roster() -> Vec<FighterView> {
        vec![
            view(1, "Jon", "Jones", "Heavyweight", 27),
            view(2, "José", "Aldo", "Bantamweight", 32),
            view(3, "Jonathan", "Martinez", "Bantamweight", 19),
            view(4, "Zhang", "Weili", "Women's Strawweight", 25),
            view(5, "Derrick", "Lewis", "Heavyweight", 28),
            view(6, "Valentina", "Shevchenko", "women's flyweight", 23),
        ]
    }

    #[test]
    fn gender_comes_from_division() {
        assert_eq!(Gender::of_weight_class("Women's Bantamweight"), Gender::Female);
        assert_eq!(Gender::of_weight_class("women's flyweight"), Gender::Female);
        assert_eq!(Gender::of_weight_class("Unknown"), Gender::Male);
    }

    #[test]
    fn search_ignores_accents_and_case() {
        let fighters = roster();
        let mut state = ViewState::default();
        state.search("JOSE");
        let ids: Vec<_> = state.apply(&fighters, &[]).iter().map(|f| f.fighter.fighter_id).collect();
        assert_eq!(ids, vec![2]);

        state.search("jose aldo");
        assert_eq!(state.apply(&fighters, &[]).len(), 1);

        state.search("jon");
        let once = state.apply(&fighters, &[]);
        state.search("jon");
        assert_eq!(state.apply(&fighters, &[]), once);
    }

    #[test]
    fn search_with_weight_class_facet() {
        let fighters = roster();
        let mut state = ViewState::default();
        state.search("jon");
        state.weight_classes.insert("Heavyweight".to_string());
        let ids: Vec<_> = state.apply(&fighters, &[]).iter().map(|f| f.fighter.fighter_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn searching_again_clears_facets_and_page() {
        let mut state = ViewState {
            page: 3,
            ..ViewState::default()
        };
        state.genders.insert(Gender::Female);
        state.weight_classes.insert("Heavyweight".to_string());
        state.search("  weili ");
        assert_eq!(state.search_term, "weili");
        assert_eq!(state.page, 1);
        assert!(state.genders.is_empty());
        assert!(state.weight_classes.is_empty());
    }

    #[test]
    fn empty_search_keeps_facet_filtered_set() {
        let fighters = roster();
        let mut state = ViewState::default();
        state.genders.insert(Gender::Female);
        let once: Vec<_> = state.apply(&fighters, &[]).iter().map(|f| f.fighter.fighter_id).collect();
        assert_eq!(once, vec![4, 6]);
    }

    #[test]
    fn sorts_are_stable_and_descending() {
        let fighters = roster();
        let state = ViewState {
            sort: Some(SortKey::Wins),
            ..ViewState::default()
        };
        let ids: Vec<_> = state.apply(&fighters, &[]).iter().map(|f| f.fighter.fighter_id).collect();
        assert_eq!(ids, vec![2, 5, 1, 4, 6, 3]);

        let state = ViewState {
            sort: Some(SortKey::Alphabetical),
            ..ViewState::default()
        };
        let last: Vec<_> = state
            .apply(&fighters, &[])
            .iter()
            .map(|f| f.fighter.last_name.clone())
            .collect();
        assert_eq!(last, vec!["Aldo", "Jones", "Lewis", "Martinez", "Shevchenko", "Weili"]);
    }

    #[test]
    fn alphabetical_sort_ignores_accents() {
        let fighters = vec![
            view(1, "Zhang", "Weili", "Women's Strawweight", 25),
            view(2, "Lucas", "Lucindo", "Flyweight", 9),
            view(3, "Eddie", "Álvarez", "Lightweight", 30),
            view(4, "Kai", "Asakura", "Flyweight", 21),
            view(5, "Alexa", "Álvarez", "Women's Flyweight", 5),
        ];
        let state = ViewState {
            sort: Some(SortKey::Alphabetical),
            ..ViewState::default()
        };
        let ids: Vec<_> = state.apply(&fighters, &[]).iter().map(|f| f.fighter.fighter_id).collect();
        assert_eq!(ids, vec![5, 3, 4, 2, 1]);
    }

    #[test]
    fn favorites_key_filters_instead_of_sorting() {
        let fighters = roster();
        let state = ViewState {
            sort: Some(SortKey::Favorites),
            ..ViewState::default()
        };
        let favorites = vec!["5".to_string(), "2".to_string()];
        let ids: Vec<_> = state
            .apply(&fighters, &favorites)
            .iter()
            .map(|f| f.fighter.fighter_id)
            .collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn out_of_range_page_leaves_state_alone() {
        let mut state = ViewState::default();
        assert!(state.go_to_page(4, 3).is_err());
        assert!(state.go_to_page(0, 3).is_err());
        assert_eq!(state.page, 1);
        state.go_to_page(3, 3).unwrap();
        assert_eq!(state.page, 3);
    }

    #[test]
    fn sort_keys_parse_from_query_values() {
        assert_eq!("wins".parse::<SortKey>(), Ok(SortKey::Wins));
        assert_eq!("mostLosses".parse::<SortKey>(), Ok(SortKey::Losses));
        assert!("height".parse::<SortKey>().is_err());
    }
}
