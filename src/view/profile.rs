use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, html};

use crate::HTMX_PATH;
use crate::controller::directory::FighterCard;
use crate::directory::ViewState;
use crate::model::{Measurement, NOT_AVAILABLE};
use crate::view::directory::{directory_href, render_favorite_star, render_portrait};

fn with_unit(value: Measurement, unit: &str) -> String {
    match value {
        Measurement::Value(_) => format!("{value} {unit}"),
        Measurement::NotAvailable => NOT_AVAILABLE.to_string(),
    }
}

fn page_shell(title: &str, body: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" type="text/css" href="/static/styles.css";
                script src=(HTMX_PATH) defer {}
            }
            body { (body) }
        }
    }
}

#[must_use]
pub fn render_profile_page(card: &FighterCard, user_id: Option<&str>, today: NaiveDate) -> Markup {
    let fighter = &card.view.fighter;
    let nickname = if fighter.nickname.is_empty() {
        NOT_AVAILABLE
    } else {
        fighter.nickname.as_str()
    };
    let age = fighter
        .birth_date
        .age_on(today)
        .map_or_else(|| NOT_AVAILABLE.to_string(), |years| years.to_string());
    let back = directory_href(&ViewState::default(), user_id);

    let body = html! {
        a.back href=(back) { "‹ Back to directory" }
        article.profile data-fighter-id=(fighter.fighter_id) {
            (render_portrait(card, "portrait-large"))
            h1 { (fighter.full_name()) }
            @if let Some(user_id) = user_id {
                (render_favorite_star(user_id, &fighter.fighter_id.to_string(), card.favorited))
            }
            dl.details {
                dt { "Nickname" } dd.nickname { (nickname) }
                dt { "Weight class" } dd { (fighter.weight_class) }
                dt { "Age" } dd.age { (age) }
                dt { "Height" } dd.height { (with_unit(fighter.height, "in")) }
                dt { "Weight" } dd.weight { (with_unit(fighter.weight, "lbs")) }
                dt { "Reach" } dd.reach { (with_unit(fighter.reach, "in")) }
            }
            table.record {
                tr { th { "Wins" } th { "Losses" } th { "Draws" } th { "No contests" } }
                tr {
                    td.wins { (fighter.wins) }
                    td.losses { (fighter.losses) }
                    td.draws { (fighter.draws) }
                    td.no-contests { (fighter.no_contests) }
                }
            }
            table.methods {
                tr { th { "" } th { "Won" } th { "Lost" } }
                tr { th { "Technical knockouts" } td.tko-wins { (fighter.technical_knockouts) } td { (fighter.technical_knockout_losses) } }
                tr { th { "Submissions" } td.sub-wins { (fighter.submissions) } td { (fighter.submission_losses) } }
                tr { th { "Title fights" } td { (fighter.title_wins) } td { (fighter.title_losses) } }
            }
        }
    };
    page_shell(&fighter.full_name(), &body)
}

#[must_use]
pub fn render_fighter_not_found(fighter_id: &str) -> Markup {
    let body = html! {
        a.back href="/" { "‹ Back to directory" }
        p.empty { "No fighter found with id " (fighter_id) }
    };
    page_shell("Fighter not found", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FighterView, RawFighter};

    #[test]
    fn missing_details_show_not_available() {
        let view = FighterView {
            fighter: RawFighter {
                fighter_id: Some(9),
                first_name: Some("Alex".to_string()),
                last_name: Some("Pereira".to_string()),
                birth_date: Some("1987-07-07T00:00:00".to_string()),
                height: Some(76.0),
                wins: Some(12),
                ..RawFighter::default()
            }
            .into(),
            is_duplicate: false,
        };
        let card = FighterCard::new(&view, &[]);
        let today = NaiveDate::from_ymd_opt(2024, 7, 6).unwrap();
        let html = render_profile_page(&card, None, today).into_string();
        assert!(html.contains("<dd class=\"nickname\">N/A</dd>"));
        assert!(html.contains("<dd class=\"age\">36</dd>"));
        assert!(html.contains("<dd class=\"height\">76 in</dd>"));
        assert!(html.contains("<dd class=\"reach\">N/A</dd>"));
        assert!(!html.contains("class=\"star"));
    }
}
