use maud::{DOCTYPE, Markup, html};
use serde_json::json;
use url::form_urlencoded;

use crate::HTMX_PATH;
use crate::controller::directory::{DirectoryPage, FighterCard};
use crate::directory::{Gender, PageMarker, SortKey, ViewState};

pub const IMAGE_DIR: &str = "/static/images";

fn path_escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn joined<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(",")
}

/// Query pairs that reproduce `state` for `user_id`. Page 1 is left implicit.
fn state_pairs(state: &ViewState, user_id: Option<&str>) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if !state.search_term.is_empty() {
        pairs.push(("q", state.search_term.clone()));
    }
    if !state.weight_classes.is_empty() {
        pairs.push(("weight", joined(state.weight_classes.iter().map(String::as_str))));
    }
    if !state.genders.is_empty() {
        let genders: Vec<String> = state.genders.iter().map(ToString::to_string).collect();
        pairs.push(("gender", genders.join(",")));
    }
    if let Some(sort) = state.sort {
        pairs.push(("sort", sort.as_str().to_string()));
    }
    if state.page > 1 {
        pairs.push(("page", state.page.to_string()));
    }
    if let Some(user_id) = user_id {
        pairs.push(("user", user_id.to_string()));
    }
    pairs
}

/// Link to the directory showing `state`.
#[must_use]
pub fn directory_href(state: &ViewState, user_id: Option<&str>) -> String {
    let pairs = state_pairs(state, user_id);
    if pairs.is_empty() {
        return "/".to_string();
    }
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        query.append_pair(key, value);
    }
    format!("/?{}", query.finish())
}

fn page_href(page: &DirectoryPage, target: usize) -> String {
    let state = ViewState {
        page: target,
        ..page.state.clone()
    };
    directory_href(&state, page.user_id.as_deref())
}

fn weight_toggle_href(page: &DirectoryPage, weight_class: &str) -> String {
    let mut state = page.state.clone();
    if !state.weight_classes.remove(weight_class) {
        state.weight_classes.insert(weight_class.to_string());
    }
    state.page = 1;
    directory_href(&state, page.user_id.as_deref())
}

fn gender_toggle_href(page: &DirectoryPage, gender: Gender) -> String {
    let mut state = page.state.clone();
    if !state.genders.remove(&gender) {
        state.genders.insert(gender);
    }
    state.page = 1;
    directory_href(&state, page.user_id.as_deref())
}

/// Hidden inputs carrying the filters through a form submit.
fn hidden_filters(page: &DirectoryPage, keep_sort: bool, keep_page: bool) -> Markup {
    let mut state = page.state.clone();
    if !keep_sort {
        state.sort = None;
    }
    if !keep_page {
        state.page = 1;
    }
    html! {
        @for (key, value) in state_pairs(&state, page.user_id.as_deref()) {
            input type="hidden" name=(key) value=(value);
        }
    }
}

/// The favorite toggle. htmx swaps the button for the server's re-render.
#[must_use]
pub fn render_favorite_star(user_id: &str, fighter_id: &str, favorited: bool) -> Markup {
    let label = if favorited {
        "Remove from favorites"
    } else {
        "Add to favorites"
    };
    html! {
        button.star.favorited[favorited] type="button"
            id=(format!("star-{fighter_id}"))
            title=(label)
            aria-pressed=(if favorited { "true" } else { "false" })
            hx-post=(format!("/favorites/{}/toggle", path_escape(user_id)))
            hx-vals=(json!({"fighterId": fighter_id}).to_string())
            hx-swap="outerHTML" {
            @if favorited { "★" } @else { "☆" }
        }
    }
}

/// `<img>` with the portrait, falling back to the default picture.
#[must_use]
pub fn render_portrait(card: &FighterCard, class: &str) -> Markup {
    let fighter = &card.view.fighter;
    html! {
        img class=(class)
            src=(format!("{IMAGE_DIR}/{}", card.image))
            alt=(fighter.full_name())
            loading="lazy"
            onerror=(format!("this.onerror=null;this.src='{IMAGE_DIR}/{}';", card.default_image));
    }
}

fn profile_href(card: &FighterCard, user_id: Option<&str>) -> String {
    let id = card.view.fighter.fighter_id;
    match user_id {
        Some(user_id) => format!(
            "/fighter/{id}?{}",
            form_urlencoded::Serializer::new(String::new())
                .append_pair("user", user_id)
                .finish()
        ),
        None => format!("/fighter/{id}"),
    }
}

fn render_card(card: &FighterCard, user_id: Option<&str>) -> Markup {
    let fighter = &card.view.fighter;
    html! {
        div.fighter-card.duplicate[card.view.is_duplicate] data-fighter-id=(fighter.fighter_id) {
            a href=(profile_href(card, user_id)) {
                (render_portrait(card, "portrait"))
                h3.name { (fighter.full_name()) }
            }
            @if !fighter.nickname.is_empty() {
                p.nickname { "\"" (fighter.nickname) "\"" }
            }
            p.weight-class { (fighter.weight_class) }
            p.record { (fighter.record()) }
            @if let Some(user_id) = user_id {
                (render_favorite_star(user_id, &fighter.fighter_id.to_string(), card.favorited))
            }
        }
    }
}

fn render_search(page: &DirectoryPage) -> Markup {
    html! {
        form.search method="get" action="/" {
            input type="search" name="q" value=(page.state.search_term) placeholder="Search fighters";
            input type="hidden" name="search" value="1";
            @if let Some(sort) = page.state.sort {
                input type="hidden" name="sort" value=(sort.as_str());
            }
            @if let Some(user_id) = &page.user_id {
                input type="hidden" name="user" value=(user_id);
            }
            button type="submit" { "Search" }
        }
    }
}

fn render_user_form(page: &DirectoryPage) -> Markup {
    html! {
        form.user method="get" action="/" {
            @for (key, value) in state_pairs(&ViewState { page: 1, ..page.state.clone() }, None) {
                input type="hidden" name=(key) value=(value);
            }
            label {
                "User "
                input type="text" name="user" value=(page.user_id.as_deref().unwrap_or_default())
                    placeholder="user id to save favorites";
            }
            button type="submit" { "Use" }
        }
    }
}

fn render_facets(page: &DirectoryPage) -> Markup {
    html! {
        div.facets {
            div.facet-group {
                h4 { "Weight class" }
                @for weight_class in &page.weight_classes {
                    @let active = page.state.weight_classes.contains(weight_class);
                    a.facet.active[active] href=(weight_toggle_href(page, weight_class)) { (weight_class) }
                }
            }
            div.facet-group {
                h4 { "Gender" }
                @for gender in [Gender::Male, Gender::Female] {
                    @let active = page.state.genders.contains(&gender);
                    a.facet.active[active] href=(gender_toggle_href(page, gender)) { (gender.to_string()) }
                }
            }
        }
    }
}

fn render_sort(page: &DirectoryPage) -> Markup {
    html! {
        form.sort method="get" action="/" {
            (hidden_filters(page, false, false))
            label {
                "Sort by "
                select name="sort" onchange="this.form.submit()" {
                    option value="" selected[page.state.sort.is_none()] { "Feed order" }
                    @for key in SortKey::ALL {
                        @if key != SortKey::Favorites || page.user_id.is_some() {
                            option value=(key.as_str()) selected[page.state.sort == Some(key)] { (key.label()) }
                        }
                    }
                }
            }
            noscript { button type="submit" { "Sort" } }
        }
    }
}

fn render_pager(page: &DirectoryPage) -> Markup {
    let current = page.state.page;
    html! {
        nav.pager {
            @if current > 1 {
                a.prev href=(page_href(page, current - 1)) { "‹ Prev" }
            }
            @for marker in &page.page_markers {
                @match marker {
                    PageMarker::Page(n) if *n == current => { span.page.current { (n) } }
                    PageMarker::Page(n) => { a.page href=(page_href(page, *n)) { (n) } }
                    PageMarker::Ellipsis => { span.ellipsis { "…" } }
                }
            }
            @if current < page.total_pages {
                a.next href=(page_href(page, current + 1)) { "Next ›" }
            }
            form.goto method="get" action="/" {
                (hidden_filters(page, true, true))
                label {
                    "Go to page "
                    input type="number" name="goto" min="1" max=(page.total_pages) inputmode="numeric";
                }
                button type="submit" { "Go" }
            }
        }
    }
}

#[must_use]
pub fn render_directory_page(page: &DirectoryPage) -> Markup {
    let user_id = page.user_id.as_deref();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "MMA Fighters Directory" }
                link rel="stylesheet" type="text/css" href="/static/styles.css";
                script src=(HTMX_PATH) defer {}
            }
            body {
                header {
                    h1 { "MMA Fighters Directory" }
                    (render_user_form(page))
                    (render_search(page))
                }
                (render_facets(page))
                (render_sort(page))
                @if let Some(error) = &page.error {
                    p.error role="alert" { (error) }
                }
                p.summary {
                    (page.total_results) " fighters"
                    @if let Some(age) = &page.last_refresh {
                        span.last-refresh { " · refreshed " (age) " ago" }
                    }
                }
                @if page.fighters.is_empty() {
                    p.empty { "No fighters found" }
                } @else {
                    div.fighter-grid {
                        @for card in &page.fighters {
                            (render_card(card, user_id))
                        }
                    }
                }
                @if page.total_pages > 1 {
                    (render_pager(page))
                }
            }
        }
    }
}
