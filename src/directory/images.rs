use crate::directory::normalize::image_slug;
use crate::directory::query::Gender;
use crate::model::FighterView;

pub const DEFAULT_MALE_IMAGE: &str = "default.png";
pub const DEFAULT_FEMALE_IMAGE: &str = "default_female.png";

/// Portrait file for a fighter. Same-name fighters get their nickname appended
/// so each one can have a picture of their own.
#[must_use]
pub fn image_file_name(view: &FighterView) -> String {
    let fighter = &view.fighter;
    let slug = if view.is_duplicate && !fighter.nickname.trim().is_empty() {
        image_slug(&[&fighter.first_name, &fighter.last_name, &fighter.nickname])
    } else {
        image_slug(&[&fighter.first_name, &fighter.last_name])
    };
    format!("{slug}.png")
}

/// Picture shown when a fighter's portrait is missing.
#[must_use]
pub fn default_image_file_name(view: &FighterView) -> &'static str {
    match Gender::of(&view.fighter) {
        Gender::Female => DEFAULT_FEMALE_IMAGE,
        Gender::Male => DEFAULT_MALE_IMAGE,
    }
}
