use serde::{Serialize, Deserialize};
use crate::core::types::Attribute;

/// Optional genre, director and lead actor constraints of a similarity query.
///
/// Blank values are stored as unset, so an engine only ever sees criteria
/// that were actually supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criteria {
    pub genre: Option<String>,
    pub director: Option<String>,
    pub lead_actor: Option<String>,
}

impl Criteria {
    pub fn new() -> Self {
        Criteria::default()
    }

    /// Builds criteria from raw form input: values are trimmed and blank ones dropped.
    pub fn from_form(genre: &str, director: &str, lead_actor: &str) -> Self {
        Criteria::new().genre(genre).director(director).lead_actor(lead_actor)
    }

    pub fn genre(mut self, genre: impl AsRef<str>) -> Self {
        self.genre = non_blank(genre.as_ref());
        self
    }

    pub fn director(mut self, director: impl AsRef<str>) -> Self {
        self.director = non_blank(director.as_ref());
        self
    }

    pub fn lead_actor(mut self, lead_actor: impl AsRef<str>) -> Self {
        self.lead_actor = non_blank(lead_actor.as_ref());
        self
    }

    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Genre => self.genre.as_deref(),
            Attribute::Director => self.director.as_deref(),
            Attribute::LeadActor => self.lead_actor.as_deref(),
        }
    }

    /// Supplied criteria in genre, director, lead actor order.
    pub fn supplied(&self) -> impl Iterator<Item = (Attribute, &str)> {
        Attribute::ALL
            .into_iter()
            .filter_map(move |attribute| self.get(attribute).map(|value| (attribute, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.director.is_none() && self.lead_actor.is_none()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_input_is_trimmed_and_blanks_dropped() {
        let criteria = Criteria::from_form("  Comedy ", "", "   ");
        assert_eq!(criteria.genre.as_deref(), Some("Comedy"));
        assert_eq!(criteria.director, None);
        assert_eq!(criteria.lead_actor, None);
        assert!(!criteria.is_empty());
        assert!(Criteria::from_form("", " ", "").is_empty());
    }

    #[test]
    fn supplied_follows_attribute_order() {
        let criteria = Criteria::new().lead_actor("Kyle MacLachlan").genre("Science Fiction");
        let supplied: Vec<_> = criteria.supplied().collect();
        assert_eq!(
            supplied,
            vec![(Attribute::Genre, "Science Fiction"), (Attribute::LeadActor, "Kyle MacLachlan")]
        );
    }
}
