// Card requests.
// Validates raw card attributes and fixes the order requests are processed in.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::error::{CardsError, Result};
use crate::github::{SortDirection, SortField, SortSpec};

/// Repo value selecting every repository of the user.
pub const ALL_REPOS: &str = "%all";

/// Raw attributes of one card, as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CardAttributes {
    #[serde(alias = "data-user")]
    pub user: Option<String>,
    #[serde(alias = "data-repo")]
    pub repo: Option<String>,
    #[serde(alias = "data-sort")]
    pub sort: Option<String>,
    #[serde(alias = "data-direction")]
    pub direction: Option<String>,
}

impl CardAttributes {
    pub fn new(user: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            repo: Some(repo.into()),
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: Option<String>, direction: Option<String>) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    fn targets_all(&self) -> bool {
        self.repo
            .as_deref()
            .is_some_and(|repo| repo.eq_ignore_ascii_case(ALL_REPOS))
    }
}

/// What a card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardTarget {
    AllRepos { sort: Option<SortSpec> },
    Single(String),
}

/// A validated card request. User and repo names are lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRequest {
    pub user: String,
    pub target: CardTarget,
}

impl CardRequest {
    pub fn label(&self) -> String {
        match &self.target {
            CardTarget::AllRepos { sort: Some(sort) } => {
                format!("{}/{} ({})", self.user, ALL_REPOS, sort)
            }
            CardTarget::AllRepos { sort: None } => format!("{}/{}", self.user, ALL_REPOS),
            CardTarget::Single(repo) => format!("{}/{}", self.user, repo),
        }
    }
}

impl TryFrom<&CardAttributes> for CardRequest {
    type Error = CardsError;

    fn try_from(attrs: &CardAttributes) -> Result<Self> {
        let user = required(attrs.user.as_deref(), "user")?;
        let repo = required(attrs.repo.as_deref(), "repo")?;

        let target = if repo == ALL_REPOS {
            CardTarget::AllRepos {
                sort: parse_sort(attrs.sort.as_deref(), attrs.direction.as_deref())?,
            }
        } else {
            CardTarget::Single(repo)
        };

        Ok(CardRequest { user, target })
    }
}

fn required(value: Option<&str>, attribute: &'static str) -> Result<String> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_lowercase()),
        _ => Err(CardsError::MissingAttribute(attribute)),
    }
}

/// Direction only matters together with a sort field; alone it is ignored.
fn parse_sort(sort: Option<&str>, direction: Option<&str>) -> Result<Option<SortSpec>> {
    let Some(sort) = sort.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let field: SortField = sort.parse()?;
    let direction = direction
        .filter(|d| !d.is_empty())
        .map(str::parse::<SortDirection>)
        .transpose()?;

    Ok(Some(SortSpec { field, direction }))
}

/// Order cards for processing: all-repos cards first, then by repo name.
pub fn processing_order(cards: &mut [CardAttributes]) {
    cards.sort_by(|a, b| match (a.targets_all(), b.targets_all()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.repo.cmp(&b.repo),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(sort: Option<&str>, direction: Option<&str>) -> CardAttributes {
        CardAttributes::new("Octocat", "%all")
            .with_sort(sort.map(String::from), direction.map(String::from))
    }

    #[test]
    fn test_single_repo_request_is_lowercased() {
        let request = CardRequest::try_from(&CardAttributes::new("Octocat", "Hello-World")).unwrap();
        assert_eq!(request.user, "octocat");
        assert_eq!(request.target, CardTarget::Single("hello-world".to_string()));
        assert_eq!(request.label(), "octocat/hello-world");
    }

    #[test]
    fn test_missing_user_or_repo() {
        let mut attrs = CardAttributes::new("", "demo");
        assert!(matches!(
            CardRequest::try_from(&attrs),
            Err(CardsError::MissingAttribute("user"))
        ));

        attrs.user = Some("octocat".to_string());
        attrs.repo = None;
        assert!(matches!(
            CardRequest::try_from(&attrs),
            Err(CardsError::MissingAttribute("repo"))
        ));
    }

    #[test]
    fn test_all_repos_with_sort() {
        let request = CardRequest::try_from(&all(Some("Updated"), Some("desc"))).unwrap();
        assert_eq!(
            request.target,
            CardTarget::AllRepos {
                sort: Some(SortSpec {
                    field: SortField::Updated,
                    direction: Some(SortDirection::Desc),
                })
            }
        );
        assert_eq!(request.label(), "octocat/%all (updated desc)");
    }

    #[test]
    fn test_invalid_sort_fails() {
        let err = CardRequest::try_from(&all(Some("bogus"), None)).unwrap_err();
        assert!(matches!(err, CardsError::InvalidAttribute { attribute: "sort", .. }));
    }

    #[test]
    fn test_invalid_direction_with_valid_sort_fails() {
        let err = CardRequest::try_from(&all(Some("created"), Some("up"))).unwrap_err();
        assert!(matches!(
            err,
            CardsError::InvalidAttribute { attribute: "direction", .. }
        ));
    }

    #[test]
    fn test_direction_without_sort_is_ignored() {
        let request = CardRequest::try_from(&all(None, Some("up"))).unwrap();
        assert_eq!(request.target, CardTarget::AllRepos { sort: None });
    }

    #[test]
    fn test_sort_on_single_repo_is_ignored() {
        let attrs = CardAttributes::new("octocat", "demo").with_sort(Some("bogus".into()), None);
        assert!(CardRequest::try_from(&attrs).is_ok());
    }

    #[test]
    fn test_processing_order_puts_all_first() {
        let mut cards = vec![
            CardAttributes::new("a", "zeta"),
            CardAttributes::new("a", "alpha"),
            CardAttributes::new("b", "%ALL"),
            CardAttributes::new("a", "mid"),
            CardAttributes::new("c", "%all"),
        ];

        processing_order(&mut cards);

        let repos: Vec<_> = cards.iter().map(|c| c.repo.as_deref().unwrap()).collect();
        assert_eq!(repos, vec!["%ALL", "%all", "alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_attributes_accept_data_prefixed_names() {
        let json = r#"[{"data-user":"octocat","data-repo":"%all","data-sort":"pushed"}]"#;
        let cards: Vec<CardAttributes> = serde_json::from_str(json).unwrap();
        assert_eq!(cards[0].user.as_deref(), Some("octocat"));
        assert_eq!(cards[0].sort.as_deref(), Some("pushed"));
        assert_eq!(cards[0].direction, None);
    }
}
