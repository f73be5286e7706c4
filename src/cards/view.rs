// Card view projection.
// Turns a repo record into the fields a card displays.

use crate::record::RepoRecord;

/// Display-ready fields of one repo card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub name: String,
    pub avatar_url: String,
    pub username: String,
    pub description: String,
    pub topics: Vec<String>,
    /// Language names, most bytes first.
    pub languages: Vec<String>,
    pub stars: u64,
    pub watchers: u64,
    pub forks: u64,
    pub updated_at: String,
    pub html_url: String,
}

impl From<&RepoRecord> for CardView {
    fn from(record: &RepoRecord) -> Self {
        let mut languages: Vec<(&String, &u64)> = record.languages.iter().collect();
        languages.sort_by(|a, b| b.1.cmp(a.1));

        Self {
            name: record.name.clone(),
            avatar_url: record.owner.avatar_url.clone().unwrap_or_default(),
            username: record.owner.login.to_lowercase(),
            description: record.description.clone().unwrap_or_default(),
            topics: record.topics.clone(),
            languages: languages.into_iter().map(|(name, _)| name.clone()).collect(),
            stars: record.stars,
            watchers: record.watchers,
            forks: record.forks,
            updated_at: record.updated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            html_url: record.html_url.clone(),
        }
    }
}

impl CardView {
    /// Plain-text rendering, one field per line.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{}/{}", self.username, self.name)];
        if !self.description.is_empty() {
            lines.push(self.description.clone());
        }
        lines.push(format!(
            "★ {}  watchers {}  forks {}  updated {}",
            self.stars, self.watchers, self.forks, self.updated_at
        ));
        if !self.languages.is_empty() {
            lines.push(format!("languages: {}", self.languages.join(", ")));
        }
        if !self.topics.is_empty() {
            lines.push(format!("topics: {}", self.topics.join(", ")));
        }
        lines
    }
}
