use serde::Serialize;

/// The ordered names on the wheel.
///
/// Order decides where each name sits on the wheel, and duplicates are kept: a name entered twice
/// owns two segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParticipantList(Vec<String>);

impl ParticipantList {
    /// Builds a list out of free-form text with one name per line.
    ///
    /// Lines are trimmed and blank ones are dropped.
    pub fn parse(raw: &str) -> Self {
        raw.lines().map(str::trim).filter(|line| !line.is_empty()).map(String::from).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether there are enough names to spin the wheel.
    pub fn can_draw(&self) -> bool {
        self.len() >= super::MIN_PARTICIPANTS
    }
}

impl FromIterator<String> for ParticipantList {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S: Into<String>> From<Vec<S>> for ParticipantList {
    fn from(names: Vec<S>) -> Self {
        names.into_iter().map(Into::into).collect()
    }
}
