use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{de_timestamp, epoch, macros::str_opt_ref, ser_timestamp};

/// The kind of an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A story submission.
    Story,
    /// A comment on a story, poll or another comment.
    Comment,
    /// A job posting.
    Job,
    /// A poll.
    Poll,
    /// One of the options of a [`ItemKind::Poll`].
    #[serde(rename = "pollopt")]
    PollOpt,
}

impl ItemKind {
    /// Returns the name the API uses for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Story => "story",
            ItemKind::Comment => "comment",
            ItemKind::Job => "job",
            ItemKind::Poll => "poll",
            ItemKind::PollOpt => "pollopt",
        }
    }
}

/// A single forum item: a story, comment, job, poll or poll option.
///
/// Maps to the fields of `/v0/item/<id>.json`. Fields the API leaves out
/// for a given kind are `None` (or empty for lists).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The item's unique id.
    id: u32,

    /// `true` if the item is deleted.
    #[serde(default)]
    deleted: bool,

    /// The kind of item.
    #[serde(rename = "type")]
    kind: ItemKind,

    /// The username of the item's author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    by: Option<String>,

    /// Creation date of the item.
    #[serde(
        default = "epoch",
        serialize_with = "ser_timestamp",
        deserialize_with = "de_timestamp"
    )]
    time: DateTime<Utc>,

    /// The comment, story or poll text. HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    /// `true` if the item is dead.
    #[serde(default)]
    dead: bool,

    /// The comment's parent: either another comment or the relevant story.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<u32>,

    /// The pollopt's associated poll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    poll: Option<u32>,

    /// The ids of the item's comments, in ranked display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    kids: Vec<u32>,

    /// The URL of the story.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    /// The story's score, or the votes for a pollopt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<i32>,

    /// The title of the story, poll or job. HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    /// A list of related pollopts, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    parts: Vec<u32>,

    /// In the case of stories or polls, the total comment count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    descendants: Option<u32>,
}

impl Item {
    /// Returns the item's unique id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns `true` if the item is deleted.
    pub fn deleted(&self) -> bool {
        self.deleted
    }

    /// Returns the kind of item.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Returns the author's username (absent on deleted items).
    pub fn by(&self) -> Option<&str> {
        str_opt_ref!(self.by)
    }

    /// Returns when the item was created.
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Returns the HTML text of the item (if present).
    pub fn text(&self) -> Option<&str> {
        str_opt_ref!(self.text)
    }

    /// Returns `true` if the item is dead.
    pub fn dead(&self) -> bool {
        self.dead
    }

    /// Returns the parent id (comments only).
    pub fn parent(&self) -> Option<u32> {
        self.parent
    }

    /// Returns the poll this option belongs to (pollopts only).
    pub fn poll(&self) -> Option<u32> {
        self.poll
    }

    /// Returns the ids of direct replies.
    pub fn kids(&self) -> &[u32] {
        &self.kids
    }

    /// Returns the story URL (if present).
    pub fn url(&self) -> Option<&str> {
        str_opt_ref!(self.url)
    }

    /// Returns the score (stories) or vote count (pollopts).
    pub fn score(&self) -> Option<i32> {
        self.score
    }

    /// Returns the title (stories, polls and jobs).
    pub fn title(&self) -> Option<&str> {
        str_opt_ref!(self.title)
    }

    /// Returns the pollopt ids of a poll.
    pub fn parts(&self) -> &[u32] {
        &self.parts
    }

    /// Returns the total comment count (stories and polls).
    pub fn descendants(&self) -> Option<u32> {
        self.descendants
    }
}

#[cfg(feature = "display")]
impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.id)?;
        if let Some(title) = self.title() {
            write!(f, " {title:?}")?;
        }
        if let Some(by) = self.by() {
            write!(f, " by {by}")?;
        }
        write!(f, " at {}", self.time.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemKind};

    #[test]
    fn story() {
        let raw = r#"{
            "by": "dhouston",
            "descendants": 71,
            "id": 8863,
            "kids": [8952, 9224, 8917],
            "score": 111,
            "time": 1175714200,
            "title": "My YC app: Dropbox - Throw away your USB drive",
            "type": "story",
            "url": "http://www.getdropbox.com/u/2/screencast.html"
        }"#;
        let item: Item = serde_json::from_str(raw).unwrap();
        assert_eq!(item.id(), 8863);
        assert_eq!(item.kind(), ItemKind::Story);
        assert_eq!(item.by(), Some("dhouston"));
        assert_eq!(item.descendants(), Some(71));
        assert_eq!(item.kids(), &[8952, 9224, 8917]);
        assert_eq!(item.score(), Some(111));
        assert_eq!(item.time().timestamp(), 1_175_714_200);
        assert!(item.parts().is_empty());
        assert!(!item.deleted());
        assert!(item.text().is_none());
    }

    #[test]
    fn pollopt() {
        let raw = r#"{"by": "pg", "id": 160705, "poll": 160704, "score": 335,
            "text": "Yes, ban them; I'm tired of seeing Valleywag stories on News.YC.",
            "time": 1207886576, "type": "pollopt"}"#;
        let item: Item = serde_json::from_str(raw).unwrap();
        assert_eq!(item.kind(), ItemKind::PollOpt);
        assert_eq!(item.poll(), Some(160_704));
        assert!(item.title().is_none());
    }

    #[test]
    fn deleted_comment_without_author() {
        let raw = r#"{"deleted": true, "id": 2921983, "parent": 2921506,
            "time": 1314211127, "type": "comment"}"#;
        let item: Item = serde_json::from_str(raw).unwrap();
        assert!(item.deleted());
        assert!(item.by().is_none());
        assert_eq!(item.parent(), Some(2_921_506));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let raw = r#"{"id": 1, "time": 1, "type": "meme"}"#;
        assert!(serde_json::from_str::<Item>(raw).is_err());
    }

    #[test]
    fn serializes_back_to_api_layout() {
        let raw = r#"{"by": "norvig", "id": 2921506, "kids": [2922097, 2922429],
            "parent": 2921375, "text": "Aw shucks", "time": 1314211127, "type": "comment"}"#;
        let item: Item = serde_json::from_str(raw).unwrap();

        let written = serde_json::to_value(&item).unwrap();
        assert_eq!(written["time"], 1_314_211_127);
        assert_eq!(written["type"], "comment");
        assert!(written.get("title").is_none());

        let reread: Item = serde_json::from_value(written).unwrap();
        assert_eq!(reread, item);
    }
}
