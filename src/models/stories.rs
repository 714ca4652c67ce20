/// The story lists published by the API.
///
/// Each list is a JSON array of item ids, served from
/// `/v0/<endpoint>.json`. Top, new and best hold up to 500 ids;
/// ask, show and job hold up to 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryKind {
    /// Front page ranking.
    Top,
    /// Newest stories.
    New,
    /// Best stories.
    Best,
    /// Ask HN.
    Ask,
    /// Show HN.
    Show,
    /// Job postings.
    Job,
}

impl StoryKind {
    /// Every list, in the order the site shows them.
    pub const ALL: [StoryKind; 6] = [
        StoryKind::Top,
        StoryKind::New,
        StoryKind::Best,
        StoryKind::Ask,
        StoryKind::Show,
        StoryKind::Job,
    ];

    /// Returns the endpoint name, without the `.json` suffix.
    pub fn endpoint(self) -> &'static str {
        match self {
            StoryKind::Top => "topstories",
            StoryKind::New => "newstories",
            StoryKind::Best => "beststories",
            StoryKind::Ask => "askstories",
            StoryKind::Show => "showstories",
            StoryKind::Job => "jobstories",
        }
    }
}
