//! Curated poetry selection.
//!
//! A small static collection tagged by topic; themes pick from it when a
//! request carries no custom poetry. Scraping and external sources are
//! out of scope.

use rand::seq::IndexedRandom;
use tracing::debug;

use vreel_models::request::LineBounds;

use crate::error::{ContentError, ContentResult};

/// A curated poem.
#[derive(Debug, Clone)]
pub struct Poem {
    pub title: &'static str,
    pub author: &'static str,
    pub lines: &'static [&'static str],
    pub topics: &'static [&'static str],
}

impl Poem {
    /// Lines as owned strings, the shape the render pipeline consumes.
    pub fn lines_owned(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.to_string()).collect()
    }
}

const POEMS: &[Poem] = &[
    Poem {
        title: "Under the Canopy",
        author: "VerseReel",
        lines: &[
            "Beneath the patient oaks I stand,",
            "where roots run deeper than my plans,",
            "and every leaf that finds the ground",
            "returns as something green again.",
        ],
        topics: &["nature", "trees", "growth", "seasons", "earth", "forest"],
    },
    Poem {
        title: "Low Tide",
        author: "VerseReel",
        lines: &[
            "The sea keeps nothing that it takes,",
            "it only borrows, wave by wave,",
            "and gives it back along the shore,",
            "smoothed into something it can save.",
        ],
        topics: &["ocean", "water", "flow", "peace", "depth"],
    },
    Poem {
        title: "Gold Hour",
        author: "VerseReel",
        lines: &[
            "The day leans soft against the hills,",
            "spills amber over roof and wire,",
            "and for a moment, every window",
            "holds a small, forgiving fire.",
        ],
        topics: &["light", "time", "beauty", "golden", "reflection"],
    },
    Poem {
        title: "One Clear Thing",
        author: "VerseReel",
        lines: &[
            "Keep one clear thing upon the shelf,",
            "one quiet room inside yourself,",
            "and when the noise forgets your name,",
            "the stillness there remains the same.",
        ],
        topics: &["simplicity", "clarity", "essence", "truth", "moment"],
    },
    Poem {
        title: "Older Than Maps",
        author: "VerseReel",
        lines: &[
            "The woods were old before the roads,",
            "before the fences learned the field,",
            "and in their shade the silence keeps",
            "whatever time has not revealed.",
        ],
        topics: &["forest", "mystery", "ancient", "wisdom", "trees"],
    },
    Poem {
        title: "Slow Rain",
        author: "VerseReel",
        lines: &[
            "Rain writes its small print on the pond,",
            "too fine for anyone to read,",
            "yet every ring that opens out",
            "is all the language rivers need.",
        ],
        topics: &["water", "peace", "nature", "reflection", "flow"],
    },
    Poem {
        title: "What the Light Leaves",
        author: "VerseReel",
        lines: &[
            "Evening folds the garden closed,",
            "gathers shadows from the wall,",
            "and what the light leaves in our keeping",
            "is enough, if it is all.",
        ],
        topics: &["light", "time", "moment", "beauty"],
    },
    Poem {
        title: "Seedling",
        author: "VerseReel",
        lines: &[
            "Begin as everything begins,",
            "half-buried, blind, and out of view,",
            "then lean toward what warms you most",
            "until the leaning carries you.",
        ],
        topics: &["growth", "seasons", "nature", "earth", "truth"],
    },
];

/// The built-in poetry collection.
#[derive(Debug, Clone)]
pub struct PoetryLibrary {
    bounds: LineBounds,
}

impl PoetryLibrary {
    /// Library restricted to poems whose line count fits `bounds`.
    pub fn new(bounds: LineBounds) -> Self {
        Self { bounds }
    }

    /// All poems that fit the configured line window.
    pub fn poems(&self) -> Vec<&'static Poem> {
        POEMS
            .iter()
            .filter(|p| self.bounds.contains(p.lines.len()))
            .collect()
    }

    /// Pick a poem matching any of the given topics, falling back to any
    /// in-window poem when no topic matches.
    pub fn select_for_topics(&self, topics: &[String]) -> ContentResult<&'static Poem> {
        let candidates = self.poems();
        if candidates.is_empty() {
            return Err(ContentError::NoPoetry);
        }

        let matching: Vec<&&'static Poem> = candidates
            .iter()
            .filter(|p| p.topics.iter().any(|t| topics.iter().any(|q| q == t)))
            .collect();

        let mut rng = rand::rng();
        let poem = if matching.is_empty() {
            debug!("No poem matches topics {topics:?}, picking any");
            *candidates.choose(&mut rng).expect("non-empty candidates")
        } else {
            **matching.choose(&mut rng).expect("non-empty matches")
        };

        Ok(poem)
    }

    /// Pick any in-window poem.
    pub fn random(&self) -> ContentResult<&'static Poem> {
        let candidates = self.poems();
        candidates
            .choose(&mut rand::rng())
            .copied()
            .ok_or(ContentError::NoPoetry)
    }
}

impl Default for PoetryLibrary {
    fn default() -> Self {
        Self::new(LineBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_poems_fit_default_window() {
        let library = PoetryLibrary::default();
        assert_eq!(library.poems().len(), POEMS.len());
        for poem in library.poems() {
            assert!(!poem.lines.is_empty());
            assert!(!poem.topics.is_empty());
        }
    }

    #[test]
    fn topic_selection_prefers_matches() {
        let library = PoetryLibrary::default();
        for _ in 0..20 {
            let poem = library
                .select_for_topics(&["ocean".to_string(), "depth".to_string()])
                .unwrap();
            assert!(
                poem.topics.contains(&"ocean") || poem.topics.contains(&"depth"),
                "picked off-topic poem {:?}",
                poem.title
            );
        }
    }

    #[test]
    fn unknown_topic_still_yields_a_poem() {
        let library = PoetryLibrary::default();
        assert!(library.select_for_topics(&["volcano".to_string()]).is_ok());
    }

    #[test]
    fn narrow_window_excludes_everything() {
        let library = PoetryLibrary::new(LineBounds { min: 100, max: 200 });
        assert!(matches!(library.random(), Err(ContentError::NoPoetry)));
    }
}
