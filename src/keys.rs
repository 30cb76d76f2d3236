//! Grouping keys derived from a [`Track`].

use crate::types::{ArtistConfig, Label, Track};
use crate::{Result, SongStatsError};
use regex::Regex;
use std::fmt;

/// Matches everything before the last `" feat"` that is not followed by `h`,
/// so "feat." and "featuring" are stripped while "feather" is left alone.
const FEATURING_PATTERN: &str = r"(.*) feat[^h]";

pub fn year_key(track: &Track) -> i32 {
    track.year
}

/// A decade, stored as the year divided by ten.
///
/// For four-digit years this is the first three digits of the year (`199`
/// for 1995). [`Decade::label`] gives the display form (`"1990s"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Decade(pub i32);

impl Decade {
    pub fn of_year(year: i32) -> Self {
        Decade(year.div_euclid(10))
    }

    pub fn label(&self) -> Label {
        Label::Text(format!("{}0s", self.0))
    }
}

impl fmt::Display for Decade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The decade of the track's year.
///
/// The key is numeric rather than a prefix of the year's text. Both agree for
/// four-digit years; otherwise the year still falls in the decade that
/// contains it, so `99` is in the `90s` and `12345` in the `12340s`. Negative
/// years round toward the earlier decade (`-5` is in the `-10s`).
pub fn decade_key(track: &Track) -> Decade {
    Decade::of_year(track.year)
}

/// Lower-cased, trimmed album. Empty means the track has no album.
pub fn album_identity(track: &Track) -> String {
    track.album.trim().to_lowercase()
}

/// Compiled rules deriving an artist identity from a track.
///
/// Two tracks share an identity when their artists only differ by case,
/// surrounding whitespace, a trailing featuring clause, or anything the
/// configured rewrites normalize away.
///
/// # Examples
///
/// ```rust
/// use song_stats::{ArtistConfig, ArtistRules, Track};
///
/// let rules = ArtistRules::new(&ArtistConfig::default()).unwrap();
/// let track = Track::new("Gorillaz feat. De La Soul", "Demon Days", 2005);
/// assert_eq!(rules.identity(&track), "gorillaz");
/// ```
#[derive(Debug, Clone)]
pub struct ArtistRules {
    featuring: Option<Regex>,
    rewrites: Vec<(Regex, String)>,
}

impl ArtistRules {
    pub fn new(config: &ArtistConfig) -> Result<Self> {
        let featuring = if config.strip_featuring {
            Some(compile(FEATURING_PATTERN)?)
        } else {
            None
        };

        let rewrites = config
            .rewrites
            .iter()
            .map(|rule| Ok((compile(&rule.pattern)?, rule.replacement.clone())))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            featuring,
            rewrites,
        })
    }

    pub fn identity(&self, track: &Track) -> String {
        self.normalize_name(&track.artist)
    }

    /// Apply the rules to a bare artist name.
    pub fn normalize_name(&self, artist: &str) -> String {
        let mut name = artist.to_lowercase();

        if let Some(featuring) = &self.featuring {
            if let Some(main) = featuring.captures(&name).and_then(|c| c.get(1)) {
                name = main.as_str().to_string();
            }
        }

        for (pattern, replacement) in &self.rewrites {
            name = pattern.replace(&name, replacement.as_str()).into_owned();
        }

        name.trim().to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        SongStatsError::InvalidConfiguration(format!("invalid artist pattern '{pattern}': {e}"))
    })
}
