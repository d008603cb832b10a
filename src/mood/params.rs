/// Catalog search/recommendation parameters derived from a single mood.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CatalogParams {
    pub seed_genres: Vec<String>,
    pub target_energy: f32,
    pub target_valence: f32,
}

pub const MAX_SEED_GENRES: usize = 5;

pub const DEFAULT_GENRES: &[&str] = &["pop", "rock"];
pub const DEFAULT_ENERGY: f32 = 0.6;
pub const DEFAULT_VALENCE: f32 = 0.5;

/// (mood, genres) — lookup is case-sensitive, unknown moods fall back to
/// DEFAULT_GENRES.
const GENRE_TABLE: &[(&str, &[&str])] = &[
    ("Happy", &["pop", "dance", "disco"]),
    ("Energetic", &["dance", "electronic", "house"]),
    ("Peaceful", &["classical", "ambient", "study"]),
    ("Melancholic", &["indie", "acoustic", "piano"]),
    ("Relaxed", &["jazz", "acoustic", "ambient"]),
    ("Focused", &["classical", "electronic", "study"]),
    ("Mellow", &["indie", "folk", "acoustic"]),
    ("Romantic", &["jazz", "soul", "r-n-b"]),
    ("Night", &["chill", "electronic", "study"]),
    ("Morning", &["pop", "indie", "dance"]),
];

const ENERGY_TABLE: &[(&str, f32)] = &[
    ("Happy", 0.8),
    ("Energetic", 0.9),
    ("Peaceful", 0.3),
    ("Melancholic", 0.4),
    ("Relaxed", 0.3),
    ("Focused", 0.5),
    ("Mellow", 0.4),
    ("Romantic", 0.5),
    ("Night", 0.2),
    ("Morning", 0.7),
];

const VALENCE_TABLE: &[(&str, f32)] = &[
    ("Happy", 0.8),
    ("Energetic", 0.7),
    ("Peaceful", 0.6),
    ("Melancholic", 0.3),
    ("Relaxed", 0.5),
    ("Focused", 0.6),
    ("Mellow", 0.5),
    ("Romantic", 0.6),
    ("Night", 0.4),
    ("Morning", 0.7),
];

pub fn genres_for_mood(mood: &str) -> Vec<String> {
    let genres = GENRE_TABLE
        .iter()
        .find(|(m, _)| *m == mood)
        .map(|(_, g)| *g)
        .unwrap_or(DEFAULT_GENRES);
    genres
        .iter()
        .take(MAX_SEED_GENRES)
        .map(|g| g.to_string())
        .collect()
}

pub fn energy_for_mood(mood: &str) -> f32 {
    ENERGY_TABLE
        .iter()
        .find(|(m, _)| *m == mood)
        .map(|(_, e)| *e)
        .unwrap_or(DEFAULT_ENERGY)
}

pub fn valence_for_mood(mood: &str) -> f32 {
    VALENCE_TABLE
        .iter()
        .find(|(m, _)| *m == mood)
        .map(|(_, v)| *v)
        .unwrap_or(DEFAULT_VALENCE)
}

/// Pure and total: every label maps to parameters, unknown labels get the
/// documented defaults.
pub fn params_for_mood(mood: &str) -> CatalogParams {
    CatalogParams {
        seed_genres: genres_for_mood(mood),
        target_energy: energy_for_mood(mood),
        target_valence: valence_for_mood(mood),
    }
}
