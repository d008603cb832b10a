/// Six slices of the day, half-open intervals over the local hour.
/// The night slice wraps midnight: [22, 24) ∪ [0, 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter)]
pub enum DayPart {
    Morning,
    Forenoon,
    Midday,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    /// Maps a wall-clock hour (0-23) to its slice. Total: every hour lands
    /// in exactly one variant, boundary hours open their interval.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=8 => DayPart::Morning,
            9..=11 => DayPart::Forenoon,
            12..=14 => DayPart::Midday,
            15..=17 => DayPart::Afternoon,
            18..=21 => DayPart::Evening,
            _ => DayPart::Night,
        }
    }

    pub fn moods(self) -> [&'static str; 3] {
        match self {
            DayPart::Morning => ["Morning", "Energetic", "Upbeat"],
            DayPart::Forenoon => ["Focused", "Productive", "Motivated"],
            DayPart::Midday => ["Relaxed", "Calm", "Peaceful"],
            DayPart::Afternoon => ["Upbeat", "Energetic", "Happy"],
            DayPart::Evening => ["Chill", "Relaxed", "Mellow"],
            DayPart::Night => ["Night", "Calm", "Peaceful"],
        }
    }
}

/// Mood labels for a given local hour.
pub fn moods_for_hour(hour: u32) -> [&'static str; 3] {
    DayPart::from_hour(hour).moods()
}
