//! UI-only state types.

use ytmp3_core::models::{TimePoint, TimeUnit};

/// Kind of window for a given window ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Main,
    Trim,
    AudioSettings,
}

/// Which window a timestamp entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimFieldOwner {
    Trim,
    AudioSettings,
}

/// One of the six hh:mm:ss entries of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrimField {
    pub owner: TrimFieldOwner,
    pub point: TimePoint,
    pub unit: TimeUnit,
}

/// Raw text of the six entries, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimFieldTexts {
    start: [String; 3],
    end: [String; 3],
}

impl TrimFieldTexts {
    pub fn get(&self, point: TimePoint, unit: TimeUnit) -> &str {
        match point {
            TimePoint::Start => &self.start[unit.index()],
            TimePoint::End => &self.end[unit.index()],
        }
    }

    pub fn set(&mut self, point: TimePoint, unit: TimeUnit, text: String) {
        match point {
            TimePoint::Start => self.start[unit.index()] = text,
            TimePoint::End => self.end[unit.index()] = text,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texts_are_addressed_by_point_and_unit() {
        let mut texts = TrimFieldTexts::default();
        texts.set(TimePoint::End, TimeUnit::Minute, "12".to_string());
        assert_eq!(texts.get(TimePoint::End, TimeUnit::Minute), "12");
        assert_eq!(texts.get(TimePoint::Start, TimeUnit::Minute), "");
        texts.clear();
        assert_eq!(texts, TrimFieldTexts::default());
    }
}
