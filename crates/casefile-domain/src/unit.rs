//! Unit module - the piece of a document submitted in a single request

/// Characters per page used when estimating page counts for chunked input
pub const CHARS_PER_ESTIMATED_PAGE: f64 = 2000.0;

/// How a unit was cut out of its source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Fixed-width character slice
    Chunk,

    /// Delimiter-marked document page
    Page,
}

/// One chunk or page of input text
///
/// `index` is the chunk ordinal (0-based) for chunks and the printed page
/// number for pages. Units are immutable once split off the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Chunk ordinal or page number
    pub index: usize,

    /// Raw text sent to the model
    pub text: String,

    /// How this unit was produced
    pub kind: UnitKind,
}

impl Unit {
    /// Create a fixed-width chunk unit
    pub fn chunk(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            kind: UnitKind::Chunk,
        }
    }

    /// Create a delimited page unit
    pub fn page(number: usize, text: impl Into<String>) -> Self {
        Self {
            index: number,
            text: text.into(),
            kind: UnitKind::Page,
        }
    }

    /// Length in Unicode scalar values
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Rough page estimate for chunked input, rounded to two places
    ///
    /// Pages already carry their own number, so this is `None` for them.
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_domain::Unit;
    ///
    /// let unit = Unit::chunk(0, "a".repeat(3000));
    /// assert_eq!(unit.estimated_pages(), Some(1.5));
    /// ```
    pub fn estimated_pages(&self) -> Option<f64> {
        match self.kind {
            UnitKind::Chunk => {
                let pages = self.char_count() as f64 / CHARS_PER_ESTIMATED_PAGE;
                Some((pages * 100.0).round() / 100.0)
            }
            UnitKind::Page => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_is_not_byte_count() {
        let unit = Unit::chunk(0, "résumé");
        assert_eq!(unit.char_count(), 6);
        assert_eq!(unit.text.len(), 8);
    }

    #[test]
    fn test_estimated_pages_rounding() {
        assert_eq!(Unit::chunk(0, "x".repeat(2000)).estimated_pages(), Some(1.0));
        assert_eq!(Unit::chunk(0, "x".repeat(1234)).estimated_pages(), Some(0.62));
        assert_eq!(Unit::chunk(0, "").estimated_pages(), Some(0.0));
    }

    #[test]
    fn test_pages_have_no_estimate() {
        let unit = Unit::page(7, "=== START OF PAGE 7 ON PDF a.pdf ===");
        assert_eq!(unit.index, 7);
        assert_eq!(unit.kind, UnitKind::Page);
        assert!(unit.estimated_pages().is_none());
    }
}
