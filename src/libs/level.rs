use std::collections::BTreeMap;

//----------------------------
// Strand
//----------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Plus,
    Minus,
    Unstranded,
}

impl Strand {
    /// `+` and `-` map to the two stranded classes; everything else,
    /// including the conventional `.`, is treated as unstranded
    ///
    /// ```
    /// use gvt::libs::level::Strand;
    /// assert_eq!(Strand::from_char('+'), Strand::Plus);
    /// assert_eq!(Strand::from_char('-'), Strand::Minus);
    /// assert_eq!(Strand::from_char('.'), Strand::Unstranded);
    /// assert_eq!(Strand::from_char('?'), Strand::Unstranded);
    /// ```
    pub fn from_char(c: char) -> Self {
        match c {
            '+' => Strand::Plus,
            '-' => Strand::Minus,
            _ => Strand::Unstranded,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let c = match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unstranded => '.',
        };
        write!(f, "{}", c)
    }
}

//----------------------------
// FeatureStyle
//----------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureStyle {
    PlusArrow,
    MinusArrow,
    NoArrow,
}

impl FeatureStyle {
    /// Glyph consumed by the renderer: arrowhead on the right, on the
    /// left, or a plain segment
    pub fn glyph(&self) -> &'static str {
        match self {
            FeatureStyle::PlusArrow => "-|>",
            FeatureStyle::MinusArrow => "<|-",
            FeatureStyle::NoArrow => "-",
        }
    }
}

impl std::fmt::Display for FeatureStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

//----------------------------
// EnhancedFeature
//----------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedFeature {
    pub id: String,
    pub start: usize,
    pub end: usize,
    pub style: FeatureStyle,
    pub level: i32,
}

//----------------------------
// LevelCount
//----------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCount {
    pub all: usize,
    pub positive: usize,
    pub negative: usize,
    pub unstranded: usize,
}

//----------------------------
// Level
//----------------------------
/// Packs annotation features into horizontal display rows ("levels") so
/// that features sharing a row never visually collide.
///
/// Positive-strand features occupy levels `1..=max_depth`, negative-strand
/// features `-1..=-max_depth`, and unstranded features the single reserved
/// level `0`. The three pools are independent: exhausting one never spills
/// into another.
///
/// ```
/// use gvt::libs::level::{Level, Strand};
/// let mut lv = Level::new();
/// let ef = lv.assign("YAL069W", 335, 649, Strand::Plus).unwrap();
/// assert_eq!(ef.level, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Level {
    max_depth: i32,
    offset: usize,
    filter_pos: bool,
    filter_neg: bool,
    filter_unstrand: bool,
    // level index -> end coordinate of the last occupant
    occupied: BTreeMap<i32, usize>,
    count: LevelCount,
}

impl Default for Level {
    fn default() -> Self {
        Self {
            max_depth: 10,
            offset: 10,
            filter_pos: false,
            filter_neg: false,
            filter_unstrand: true,
            occupied: BTreeMap::new(),
            count: LevelCount::default(),
        }
    }
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row budget per strand pool
    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Minimal gap between two contiguous features on the same level
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Suppress all positive-strand features
    pub fn with_filter_pos(mut self, flag: bool) -> Self {
        self.filter_pos = flag;
        self
    }

    /// Suppress all negative-strand features
    pub fn with_filter_neg(mut self, flag: bool) -> Self {
        self.filter_neg = flag;
        self
    }

    /// Suppress features with no strand information
    pub fn with_filter_unstrand(mut self, flag: bool) -> Self {
        self.filter_unstrand = flag;
        self
    }

    /// The lowest level index in use
    pub fn min_level(&self) -> Option<i32> {
        self.occupied.keys().next().copied()
    }

    /// The highest level index in use
    pub fn max_level(&self) -> Option<i32> {
        self.occupied.keys().next_back().copied()
    }

    /// The total number of levels in use
    pub fn n_level(&self) -> usize {
        self.occupied.len()
    }

    pub fn count(&self) -> &LevelCount {
        &self.count
    }

    /// Places one feature into the lowest available level of its strand
    /// pool.
    ///
    /// Successive calls must present non-decreasing `start` coordinates;
    /// this precondition is the caller's responsibility and is not
    /// checked. A level is reusable once `recorded_end + offset < start`.
    ///
    /// Returns `None` when the feature's strand class is filtered out, or
    /// when all `max_depth` levels of its pool are still occupied. Both
    /// are silent drops, not errors: later features may well fit again.
    ///
    /// Unstranded features all land on level 0, each overwriting the
    /// previous occupant with no spacing check. Callers relying on packed
    /// unstranded rows must handle that themselves.
    pub fn assign(
        &mut self,
        id: &str,
        start: usize,
        end: usize,
        strand: Strand,
    ) -> Option<EnhancedFeature> {
        self.count.all += 1;

        match strand {
            Strand::Plus if !self.filter_pos => {
                self.count.positive += 1;

                for level in 1..=self.max_depth {
                    if self.is_free(level, start) {
                        self.occupied.insert(level, end);
                        return Some(EnhancedFeature {
                            id: id.to_string(),
                            start,
                            end,
                            style: FeatureStyle::PlusArrow,
                            level,
                        });
                    }
                }
                None
            }
            Strand::Minus if !self.filter_neg => {
                self.count.negative += 1;

                for level in (-self.max_depth..=-1).rev() {
                    if self.is_free(level, start) {
                        self.occupied.insert(level, end);
                        return Some(EnhancedFeature {
                            id: id.to_string(),
                            start,
                            end,
                            style: FeatureStyle::MinusArrow,
                            level,
                        });
                    }
                }
                None
            }
            Strand::Unstranded if !self.filter_unstrand => {
                self.count.unstranded += 1;

                self.occupied.insert(0, end);
                Some(EnhancedFeature {
                    id: id.to_string(),
                    start,
                    end,
                    style: FeatureStyle::NoArrow,
                    level: 0,
                })
            }
            _ => None,
        }
    }

    fn is_free(&self, level: i32, start: usize) -> bool {
        match self.occupied.get(&level) {
            None => true,
            Some(&end) => end + self.offset < start,
        }
    }
}
